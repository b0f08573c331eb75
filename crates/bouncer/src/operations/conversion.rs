//! Conversion operations
//!
//! Each conversion either fails without touching the stored value or writes
//! the converted value back under the validator's name. Conversions that only
//! make sense for one shape of input (`trim` on strings, `uniq` on arrays)
//! raise a precondition fault for anything else.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::foundation::{ChainError, ChainOperation, Step};
use crate::value::{
    as_f64, as_safe_integer, coerce_to_string, describe, is_truthy, number_from_f64,
    parse_finite_float, parse_safe_integer, values_equal,
};

/// Declares a unit conversion: zero-sized struct plus a `ChainOperation`
/// impl whose body is `$apply`.
macro_rules! conversion {
    (
        $(#[$meta:meta])*
        $name:ident as $code:literal;
        |$step:ident| $apply:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name;

        impl<C> ChainOperation<C> for $name {
            fn name(&self) -> &str {
                $code
            }

            fn apply(&self, $step: &mut Step<'_, '_, C>) -> Result<(), ChainError> $apply
        }
    };
}

// ============================================================================
// NUMBERS
// ============================================================================

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_safe_integer(s),
        other => as_safe_integer(other),
    }
}

conversion! {
    /// Converts an integer-shaped string or an integral number to an integer.
    ///
    /// Anything outside the safe-integer range fails.
    ToInt as "to_int";
    |step| {
        match step.value().and_then(integer_of) {
            Some(n) => {
                step.set(Value::from(n));
                Ok(())
            }
            None => Err(step.fail("to_int", format!("{} must be an integer", step.name()))),
        }
    }
}

conversion! {
    /// Converts a float-shaped string or a number to a finite number.
    ///
    /// Integral results are stored as JSON integers.
    ToFloat as "to_float";
    |step| {
        let parsed = match step.value() {
            Some(Value::String(s)) => parse_finite_float(s),
            Some(other) => as_f64(other).filter(|f| f.is_finite()),
            None => None,
        };
        match parsed.and_then(number_from_f64) {
            Some(number) => {
                step.set(number);
                Ok(())
            }
            None => Err(step.fail("to_float", format!("{} must be a number", step.name()))),
        }
    }
}

conversion! {
    /// Converts every element of an array to an integer.
    ///
    /// All or nothing: if any element fails, the stored array is left as it
    /// was.
    ToInts as "to_ints";
    |step| {
        let converted = match step.value() {
            Some(Value::Array(items)) => items.iter().map(integer_of).collect::<Option<Vec<_>>>(),
            other => {
                return Err(step.precondition(format!(
                    "expected an array, found {}",
                    describe(other)
                )));
            }
        };
        match converted {
            Some(ints) => {
                step.set(Value::Array(ints.into_iter().map(Value::from).collect()));
                Ok(())
            }
            None => Err(step.fail(
                "to_ints",
                format!("{} must be an array of integers", step.name()),
            )),
        }
    }
}

// ============================================================================
// ARRAYS
// ============================================================================

conversion! {
    /// Wraps a scalar into a one-element array; an absent value becomes `[]`
    /// and arrays pass through unchanged.
    ToArray as "to_array";
    |step| {
        let wrapped = match step.value() {
            None => Value::Array(Vec::new()),
            Some(Value::Array(_)) => return Ok(()),
            Some(other) => Value::Array(vec![other.clone()]),
        };
        step.set(wrapped);
        Ok(())
    }
}

conversion! {
    /// Drops repeated elements of an array, keeping first occurrences in
    /// order.
    Uniq as "uniq";
    |step| {
        let Some(Value::Array(items)) = step.value() else {
            return Err(step.precondition(format!(
                "expected an array, found {}",
                describe(step.value())
            )));
        };
        let mut unique: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.iter().any(|kept| values_equal(kept, item)) {
                unique.push(item.clone());
            }
        }
        step.set(Value::Array(unique));
        Ok(())
    }
}

// ============================================================================
// BOOLEANS AND STRINGS
// ============================================================================

conversion! {
    /// Replaces the value with its truthiness. An absent value becomes
    /// `false`.
    ToBoolean as "to_boolean";
    |step| {
        let truthy = is_truthy(step.value());
        step.set(Value::Bool(truthy));
        Ok(())
    }
}

conversion! {
    /// Coerces the value to a string. Absent and `null` become `""`.
    ToStr as "to_string";
    |step| {
        let coerced = coerce_to_string(step.value());
        step.set(Value::String(coerced));
        Ok(())
    }
}

conversion! {
    /// Strips leading and trailing whitespace from a string.
    Trim as "trim";
    |step| {
        let Some(Value::String(s)) = step.value() else {
            return Err(step.precondition(format!(
                "expected a string, found {}",
                describe(step.value())
            )));
        };
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            let trimmed = trimmed.to_owned();
            step.set(Value::String(trimmed));
        }
        Ok(())
    }
}

// ============================================================================
// JSON
// ============================================================================

conversion! {
    /// Parses a JSON string and replaces the value with the result.
    FromJson as "from_json";
    |step| {
        let s = step.require_string()?;
        match serde_json::from_str::<Value>(s) {
            Ok(parsed) => {
                step.set(parsed);
                Ok(())
            }
            Err(err) => {
                tracing::trace!(name = step.name(), error = %err, "json parse failed");
                Err(step.fail("from_json", format!("{} must be valid JSON", step.name())))
            }
        }
    }
}

conversion! {
    /// Fails unless the value is a string holding valid JSON. Does not
    /// convert.
    IsJson as "is_json";
    |step| {
        let s = step.require_string()?;
        if serde_json::from_str::<serde::de::IgnoredAny>(s).is_ok() {
            Ok(())
        } else {
            Err(step.fail("is_json", format!("{} must be valid JSON", step.name())))
        }
    }
}

// ============================================================================
// BASE64
// ============================================================================

conversion! {
    /// Replaces a string with its standard, padded base64 encoding.
    EncodeBase64 as "encode_base64";
    |step| {
        let Some(Value::String(s)) = step.value() else {
            return Err(step.precondition(format!(
                "expected a string, found {}",
                describe(step.value())
            )));
        };
        let encoded = STANDARD.encode(s.as_bytes());
        step.set(Value::String(encoded));
        Ok(())
    }
}

conversion! {
    /// Decodes a standard base64 string holding UTF-8 text.
    DecodeBase64 as "decode_base64";
    |step| {
        let s = step.require_string()?;
        let decoded = STANDARD
            .decode(s.as_bytes())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok());
        match decoded {
            Some(text) => {
                step.set(Value::String(text));
                Ok(())
            }
            None => Err(step.fail(
                "decode_base64",
                format!("{} must be base64 encoded text", step.name()),
            )),
        }
    }
}

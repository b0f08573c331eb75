//! Utility functions for working with serde_json::Value

use serde_json::{Number, Value};

/// Largest integer that survives a round trip through an IEEE-754 double.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Smallest integer that survives a round trip through an IEEE-754 double.
pub const MIN_SAFE_INTEGER: i64 = -MAX_SAFE_INTEGER;

/// Get the type name of a Value for error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type name of a possibly absent value.
pub fn describe(value: Option<&Value>) -> &'static str {
    value.map_or("absent", value_type_name)
}

/// Extract f64 from Number, trying both f64 and i64 representations.
#[inline]
pub fn number_as_f64(num: &Number) -> Option<f64> {
    num.as_f64().or_else(|| num.as_i64().map(|i| i as f64))
}

/// Numeric view of a value; `None` for anything that is not a JSON number.
#[inline]
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => number_as_f64(n),
        _ => None,
    }
}

/// Compares two numbers by value, so `17` and `17.0` are the same number.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (number_as_f64(a), number_as_f64(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Strict equality: no coercion between types, but numbers compare by
/// value rather than by representation. Arrays and objects compare element
/// by element.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Returns true if `n` lies within the safe-integer range.
#[inline]
pub fn is_safe_integer(n: i64) -> bool {
    (MIN_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&n)
}

/// Returns the value as an integer if it is an integral number within the
/// safe-integer range.
///
/// Floats with no fractional part (`3.0`) count as integers.
pub fn as_safe_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return is_safe_integer(i).then_some(i);
    }
    if n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Parses an integer-shaped string (`"42"`, `"-7"`, `"+3"`, surrounding
/// whitespace allowed) within the safe-integer range.
pub fn parse_safe_integer(s: &str) -> Option<i64> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok().filter(|n| is_safe_integer(*n))
}

/// Parses a decimal float-shaped string (`"1.5"`, `".5"`, `"-2"`, `"1e3"`).
///
/// Words such as `inf` or `NaN`, which `f64::from_str` would accept, are
/// rejected, as are results that overflow to infinity.
pub fn parse_finite_float(s: &str) -> Option<f64> {
    let s = s.trim();
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return None;
    }
    if let Some(exp) = exponent {
        let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
    }

    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Builds a JSON number from a float, preferring the integer representation
/// for integral values so `"17"` and `17` compare equal after conversion.
pub fn number_from_f64(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER as f64 {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}

/// Check if a value is truthy.
///
/// `null`, `false`, `0`, and `""` are falsy. Arrays and objects are always
/// truthy, including empty ones. An absent value is falsy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => number_as_f64(n).is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Length of a value that has one: characters of a string, items of an array.
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Coerces a value to a display string.
///
/// Absent and `null` become `""`; arrays join their elements with `,`;
/// objects are rendered as JSON.
pub fn coerce_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| coerce_to_string(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(object @ Value::Object(_)) => object.to_string(),
    }
}

/// Renders an operand for a default message: strings without quotes, the
/// rest as JSON.
pub fn display_operand(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Type checks
//!
//! Pure checks on the JSON type of the current value. None of them convert.

use serde_json::Value;

use crate::value::{as_f64, as_safe_integer};

crate::operation! {
    /// Fails unless the value is a string.
    pub IsString as "is_string";
    rule(value) { matches!(value, Some(Value::String(_))) }
    message(name) { format!("{name} must be a string") }
}

crate::operation! {
    /// Fails unless the value is an array.
    pub IsArray as "is_array";
    rule(value) { matches!(value, Some(Value::Array(_))) }
    message(name) { format!("{name} must be an array") }
}

crate::operation! {
    /// Fails unless the value is an integral number within the safe-integer
    /// range. Strings never pass, not even `"1"`.
    pub IsInt as "is_int";
    rule(value) { value.and_then(as_safe_integer).is_some() }
    message(name) { format!("{name} must be an integer") }
}

crate::operation! {
    /// Fails unless the value is a finite number.
    pub IsFiniteNumber as "is_finite_number";
    rule(value) { value.and_then(as_f64).is_some_and(f64::is_finite) }
    message(name) { format!("{name} must be a finite number") }
}

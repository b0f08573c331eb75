//! Integration test: conversions write back into the store

use bouncer::ChainError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::{body, engine, invalid};

/// Runs `convert` on a body field holding `input` and returns the stored
/// value afterwards.
fn converted<F>(input: Value, convert: F) -> (Result<(), ChainError>, Option<Value>)
where
    F: FnOnce(&mut bouncer::Validator<'_, '_, bouncer::RawRequest>) -> Result<(), ChainError>,
{
    let engine = engine();
    let request = body(json!({ "v": input }));
    let mut session = engine.session(&request);
    let result = convert(&mut session.validate_body("v"));
    (result, session.vals().get("v").cloned())
}

#[rstest]
#[case(json!("42"), json!(42))]
#[case(json!("-7"), json!(-7))]
#[case(json!(12), json!(12))]
#[case(json!(12.0), json!(12))]
fn to_int_accepts_integers(#[case] input: Value, #[case] expected: Value) {
    let (result, stored) = converted(input, |v| v.to_int(None).map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(expected));
}

#[rstest]
#[case(json!("4.2"))]
#[case(json!("abc"))]
#[case(json!("9007199254740992"))]
#[case(json!(true))]
fn to_int_rejects_non_integers(#[case] input: Value) {
    let (result, stored) = converted(input.clone(), |v| v.to_int(None).map(|_| ()));
    assert!(invalid(result).message().ends_with("must be an integer"));
    assert_eq!(stored, Some(input));
}

#[rstest]
#[case(json!("1.5"), json!(1.5))]
#[case(json!("17"), json!(17))]
#[case(json!(2.25), json!(2.25))]
fn to_float_accepts_numbers(#[case] input: Value, #[case] expected: Value) {
    let (result, stored) = converted(input, |v| v.to_float(None).map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(expected));
}

#[rstest]
#[case(json!("1.2.3"))]
#[case(json!("Infinity"))]
#[case(json!(""))]
fn to_float_rejects_garbage(#[case] input: Value) {
    let (result, _) = converted(input, |v| v.to_float(None).map(|_| ()));
    assert_eq!(invalid(result).code, "to_float");
}

#[test]
fn to_ints_is_all_or_nothing() {
    let (result, stored) = converted(json!(["1", "x", "3"]), |v| v.to_ints(None).map(|_| ()));
    assert_eq!(invalid(result).code, "to_ints");
    assert_eq!(stored, Some(json!(["1", "x", "3"])));

    let (result, stored) = converted(json!(["1", "2", 3]), |v| v.to_ints(None).map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(json!([1, 2, 3])));
}

#[test]
fn to_ints_on_a_scalar_is_a_precondition_fault() {
    let (result, _) = converted(json!("1"), |v| v.to_ints(None).map(|_| ()));
    assert!(matches!(result, Err(ChainError::Precondition { .. })));
}

#[test]
fn to_array_wraps_scalars() {
    let engine = engine();
    let request = body(json!({"one": 5, "many": [1, 2]}));
    let mut session = engine.session(&request);

    session.validate_body("none").to_array().unwrap();
    session.validate_body("one").to_array().unwrap();
    session.validate_body("many").to_array().unwrap();

    assert_eq!(session.vals().get("none"), Some(&json!([])));
    assert_eq!(session.vals().get("one"), Some(&json!([5])));
    assert_eq!(session.vals().get("many"), Some(&json!([1, 2])));
}

#[test]
fn to_array_then_to_ints() {
    let (result, stored) = converted(json!("4"), |v| {
        v.to_array()?.to_ints(None)?.uniq()?;
        Ok(())
    });
    assert!(result.is_ok());
    assert_eq!(stored, Some(json!([4])));
}

#[test]
fn uniq_keeps_first_occurrences() {
    let (_, stored) = converted(json!([1, 1, 2]), |v| v.uniq().map(|_| ()));
    assert_eq!(stored, Some(json!([1, 2])));

    let (_, stored) = converted(json!(["b", "a", "b", {"k": 1}, {"k": 1}]), |v| {
        v.uniq().map(|_| ())
    });
    assert_eq!(stored, Some(json!(["b", "a", {"k": 1}])));
}

#[rstest]
#[case(json!([1, 1.0, 2]), json!([1, 2]))]
#[case(json!([2.0, 2, 2.5]), json!([2.0, 2.5]))]
#[case(json!([[1], [1.0], {"k": 0}, {"k": 0.0}]), json!([[1], {"k": 0}]))]
fn uniq_treats_equal_numbers_as_repeats(#[case] input: Value, #[case] expected: Value) {
    let (result, stored) = converted(input, |v| v.uniq().map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(expected));
}

#[test]
fn uniq_on_a_string_is_a_precondition_fault() {
    let (result, _) = converted(json!("aab"), |v| v.uniq().map(|_| ()));
    assert!(matches!(result, Err(ChainError::Precondition { .. })));
}

#[rstest]
#[case(json!("yes"), true)]
#[case(json!(""), false)]
#[case(json!(0), false)]
#[case(json!(-1), true)]
#[case(json!(null), false)]
#[case(json!([]), true)]
#[case(json!({}), true)]
fn to_boolean_uses_truthiness(#[case] input: Value, #[case] expected: bool) {
    let (_, stored) = converted(input, |v| v.to_boolean().map(|_| ()));
    assert_eq!(stored, Some(Value::Bool(expected)));
}

#[test]
fn absent_values_convert_to_falsy_defaults() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    session.validate_body("flag").to_boolean().unwrap();
    session.validate_body("text").to_string().unwrap();

    assert_eq!(session.vals().get("flag"), Some(&json!(false)));
    assert_eq!(session.vals().get("text"), Some(&json!("")));
}

#[rstest]
#[case(json!(42), "42")]
#[case(json!(true), "true")]
#[case(json!(null), "")]
#[case(json!([1, "a"]), "1,a")]
fn to_string_coerces(#[case] input: Value, #[case] expected: &str) {
    let (_, stored) = converted(input, |v| v.to_string().map(|_| ()));
    assert_eq!(stored, Some(json!(expected)));
}

#[test]
fn trim() {
    let (_, stored) = converted(json!("\t hi \n"), |v| v.trim().map(|_| ()));
    assert_eq!(stored, Some(json!("hi")));

    let (result, _) = converted(json!(3), |v| v.trim().map(|_| ()));
    assert!(matches!(result, Err(ChainError::Precondition { .. })));
}

#[test]
fn from_json_parses_and_stores() {
    let (result, stored) = converted(json!(r#"{"a": [1, 2]}"#), |v| v.from_json(None).map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(json!({"a": [1, 2]})));

    let (result, stored) = converted(json!("{oops"), |v| v.from_json(None).map(|_| ()));
    assert_eq!(invalid(result).code, "from_json");
    assert_eq!(stored, Some(json!("{oops")));
}

#[test]
fn is_json_does_not_convert() {
    let (result, stored) = converted(json!("[1, 2]"), |v| v.is_json(None).map(|_| ()));
    assert!(result.is_ok());
    assert_eq!(stored, Some(json!("[1, 2]")));

    let (result, _) = converted(json!(5), |v| v.is_json(None).map(|_| ()));
    assert_eq!(invalid(result).code, "is_string");
}

#[test]
fn clamp_pulls_numbers_into_range() {
    let (_, stored) = converted(json!(150), |v| v.clamp(1, 100).map(|_| ()));
    assert_eq!(stored, Some(json!(100)));

    let (_, stored) = converted(json!(-3), |v| v.clamp(1, 100).map(|_| ()));
    assert_eq!(stored, Some(json!(1)));

    let (_, stored) = converted(json!(42), |v| v.clamp(1, 100).map(|_| ()));
    assert_eq!(stored, Some(json!(42)));

    let (result, _) = converted(json!("42"), |v| v.clamp(1, 100).map(|_| ()));
    assert!(matches!(result, Err(ChainError::Precondition { .. })));
}

#[test]
fn base64_round_trip() {
    let (_, stored) = converted(json!("hello"), |v| {
        v.encode_base64()?;
        Ok(())
    });
    assert_eq!(stored, Some(json!("aGVsbG8=")));

    let (_, stored) = converted(json!("aGVsbG8="), |v| v.decode_base64(None).map(|_| ()));
    assert_eq!(stored, Some(json!("hello")));

    let (result, _) = converted(json!("not base64!"), |v| v.decode_base64(None).map(|_| ()));
    assert_eq!(invalid(result).code, "decode_base64");
}

//! Integration test: string formats, patterns and UUIDs

use std::sync::LazyLock;

use bouncer::operations::UuidVersion;
use pretty_assertions::assert_eq;
use regex::Regex;
use rstest::rstest;
use serde_json::{Value, json};

use crate::{body, engine, invalid};

const V4: &str = "9b2e6f4e-8c1a-4c5e-9f3d-2a7b1c0d4e5f";
const V3: &str = "9b2e6f4e-8c1a-3c5e-9f3d-2a7b1c0d4e5f";

static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

#[test]
fn uuid_defaults_to_any_version() {
    let engine = engine();
    let request = body(json!({"a": V4, "b": V3}));
    let mut session = engine.session(&request);

    assert!(session.validate_body("a").is_uuid(()).is_ok());
    assert!(session.validate_body("b").is_uuid(()).is_ok());
}

#[test]
fn uuid_version_tag_restricts_the_pattern() {
    let engine = engine();
    let request = body(json!({"a": V4, "b": V3}));
    let mut session = engine.session(&request);

    assert!(session.validate_body("a").is_uuid("v4").is_ok());
    let err = invalid(session.validate_body("b").is_uuid("v4"));
    assert_eq!(err.message(), "b must be a v4 UUID");
    assert!(session.validate_body("b").is_uuid(UuidVersion::V3).is_ok());
}

#[test]
fn uuid_non_tag_argument_is_the_tip() {
    let engine = engine();
    let request = body(json!({"id": "nope", "other": V3}));
    let mut session = engine.session(&request);

    let err = invalid(session.validate_body("id").is_uuid("not a uuid"));
    assert_eq!(err.message(), "not a uuid");

    assert!(session.validate_body("other").is_uuid("not a uuid").is_ok());

    let err = invalid(session.validate_body("other").is_uuid(("v5", "Need a v5 id")));
    assert_eq!(err.message(), "Need a v5 id");
}

#[test]
fn formats_require_a_string_first() {
    let engine = engine();
    let request = body(json!({"n": 123}));
    let mut session = engine.session(&request);

    let err = invalid(session.validate_body("n").is_numeric(None));
    assert_eq!(err.code, "is_string");
    assert_eq!(err.message(), "n must be a string");

    let err = invalid(session.validate_body("n").is_email(Some("Bad email")));
    assert_eq!(err.message(), "Bad email");
}

#[rstest]
#[case(json!("Alice"), true, true, false)]
#[case(json!("alice99"), false, true, false)]
#[case(json!("-12.5"), false, false, true)]
#[case(json!("hello world"), false, false, false)]
fn letter_and_number_formats(
    #[case] value: Value,
    #[case] alpha: bool,
    #[case] alphanumeric: bool,
    #[case] numeric: bool,
) {
    let engine = engine();
    let request = body(json!({ "v": value }));
    let mut session = engine.session(&request);

    assert_eq!(session.validate_body("v").is_alpha(None).is_ok(), alpha);
    assert_eq!(
        session.validate_body("v").is_alphanumeric(None).is_ok(),
        alphanumeric
    );
    assert_eq!(session.validate_body("v").is_numeric(None).is_ok(), numeric);
    assert!(session.validate_body("v").is_ascii(None).is_ok());
}

#[test]
fn format_default_messages() {
    let engine = engine();
    let request = body(json!({
        "email": "nobody",
        "color": "#12345",
        "blob": "@@@@",
        "name": "\u{c5}sa",
    }));
    let mut session = engine.session(&request);

    let err = invalid(session.validate_body("email").is_email(None));
    assert_eq!(err.message(), "email must be a valid email address");
    let err = invalid(session.validate_body("color").is_hex_color(None));
    assert_eq!(err.message(), "color must be a hex color");
    let err = invalid(session.validate_body("blob").is_base64(None));
    assert_eq!(err.message(), "blob must be base64 encoded");
    let err = invalid(session.validate_body("name").is_ascii(None));
    assert_eq!(err.code, "is_ascii");
}

#[test]
fn matches_and_not_matches() {
    let engine = engine();
    let request = body(json!({"slug": "hello-world", "title": "Hello World"}));
    let mut session = engine.session(&request);

    assert!(session.validate_body("slug").matches(&SLUG_REGEX, None).is_ok());
    let err = invalid(session.validate_body("title").matches(&SLUG_REGEX, None));
    assert_eq!(err.code, "matches");
    assert_eq!(err.message(), "title must match ^[a-z0-9-]+$");

    assert!(
        session
            .validate_body("title")
            .not_matches(&SLUG_REGEX, None)
            .is_ok()
    );
    let err = invalid(
        session
            .validate_body("slug")
            .not_matches(&SLUG_REGEX, Some("Looks like a slug")),
    );
    assert_eq!(err.message(), "Looks like a slug");
}

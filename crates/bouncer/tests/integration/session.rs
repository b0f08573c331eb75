//! Integration test: sessions, sources and the value store

use bouncer::{Bouncer, BouncerBuilder, RawRequest, Source};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::{body, engine};

#[test]
fn second_lookup_sees_earlier_conversions() {
    let engine = engine();
    let request = body(json!({"x": "  padded  "}));
    let mut session = engine.session(&request);

    session.validate_body("x").trim().unwrap();
    let second = session.validate_body("x");
    assert_eq!(second.value(), Some(&json!("padded")));
    assert_eq!(session.validator_count(), 1);
}

#[test]
fn each_source_is_read_independently() {
    let engine = engine();
    let request = RawRequest::new()
        .with_param("id", json!("7"))
        .with_query("page", json!("2"))
        .with_body(json!({"name": "alice"}));
    let mut session = engine.session(&request);

    session.validate_param("id").to_int(None).unwrap();
    session.validate_query("page").to_int(None).unwrap();
    session.validate_body("name").is_string(None).unwrap();

    assert_eq!(
        session.vals().as_map(),
        json!({"id": 7, "page": 2, "name": "alice"}).as_object().unwrap()
    );
    assert_eq!(session.source_of("page"), Some(Source::Query));
}

#[test]
fn first_source_wins_for_a_shared_name() {
    let engine = engine();
    let request = RawRequest::new()
        .with_query("id", json!("from-query"))
        .with_body(json!({"id": "from-body"}));
    let mut session = engine.session(&request);

    session.validate_body("id");
    let id = session.validate_query("id");
    assert_eq!(id.value(), Some(&json!("from-body")));
}

#[test]
fn sessions_do_not_share_state() {
    let engine = engine();
    let request = body(json!({"n": "1"}));

    let mut first = engine.session(&request);
    first.validate_body("n").to_int(None).unwrap();

    let second = engine.session(&request);
    assert!(second.vals().is_empty());
    assert_eq!(first.vals().get("n"), Some(&json!(1)));
}

#[test]
fn validated_values_deserialize_into_a_struct() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Signup {
        username: String,
        age: i64,
        newsletter: bool,
    }

    let engine = engine();
    let request = body(json!({"username": " alice ", "age": "30", "newsletter": "yes"}));
    let mut session = engine.session(&request);

    session.validate_body("username").trim().unwrap();
    session.validate_body("age").to_int(None).unwrap();
    session.validate_body("newsletter").to_boolean().unwrap();

    let signup: Signup = session.into_vals().deserialize().unwrap();
    assert_eq!(
        signup,
        Signup {
            username: "alice".into(),
            age: 30,
            newsletter: true,
        }
    );
}

#[test]
fn session_assertions_are_unnamed() {
    let engine = engine();
    let request = body(json!({}));
    let session = engine.session(&request);

    let err = session.check(false, "Not allowed").unwrap_err();
    assert_eq!(err.name(), None);
    assert_eq!(err.message(), "Not allowed");
    assert!(session.check_not(false, "unused").is_ok());
}

struct Form {
    fields: Map<String, Value>,
}

#[test]
fn custom_accessors() {
    let engine: Bouncer<Form> = BouncerBuilder::bare()
        .body(|form: &Form| Some(&form.fields))
        .build();
    let form = Form {
        fields: json!({"email": "a@example.com"})
            .as_object()
            .cloned()
            .unwrap_or_default(),
    };
    let mut session = engine.session(&form);

    assert!(session.validate_body("email").is_email(None).is_ok());
    assert!(session.validate_query("email").value().is_some());
    assert_eq!(session.validate_param("page").value(), None);
}

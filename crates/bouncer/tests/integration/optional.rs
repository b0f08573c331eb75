//! Integration test: optional-skip mode

use bouncer::foundation::from_fn;
use bouncer::{Bouncer, BouncerBuilder, RawRequest};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{body, engine, invalid};

#[test]
fn absent_optional_value_skips_every_step() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    let mut bio = session.validate_body("bio");
    assert!(
        bio.optional()
            .required(None)
            .and_then(|v| v.is_string(None))
            .and_then(|v| v.gt(0, None))
            .and_then(|v| v.trim())
            .and_then(|v| v.is_length(1, 2, None))
            .is_ok()
    );
    assert!(bio.is_optional());
    assert!(!session.vals().contains("bio"));
}

#[test]
fn default_ends_skip_mode() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    session
        .validate_body("limit")
        .optional()
        .default_to(5)
        .and_then(|v| v.gt(0, None))
        .unwrap();
    assert_eq!(session.vals().get("limit"), Some(&json!(5)));

    let err = invalid(
        session
            .validate_body("offset")
            .optional()
            .default_to(5)
            .and_then(|v| v.gt(10, None)),
    );
    assert_eq!(err.code, "gt");
}

#[test]
fn optional_is_a_no_op_when_present() {
    let engine = engine();
    let request = body(json!({"age": "abc"}));
    let mut session = engine.session(&request);

    let mut age = session.validate_body("age");
    assert!(!age.optional().is_optional());
    let err = invalid(age.to_int(None));
    assert_eq!(err.message(), "age must be an integer");
}

#[test]
fn skip_mode_survives_a_second_lookup() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    session.validate_body("tags").optional();
    let mut tags = session.validate_body("tags");
    assert!(tags.is_optional());
    assert!(tags.to_ints(None).is_ok());
}

#[test]
fn presence_clears_skip_mode_for_good() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    let mut page = session.validate_query("page");
    page.optional().set(json!("2"));
    assert!(!page.is_optional());
    page.to_int(None).unwrap();
    assert_eq!(page.value(), Some(&json!(2)));
}

#[test]
fn default_with_reads_the_host_context() {
    let engine = engine();
    let request = RawRequest::new().with_query("fallback", json!("en"));
    let mut session = engine.session(&request);

    session
        .validate_body("locale")
        .optional()
        .default_with(|s| s.ctx().query.get("fallback").cloned().unwrap_or_default())
        .unwrap();
    assert_eq!(session.vals().get("locale"), Some(&json!("en")));
}

#[test]
fn default_with_does_not_run_for_present_values() {
    let engine = engine();
    let request = body(json!({"locale": "fr"}));
    let mut session = engine.session(&request);

    session
        .validate_body("locale")
        .default_with(|_| panic!("producer must not run"))
        .unwrap();
    assert_eq!(session.vals().get("locale"), Some(&json!("fr")));
}

#[test]
fn registered_operations_are_skipped_too() {
    let engine: Bouncer<RawRequest> = BouncerBuilder::new()
        .operation(
            "always_fails",
            from_fn::<RawRequest, _>("always_fails", |step| {
                Err(step.fail("always_fails", "this never passes"))
            }),
        )
        .build();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    assert!(
        session
            .validate_body("missing")
            .optional()
            .invoke("always_fails", &[], None)
            .is_ok()
    );
    assert!(
        session
            .validate_body("other")
            .invoke("always_fails", &[], None)
            .is_err()
    );
}

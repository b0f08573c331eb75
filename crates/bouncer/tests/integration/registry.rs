//! Integration test: custom operations registered on the engine

use bouncer::foundation::{ChainOperation, Step, from_fn};
use bouncer::operations::Required;
use bouncer::{Bouncer, ChainError, RawRequest, Value, operation};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{body, invalid};

operation! {
    /// Fails unless the value is an even integer.
    IsEven as "is_even";
    rule(value) { value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0) }
    message(name) { format!("{name} must be even") }
}

/// Multiplies a number by the first invocation argument.
struct Scale;

impl<C> ChainOperation<C> for Scale {
    fn name(&self) -> &str {
        "scale"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let Some(factor) = step.args().first().and_then(Value::as_i64) else {
            return Err(step.precondition("expected an integer factor"));
        };
        let Some(current) = step.value().and_then(Value::as_i64) else {
            return Err(step.precondition("expected an integer"));
        };
        step.set(json!(current * factor));
        Ok(())
    }
}

fn engine() -> Bouncer<RawRequest> {
    Bouncer::builder()
        .operation("is_even", IsEven)
        .operation("scale", Scale)
        .operation(
            "is_admin_only",
            from_fn::<RawRequest, _>("is_admin_only", |step| {
                let admin = step.session().ctx().query.get("role") == Some(&json!("admin"));
                if admin {
                    Ok(())
                } else {
                    Err(step.fail("is_admin_only", format!("{} is admin only", step.name())))
                }
            }),
        )
        .build()
}

#[test]
fn registered_operations_run_by_name() {
    let engine = engine();
    let request = body(json!({"n": 4, "m": 3}));
    let mut session = engine.session(&request);

    assert!(session.validate_body("n").invoke("is_even", &[], None).is_ok());
    let err = invalid(session.validate_body("m").invoke("is_even", &[], None));
    assert_eq!(err.message(), "m must be even");

    let err = invalid(
        session
            .validate_body("m")
            .invoke("is_even", &[], Some("Pick an even number")),
    );
    assert_eq!(err.message(), "Pick an even number");
}

#[test]
fn registered_operations_chain_with_built_ins() {
    let engine = engine();
    let request = body(json!({"n": "21"}));
    let mut session = engine.session(&request);

    session
        .validate_body("n")
        .to_int(None)
        .and_then(|v| v.invoke("scale", &[json!(2)], None))
        .and_then(|v| v.invoke("is_even", &[], None))
        .and_then(|v| v.lte(42, None))
        .unwrap();
    assert_eq!(session.vals().get("n"), Some(&json!(42)));
}

#[test]
fn operations_can_read_the_host_context() {
    let engine = engine();
    let request = RawRequest::new()
        .with_query("role", json!("user"))
        .with_body(json!({"salary": 1}));
    let mut session = engine.session(&request);

    let err = invalid(session.validate_body("salary").invoke("is_admin_only", &[], None));
    assert_eq!(err.message(), "salary is admin only");
}

#[test]
fn unknown_operation_is_not_a_validation_failure() {
    let engine = engine();
    let request = body(json!({}));
    let mut session = engine.session(&request);

    let err = session
        .validate_body("n")
        .optional()
        .invoke("no_such_thing", &[], None)
        .unwrap_err();
    assert!(matches!(err, ChainError::UnknownOperation(ref name) if name == "no_such_thing"));
}

#[test]
fn operations_run_without_registration() {
    let engine = engine();
    let request = body(json!({"n": 8}));
    let mut session = engine.session(&request);

    assert!(
        session
            .validate_body("n")
            .run(&IsEven, None)
            .and_then(|v| v.run(&Required, None))
            .is_ok()
    );
}

#[test]
fn registry_lists_names() {
    let engine = engine();
    let mut names: Vec<&str> = engine.registry().names().collect();
    names.sort_unstable();
    assert_eq!(names, ["is_admin_only", "is_even", "scale"]);
}

//! Signup handler example for bouncer
//!
//! Validates two signup requests, rendering the first failure the way an
//! HTTP handler would render a 400 body.

use bouncer::{Bouncer, ChainError, RawRequest, Session, ValueStore};
use serde_json::{Value, json};

const TAKEN: &[&str] = &["admin", "root"];

fn signup(session: &mut Session<'_, RawRequest>) -> Result<(), ChainError> {
    session
        .validate_body("username")
        .required(Some("Username required"))?
        .is_string(None)?
        .trim()?
        .is_length(3, 15, Some("Username must be 3-15 chars"))?
        .check_not_pred(
            |_, value| {
                value
                    .and_then(Value::as_str)
                    .is_some_and(|name| TAKEN.contains(&name))
            },
            Some("Username taken"),
        )?;

    session
        .validate_body("email")
        .optional()
        .is_string(None)?
        .trim()?
        .is_email(None)?;

    session
        .validate_body("password1")
        .required(Some("Password required"))?
        .is_string(None)?
        .is_length(6, 100, Some("Password must be 6-100 chars"))?;

    let password1 = session.vals().get("password1").cloned();
    session
        .validate_body("password2")
        .required(Some("Password confirmation required"))?
        .eq(password1.unwrap_or_default(), Some("Passwords must match"))?;

    session
        .validate_body("age")
        .optional()
        .default_to(18)?
        .to_int(None)?
        .clamp(13, 120)?;

    session
        .validate_query("tags")
        .to_array()?
        .uniq()?;

    Ok(())
}

fn respond(request: &RawRequest, engine: &Bouncer<RawRequest>) {
    let mut session = engine.session(request);
    match signup(&mut session) {
        Ok(()) => {
            let vals: ValueStore = session.into_vals();
            println!("201 Created: {}", json!(vals));
        }
        Err(ChainError::Invalid(err)) => println!("400 Bad Request: {}", err.to_json()),
        Err(other) => println!("500 Internal Server Error: {other}"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let engine = Bouncer::<RawRequest>::new();

    let good = RawRequest::new()
        .with_query("tags", json!(["rust", "rust", "web"]))
        .with_body(json!({
            "username": "  alice ",
            "email": "alice@example.com",
            "password1": "secret123",
            "password2": "secret123",
            "age": "230",
        }));
    respond(&good, &engine);

    let bad = RawRequest::new().with_body(json!({
        "username": "root",
        "password1": "secret123",
        "password2": "secret123",
    }));
    respond(&bad, &engine);
}

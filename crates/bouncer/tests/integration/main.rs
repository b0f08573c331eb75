//! Integration tests for bouncer
//!
//! These tests drive whole chains through an engine and a session the way a
//! request handler would.

mod conversions;
mod formats;
mod optional;
mod registry;
mod session;

use bouncer::{Bouncer, ChainError, RawRequest, ValidationError};
use serde_json::Value;

/// Engine with the conventional accessors over [`RawRequest`].
pub fn engine() -> Bouncer<RawRequest> {
    Bouncer::new()
}

/// A request whose body is `body`.
pub fn body(body: Value) -> RawRequest {
    RawRequest::new().with_body(body)
}

/// Unwraps a validation failure, panicking on any other outcome.
#[track_caller]
pub fn invalid<T: std::fmt::Debug>(result: Result<T, ChainError>) -> ValidationError {
    match result {
        Err(ChainError::Invalid(err)) => err,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

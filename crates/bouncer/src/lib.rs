//! # bouncer
//!
//! Chainable, fail-fast validation of the named inputs of a request.
//!
//! ## Quick Start
//!
//! ```
//! use bouncer::{Bouncer, ChainError, RawRequest};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), ChainError> {
//! let engine = Bouncer::<RawRequest>::new();
//! let request = RawRequest::new().with_body(json!({"username": "  alice ", "age": "30"}));
//! let mut session = engine.session(&request);
//!
//! session
//!     .validate_body("username")
//!     .required(Some("Username required"))?
//!     .is_string(None)?
//!     .trim()?
//!     .is_length(3, 15, Some("Username must be 3-15 characters"))?;
//!
//! session.validate_body("age").to_int(None)?.gte(18, None)?;
//!
//! assert_eq!(session.vals().get("username"), Some(&json!("alice")));
//! assert_eq!(session.vals().get("age"), Some(&json!(30)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Model
//!
//! - A [`Bouncer`] engine is built once per application and shared.
//! - Each request opens a [`Session`], which owns the [`ValueStore`] of
//!   validated values.
//! - [`Session::validate_body`] and friends hand out a [`Validator`] for one
//!   name; chain methods run in order and stop at the first [`ChainError`].
//! - `.optional()` turns every later step into a no-op while the value is
//!   absent.
//!
//! ## Custom Operations
//!
//! Implement [`ChainOperation`](foundation::ChainOperation), or write one
//! with the [`operation!`] macro, and either pass it to
//! [`Validator::run`] directly or register it on the engine and call it by
//! name through [`Validator::invoke`].

// ValidationError is the error payload of every chain step; boxing it would
// add an allocation to every failure for no practical benefit.
#![allow(clippy::result_large_err)]

pub mod engine;
pub mod foundation;
mod macros;
pub mod operations;
pub mod prelude;
pub mod session;
pub mod validator;
pub mod value;

pub use engine::{Accessor, Bouncer, BouncerBuilder, RawRequest, RequestValues, Source};
pub use foundation::{ChainError, ChainResult, ValidationError, ValidationResult, ValueStore};
pub use serde_json::Value;
pub use session::{Session, ValidatorId};
pub use validator::{UuidArgs, Validator};

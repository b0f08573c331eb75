//! Prelude module for convenient imports.
//!
//! Provides a single `use bouncer::prelude::*;` import that brings in the
//! engine, session and error types plus the traits needed to write custom
//! operations.
//!
//! # Examples
//!
//! ```
//! use bouncer::prelude::*;
//! use serde_json::json;
//!
//! let engine = Bouncer::<RawRequest>::new();
//! let request = RawRequest::new().with_query("page", json!("3"));
//! let mut session = engine.session(&request);
//! assert!(session.validate_query("page").to_int(None).is_ok());
//! ```

// ============================================================================
// ENGINE AND SESSION
// ============================================================================

pub use crate::engine::{Bouncer, BouncerBuilder, RawRequest, RequestValues, Source};
pub use crate::session::{Session, ValidatorId};
pub use crate::validator::{UuidArgs, Validator};

// ============================================================================
// FOUNDATION: Errors, store, operation traits
// ============================================================================

pub use crate::foundation::{
    ChainError, ChainOperation, ChainResult, MethodRegistry, Step, ValidationError,
    ValidationResult, ValueStore, from_fn,
};

// ============================================================================
// OPERATIONS
// ============================================================================

pub use crate::operations::UuidVersion;
pub use crate::operation;

//! Core chain types and traits
//!
//! This module contains the building blocks every validator chain runs on:
//!
//! - **Store**: [`ValueStore`], the per-session name → value map
//! - **Errors**: [`ValidationError`], [`ChainError`]
//! - **Operations**: [`ChainOperation`], [`Step`], [`from_fn`]
//! - **Registry**: [`MethodRegistry`] for named custom operations
//!
//! # Architecture
//!
//! ## 1. One value, many steps
//!
//! A validator never owns its value. Each step reads the current entry from
//! the session's [`ValueStore`] and conversions write back in place, so
//! `.trim()` followed by `.to_int()` parses the trimmed string.
//!
//! ## 2. Uniform skip rule
//!
//! Operations only describe the check or conversion. Whether an operation
//! runs at all (optional-skip mode) is decided once, in the validator's
//! dispatch path, for built-in and registered operations alike.
//!
//! ## 3. Fail fast
//!
//! The first failing step returns a [`ChainError`] and the rest of the chain
//! never runs.
//!
//! # Examples
//!
//! ```rust,ignore
//! session
//!     .validate_body("age")
//!     .required(None)?
//!     .to_int(None)?
//!     .gte(18, Some("You must be 18 or older"))?;
//! ```

pub mod error;
pub mod registry;
pub mod store;
pub mod traits;

pub use error::{ChainError, ValidationError};
pub use registry::{MethodRegistry, SharedOperation};
pub use store::ValueStore;
pub use traits::{ChainOperation, FnOperation, Step, from_fn};

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Result of a session-level assertion.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result of one chain step: the validator to continue with, or the error
/// that ended the chain.
pub type ChainResult<'v, V> = Result<&'v mut V, ChainError>;

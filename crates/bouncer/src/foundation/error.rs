//! Error types for chain failures
//!
//! [`ValidationError`] is the one user-facing failure kind: it names the
//! offending value and carries the message a host renders in a 4xx response.
//! [`ChainError`] wraps it together with the fault kinds that are *not*
//! user-facing (misused chains, unknown operations, callback faults) so a host
//! can catch the former and let the rest propagate as server errors.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation failure.
///
/// # Examples
///
/// ```
/// use bouncer::foundation::ValidationError;
///
/// let error = ValidationError::new("gte", "age must be at least 18")
///     .with_name("age")
///     .with_param("min", "18");
///
/// assert_eq!(error.name(), Some("age"));
/// assert_eq!(error.message(), "age must be at least 18");
/// assert_eq!(error.param("min"), Some("18"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "required", "gte", "is_email"
    pub code: Cow<'static, str>,

    /// Human-readable message, either the caller's tip or the operation's
    /// default text.
    pub message: Cow<'static, str>,

    /// The name of the value that failed.
    ///
    /// `None` for session-level assertions that are not tied to a name.
    pub name: Option<Cow<'static, str>>,

    /// Parameters of the failed operation, stored as ordered key-value pairs.
    ///
    /// Example: `[("min", "18"), ("actual", "17")]`
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            name: None,
            params: Vec::new(),
        }
    }

    /// Sets the name of the failing value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// The name of the failing value, if the failure is tied to one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Renders the error as a JSON object suitable for a response body.
    pub fn to_json(&self) -> serde_json::Value {
        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        serde_json::json!({
            "code": self.code,
            "name": self.name,
            "message": self.message,
            "params": params,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "[{}] {}: {}", name, self.code, self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error for `name`.
    pub fn required(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self::new("required", format!("{name} is required")).with_name(name)
    }

    /// Creates a generic "invalid" error for `name`.
    pub fn invalid(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self::new("invalid", format!("Invalid {name}")).with_name(name)
    }

    /// Creates a session-level assertion failure that is not tied to a name.
    pub fn assertion(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("assertion", message)
    }
}

// ============================================================================
// CHAIN ERROR
// ============================================================================

/// Everything that can stop a chain.
///
/// Only [`ChainError::Invalid`] is a validation failure. The other variants are
/// programming or environment faults and must not be rendered as user errors.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// The value failed a check or conversion.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The chain was applied to a value of a shape the operation cannot work
    /// with, e.g. `gt` on a string or `trim` on an array.
    #[error("`{operation}` on `{name}`: {detail}")]
    Precondition {
        operation: Cow<'static, str>,
        name: String,
        detail: String,
    },

    /// `invoke` was called with a name no operation was registered under.
    #[error("no chain operation registered as `{0}`")]
    UnknownOperation(String),

    /// A fault raised by a user-supplied callback.
    #[error(transparent)]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}

impl ChainError {
    /// Wraps an arbitrary callback fault.
    pub fn callback(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Callback(err.into())
    }

    /// Returns the validation failure, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true for user-facing validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Converts into the validation failure, handing other kinds back.
    pub fn into_validation(self) -> Result<ValidationError, Self> {
        match self {
            Self::Invalid(err) => Ok(err),
            other => Err(other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

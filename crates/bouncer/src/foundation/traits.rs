//! Core traits for chain operations
//!
//! Every chainable operation, built-in or user-defined, implements
//! [`ChainOperation`]. Operations never decide whether they run: the
//! validator's dispatch path checks optional-skip mode first and only then
//! hands the operation a [`Step`], which is the operation's whole view of the
//! world (the governed value, the session, the caller's tip and arguments).

use std::borrow::Cow;

use serde_json::Value;

use crate::foundation::{ChainError, ValidationError};
use crate::session::{Session, ValidatorId};

// ============================================================================
// CHAIN OPERATION TRAIT
// ============================================================================

/// A single check or conversion in a validator chain.
///
/// `apply` either succeeds (the chain continues) or returns the error that
/// aborts the chain. Conversions write their result through [`Step::set`];
/// the postcondition of a successful conversion is that the session's store
/// holds the converted value under the validator's name.
///
/// # Examples
///
/// ```
/// use bouncer::foundation::{ChainError, ChainOperation, Step};
///
/// struct IsEven;
///
/// impl<C> ChainOperation<C> for IsEven {
///     fn name(&self) -> &str {
///         "is_even"
///     }
///
///     fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
///         match step.value().and_then(serde_json::Value::as_i64) {
///             Some(n) if n % 2 == 0 => Ok(()),
///             _ => Err(step.fail("is_even", format!("{} must be even", step.name()))),
///         }
///     }
/// }
/// ```
pub trait ChainOperation<C> {
    /// Name used in logs and precondition faults.
    fn name(&self) -> &str;

    /// Runs the operation against the current value.
    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError>;
}

impl<C, O> ChainOperation<C> for &O
where
    O: ChainOperation<C> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        (**self).apply(step)
    }
}

// ============================================================================
// STEP
// ============================================================================

/// The view an operation gets of the validator it runs on.
pub struct Step<'a, 'e, C> {
    session: &'a mut Session<'e, C>,
    id: ValidatorId,
    operation: &'a str,
    tip: Option<&'a str>,
    args: &'a [Value],
}

impl<'a, 'e, C> Step<'a, 'e, C> {
    pub(crate) fn new(
        session: &'a mut Session<'e, C>,
        id: ValidatorId,
        operation: &'a str,
        tip: Option<&'a str>,
        args: &'a [Value],
    ) -> Self {
        Self {
            session,
            id,
            operation,
            tip,
            args,
        }
    }

    /// Name of the governed value.
    pub fn name(&self) -> &str {
        self.session.name_of(self.id)
    }

    /// Current value, `None` when absent.
    pub fn value(&self) -> Option<&Value> {
        self.session.value_of(self.id)
    }

    /// Returns true if the value is present.
    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }

    /// Overwrites the value in the session's store.
    pub fn set(&mut self, value: Value) {
        self.session.set_value(self.id, value);
    }

    /// The session, for callbacks that read context or other values.
    pub fn session(&self) -> &Session<'e, C> {
        &*self.session
    }

    /// Caller-supplied message override.
    pub fn tip(&self) -> Option<&str> {
        self.tip
    }

    /// Positional arguments passed through [`Validator::invoke`].
    ///
    /// Built-in operations carry their arguments as fields and see an empty
    /// slice here.
    ///
    /// [`Validator::invoke`]: crate::Validator::invoke
    pub fn args(&self) -> &[Value] {
        self.args
    }

    /// Builds the validation failure for this step.
    ///
    /// The tip wins over `default_message` when the caller supplied one.
    pub fn fail(
        &self,
        code: &'static str,
        default_message: impl Into<Cow<'static, str>>,
    ) -> ChainError {
        let message: Cow<'static, str> = match self.tip {
            Some(tip) => Cow::Owned(tip.to_owned()),
            None => default_message.into(),
        };
        ValidationError::new(code, message)
            .with_name(self.name().to_owned())
            .into()
    }

    /// Builds a precondition fault: the chain was applied to a value of a
    /// shape this operation cannot work with.
    pub fn precondition(&self, detail: impl Into<String>) -> ChainError {
        ChainError::Precondition {
            operation: Cow::Owned(self.operation.to_owned()),
            name: self.name().to_owned(),
            detail: detail.into(),
        }
    }

    /// Returns the value as a string, failing the step with the string type
    /// error otherwise.
    pub fn require_string(&self) -> Result<&str, ChainError> {
        match self.value() {
            Some(Value::String(s)) => Ok(s),
            _ => Err(self.fail("is_string", format!("{} must be a string", self.name()))),
        }
    }
}

// ============================================================================
// CLOSURE OPERATIONS
// ============================================================================

/// A [`ChainOperation`] built from a closure.
#[derive(Clone)]
pub struct FnOperation<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> FnOperation<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> std::fmt::Debug for FnOperation<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOperation").field("name", &self.name).finish()
    }
}

impl<C, F> ChainOperation<C> for FnOperation<F>
where
    F: Fn(&mut Step<'_, '_, C>) -> Result<(), ChainError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        (self.f)(step)
    }
}

/// Creates an operation from a closure.
///
/// ```
/// use bouncer::foundation::from_fn;
///
/// let positive = from_fn::<(), _>("positive", |step| {
///     if step.value().and_then(serde_json::Value::as_f64).is_some_and(|n| n > 0.0) {
///         Ok(())
///     } else {
///         Err(step.fail("positive", "must be positive"))
///     }
/// });
/// # let _: &dyn bouncer::foundation::ChainOperation<()> = &positive;
/// ```
pub fn from_fn<C, F>(name: impl Into<Cow<'static, str>>, f: F) -> FnOperation<F>
where
    F: Fn(&mut Step<'_, '_, C>) -> Result<(), ChainError>,
{
    FnOperation::new(name, f)
}

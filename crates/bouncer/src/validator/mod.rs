//! Per-name validator state machine
//!
//! A [`Validator`] is a handle onto one arena entry of a [`Session`]: the
//! name it governs and its optional flag. All operations go through
//! [`Validator::run`], which is where optional-skip mode is decided:
//!
//! - `.optional()` arms skip mode only when the value is absent right now;
//! - every later step re-checks: once the value is present the flag is
//!   cleared for good and the step runs, otherwise the step is a no-op.

mod chain;

pub use chain::UuidArgs;

use serde_json::Value;

use crate::foundation::{ChainError, ChainOperation, ChainResult, Step};
use crate::session::{Session, ValidatorId};

/// Chainable checks and conversions over one named value of a session.
pub struct Validator<'s, 'e, C> {
    session: &'s mut Session<'e, C>,
    id: ValidatorId,
}

impl<'s, 'e, C> Validator<'s, 'e, C> {
    pub(crate) fn new(session: &'s mut Session<'e, C>, id: ValidatorId) -> Self {
        Self { session, id }
    }

    /// Stable handle of this validator's arena entry.
    pub fn id(&self) -> ValidatorId {
        self.id
    }

    /// Name of the governed value.
    pub fn name(&self) -> &str {
        self.session.name_of(self.id)
    }

    /// Current value, `None` when absent.
    pub fn value(&self) -> Option<&Value> {
        self.session.value_of(self.id)
    }

    /// Replaces the current value outside of any chain step.
    pub fn set(&mut self, value: Value) -> &mut Self {
        self.session.set_value(self.id, value);
        self
    }

    /// The session this validator belongs to.
    pub fn session(&self) -> &Session<'e, C> {
        &*self.session
    }

    /// Returns true while optional-skip mode is armed.
    ///
    /// Observing a present value disarms it permanently.
    pub fn is_optional(&mut self) -> bool {
        let present = self.session.value_of(self.id).is_some();
        let state = self.session.state_mut(self.id);
        if state.optional && present {
            state.optional = false;
        }
        state.optional
    }

    /// Arms optional-skip mode if the value is absent. Never fails.
    pub fn optional(&mut self) -> &mut Self {
        if self.value().is_none() {
            self.session.state_mut(self.id).optional = true;
        }
        self
    }

    /// Runs `operation` unless optional-skip mode applies.
    ///
    /// This is the single dispatch path of every chain step, built-in or
    /// custom.
    pub fn run<O>(&mut self, operation: &O, tip: Option<&str>) -> ChainResult<'_, Self>
    where
        O: ChainOperation<C> + ?Sized,
    {
        self.dispatch(operation, &[], tip)
    }

    /// Runs the operation registered on the engine as `operation`.
    ///
    /// Fails with [`ChainError::UnknownOperation`] if nothing is registered
    /// under that name, even when optional-skip mode would skip the step.
    pub fn invoke(
        &mut self,
        operation: &str,
        args: &[Value],
        tip: Option<&str>,
    ) -> ChainResult<'_, Self> {
        let engine = self.session.engine();
        let Some(registered) = engine.registry().get(operation) else {
            return Err(ChainError::UnknownOperation(operation.to_owned()));
        };
        self.dispatch(registered.as_ref(), args, tip)
    }

    fn dispatch<O>(
        &mut self,
        operation: &O,
        args: &[Value],
        tip: Option<&str>,
    ) -> ChainResult<'_, Self>
    where
        O: ChainOperation<C> + ?Sized,
    {
        if self.is_optional() {
            tracing::trace!(
                name = self.name(),
                operation = operation.name(),
                "skipped, optional value is absent"
            );
            return Ok(self);
        }

        let mut step = Step::new(self.session, self.id, operation.name(), tip, args);
        if let Err(err) = operation.apply(&mut step) {
            match &err {
                ChainError::Invalid(failure) => tracing::debug!(
                    name = self.name(),
                    operation = operation.name(),
                    code = %failure.code,
                    "validation failed"
                ),
                other => tracing::debug!(
                    name = self.name(),
                    operation = operation.name(),
                    error = %other,
                    "chain aborted"
                ),
            }
            return Err(err);
        }
        Ok(self)
    }
}

impl<C> std::fmt::Debug for Validator<'_, '_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.session.state(self.id);
        f.debug_struct("Validator")
            .field("id", &self.id)
            .field("name", &state.name)
            .field("optional", &state.optional)
            .field("value", &self.value())
            .finish()
    }
}

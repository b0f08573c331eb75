//! Caller-supplied checks and transforms
//!
//! Callbacks receive the session explicitly so they can read the host context
//! or other values without capturing anything.

use serde_json::Value;

use crate::foundation::{ChainError, ChainOperation, Step};
use crate::session::Session;

// ============================================================================
// PRECOMPUTED CHECKS
// ============================================================================

crate::operation! {
    /// Fails when a result the caller already computed is false.
    pub Check { passed: bool } as "check";
    rule(self, value) { self.passed }
    message(self, name) { format!("Invalid {name}") }
}

crate::operation! {
    /// Fails when a result the caller already computed is true.
    pub CheckNot { failed: bool } as "check_not";
    rule(self, value) { !self.failed }
    message(self, name) { format!("Invalid {name}") }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// Runs a predicate over the current value.
pub struct CheckPred<F> {
    predicate: F,
    negate: bool,
}

impl<F> CheckPred<F> {
    /// Fails when `predicate` returns false.
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            negate: false,
        }
    }

    /// Fails when `predicate` returns true.
    pub fn not(predicate: F) -> Self {
        Self {
            predicate,
            negate: true,
        }
    }

    const fn code(&self) -> &'static str {
        if self.negate { "check_not_pred" } else { "check_pred" }
    }
}

impl<C, F> ChainOperation<C> for CheckPred<F>
where
    F: Fn(&Session<'_, C>, Option<&Value>) -> bool,
{
    fn name(&self) -> &str {
        self.code()
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let holds = (self.predicate)(step.session(), step.value());
        if holds == self.negate {
            Err(step.fail(self.code(), format!("Invalid {}", step.name())))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// TAP
// ============================================================================

/// Replaces the value with whatever a transform returns.
///
/// A validation failure raised inside the transform is reported as a `tap`
/// failure of this validator: the inner message is dropped and the tip (or
/// `"Invalid {name}"`) is used instead. Any other error aborts the chain
/// unchanged.
pub struct Tap<F> {
    transform: F,
}

impl<F> Tap<F> {
    pub fn new(transform: F) -> Self {
        Self { transform }
    }
}

impl<C, F> ChainOperation<C> for Tap<F>
where
    F: Fn(&Session<'_, C>, Option<Value>) -> Result<Value, ChainError>,
{
    fn name(&self) -> &str {
        "tap"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let current = step.value().cloned();
        match (self.transform)(step.session(), current) {
            Ok(next) => {
                step.set(next);
                Ok(())
            }
            Err(ChainError::Invalid(inner)) => {
                tracing::trace!(
                    name = step.name(),
                    inner = %inner,
                    "tap transform rejected the value"
                );
                Err(step.fail("tap", format!("Invalid {}", step.name())))
            }
            Err(other) => Err(other),
        }
    }
}

//! Presence operations
//!
//! Checks and defaults that care only about whether a value is there.

use serde_json::Value;

use crate::foundation::{ChainError, ChainOperation, Step};
use crate::session::Session;
use crate::value::length_of;

// ============================================================================
// REQUIRED
// ============================================================================

crate::operation! {
    /// Fails when the value is absent. `null` counts as present.
    pub Required as "required";
    rule(value) { value.is_some() }
    message(name) { format!("{name} is required") }
}

// ============================================================================
// NOT EMPTY
// ============================================================================

crate::operation! {
    /// Fails when a string or array value has no elements.
    ///
    /// Values without a length (numbers, objects, absent) fail too.
    pub IsNotEmpty as "is_not_empty";
    rule(value) { value.and_then(length_of).is_some_and(|len| len > 0) }
    message(name) { format!("{name} must not be empty") }
}

// ============================================================================
// DEFAULTS
// ============================================================================

/// Sets a fixed value when the current one is absent. Never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTo {
    pub value: Value,
}

impl DefaultTo {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl<C> ChainOperation<C> for DefaultTo {
    fn name(&self) -> &str {
        "default_to"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        if !step.is_present() {
            step.set(self.value.clone());
        }
        Ok(())
    }
}

/// Sets a value produced from the session when the current one is absent.
/// The producer only runs when needed. Never fails.
pub struct DefaultWith<F> {
    produce: F,
}

impl<F> DefaultWith<F> {
    pub fn new(produce: F) -> Self {
        Self { produce }
    }
}

impl<C, F> ChainOperation<C> for DefaultWith<F>
where
    F: Fn(&Session<'_, C>) -> Value,
{
    fn name(&self) -> &str {
        "default_with"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        if !step.is_present() {
            let value = (self.produce)(step.session());
            step.set(value);
        }
        Ok(())
    }
}

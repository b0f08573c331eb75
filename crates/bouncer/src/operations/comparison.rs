//! Comparison operations
//!
//! Membership, equality, ordering and length bounds. Ordering checks work on
//! numbers only: running them on anything else is a precondition fault, not
//! a validation failure.

use serde_json::Value;

use crate::foundation::{ChainError, ChainOperation, Step};
use crate::value::{as_f64, describe, display_operand, length_of, values_equal};

// ============================================================================
// MEMBERSHIP AND EQUALITY
// ============================================================================

crate::operation! {
    /// Fails unless the value equals one member of the set.
    pub IsIn { set: Vec<Value> } as "is_in";
    rule(self, value) { value.is_some_and(|v| self.set.iter().any(|m| values_equal(v, m))) }
    message(self, name) { format!("Invalid {name}") }
}

crate::operation! {
    /// Fails if the value equals any member of the set. An absent value
    /// passes.
    pub IsNotIn { set: Vec<Value> } as "is_not_in";
    rule(self, value) { !value.is_some_and(|v| self.set.iter().any(|m| values_equal(v, m))) }
    message(self, name) { format!("Invalid {name}") }
}

crate::operation! {
    /// Fails unless the value is strictly equal to `expected`. Numbers
    /// compare by value, so `17` equals `17.0`.
    pub Equals { expected: Value } as "eq";
    rule(self, value) { value.is_some_and(|v| values_equal(v, &self.expected)) }
    message(self, name) { format!("{name} must equal {}", display_operand(&self.expected)) }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Which side of the operand the value has to fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ordering {
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl Ordering {
    /// Operation name and error code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Greater => "gt",
            Self::GreaterOrEqual => "gte",
            Self::Less => "lt",
            Self::LessOrEqual => "lte",
        }
    }

    const fn phrase(self) -> &'static str {
        match self {
            Self::Greater => "greater than",
            Self::GreaterOrEqual => "greater than or equal to",
            Self::Less => "less than",
            Self::LessOrEqual => "less than or equal to",
        }
    }

    fn holds(self, value: f64, operand: f64) -> bool {
        match self {
            Self::Greater => value > operand,
            Self::GreaterOrEqual => value >= operand,
            Self::Less => value < operand,
            Self::LessOrEqual => value <= operand,
        }
    }
}

/// Numeric comparison against a fixed operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub ordering: Ordering,
    pub operand: Value,
}

impl Compare {
    #[must_use]
    pub fn new(ordering: Ordering, operand: Value) -> Self {
        Self { ordering, operand }
    }
}

impl<C> ChainOperation<C> for Compare {
    fn name(&self) -> &str {
        self.ordering.code()
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let Some(operand) = as_f64(&self.operand) else {
            return Err(step.precondition(format!(
                "operand must be a number, got {}",
                describe(Some(&self.operand))
            )));
        };
        let Some(current) = step.value().and_then(as_f64) else {
            return Err(step.precondition(format!(
                "expected a number, found {}",
                describe(step.value())
            )));
        };

        if self.ordering.holds(current, operand) {
            Ok(())
        } else {
            let message = format!(
                "{} must be {} {}",
                step.name(),
                self.ordering.phrase(),
                display_operand(&self.operand)
            );
            Err(step.fail(self.ordering.code(), message))
        }
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Fails unless a string's character count or an array's item count lies in
/// `min..=max`. Any other value fails; `min > max` is a precondition fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsLength {
    pub min: usize,
    pub max: usize,
}

impl IsLength {
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

impl<C> ChainOperation<C> for IsLength {
    fn name(&self) -> &str {
        "is_length"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        if self.min > self.max {
            return Err(step.precondition(format!(
                "min ({}) is greater than max ({})",
                self.min, self.max
            )));
        }
        let Some(len) = step.value().and_then(length_of) else {
            let message = format!("{} must be a string or an array", step.name());
            return Err(step.fail("is_length", message));
        };

        if (self.min..=self.max).contains(&len) {
            return Ok(());
        }
        let unit = if matches!(step.value(), Some(Value::Array(_))) {
            "items"
        } else {
            "characters"
        };
        let message = format!(
            "{} must have between {} and {} {unit}",
            step.name(),
            self.min,
            self.max
        );
        Err(step.fail("is_length", message))
    }
}

// ============================================================================
// CLAMP
// ============================================================================

/// Pulls a number into `[min, max]`. Never fails on numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamp {
    pub min: Value,
    pub max: Value,
}

impl Clamp {
    #[must_use]
    pub fn new(min: Value, max: Value) -> Self {
        Self { min, max }
    }
}

impl<C> ChainOperation<C> for Clamp {
    fn name(&self) -> &str {
        "clamp"
    }

    fn apply(&self, step: &mut Step<'_, '_, C>) -> Result<(), ChainError> {
        let (Some(min), Some(max)) = (as_f64(&self.min), as_f64(&self.max)) else {
            return Err(step.precondition("bounds must be numbers"));
        };
        if min > max {
            return Err(step.precondition(format!("min ({min}) is greater than max ({max})")));
        }
        let Some(current) = step.value().and_then(as_f64) else {
            return Err(step.precondition(format!(
                "expected a number, found {}",
                describe(step.value())
            )));
        };

        if current < min {
            step.set(self.min.clone());
        } else if current > max {
            step.set(self.max.clone());
        }
        Ok(())
    }
}

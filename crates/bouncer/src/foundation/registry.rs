//! Named custom operations
//!
//! Registering an operation makes it callable by name on every validator of
//! every session of an engine via [`Validator::invoke`]. The registry only
//! stores operations; the optional-skip guard is applied by the validator's
//! dispatch path, so a registered operation cannot bypass it.
//!
//! [`Validator::invoke`]: crate::Validator::invoke

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::ChainOperation;

/// Shared handle to a registered operation.
pub type SharedOperation<C> = Arc<dyn ChainOperation<C> + Send + Sync>;

/// Name → operation table, immutable once the engine is built.
pub struct MethodRegistry<C> {
    operations: HashMap<String, SharedOperation<C>>,
}

impl<C> MethodRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Registers `operation` under `name`, replacing any earlier entry.
    ///
    /// Returns the replaced operation.
    pub fn register<O>(
        &mut self,
        name: impl Into<String>,
        operation: O,
    ) -> Option<SharedOperation<C>>
    where
        O: ChainOperation<C> + Send + Sync + 'static,
    {
        let name = name.into();
        let replaced = self.operations.insert(name.clone(), Arc::new(operation));
        if replaced.is_some() {
            tracing::warn!(operation = %name, "chain operation re-registered, previous one replaced");
        }
        replaced
    }

    /// Looks up an operation by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SharedOperation<C>> {
        self.operations.get(name)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<C> Default for MethodRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for MethodRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("MethodRegistry")
            .field("operations", &names)
            .finish()
    }
}

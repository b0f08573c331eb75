//! Per-request validation session
//!
//! A [`Session`] owns the [`ValueStore`] for one unit of work and an arena of
//! validator state. Looking a name up twice yields a validator over the same
//! arena entry, so everything a chain did to the value and to its optional
//! flag is still there on the second lookup.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::engine::{Bouncer, Source};
use crate::foundation::{ValidationError, ValidationResult, ValueStore};
use crate::validator::Validator;

/// Stable handle to a validator's arena entry within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatorId(usize);

impl ValidatorId {
    /// Position of the entry in the session arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct ValidatorState {
    pub(crate) name: String,
    pub(crate) source: Source,
    pub(crate) optional: bool,
}

/// One validation pass over the named inputs of a host context.
pub struct Session<'e, C> {
    engine: &'e Bouncer<C>,
    ctx: &'e C,
    vals: ValueStore,
    arena: Vec<ValidatorState>,
    index: HashMap<String, ValidatorId>,
}

impl<'e, C> Session<'e, C> {
    pub(crate) fn new(engine: &'e Bouncer<C>, ctx: &'e C) -> Self {
        Self {
            engine,
            ctx,
            vals: ValueStore::new(),
            arena: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The host context this session validates.
    pub fn ctx(&self) -> &'e C {
        self.ctx
    }

    /// The engine this session was opened on.
    pub fn engine(&self) -> &'e Bouncer<C> {
        self.engine
    }

    /// Current values, readable by handler code once validation is done.
    pub fn vals(&self) -> &ValueStore {
        &self.vals
    }

    /// Mutable access to the values, e.g. to pre-seed a value that a later
    /// lookup should start from instead of the raw source.
    pub fn vals_mut(&mut self) -> &mut ValueStore {
        &mut self.vals
    }

    /// Ends the session, handing the validated values to the caller.
    pub fn into_vals(self) -> ValueStore {
        self.vals
    }

    // ------------------------------------------------------------------------
    // Validator lookup
    // ------------------------------------------------------------------------

    /// Validator for the path parameter `name`.
    pub fn validate_param(&mut self, name: &str) -> Validator<'_, 'e, C> {
        self.validator_for(Source::Params, name)
    }

    /// Validator for the query parameter `name`.
    pub fn validate_query(&mut self, name: &str) -> Validator<'_, 'e, C> {
        self.validator_for(Source::Query, name)
    }

    /// Validator for the body field `name`.
    pub fn validate_body(&mut self, name: &str) -> Validator<'_, 'e, C> {
        self.validator_for(Source::Body, name)
    }

    /// Returns the validator for `name`, creating it on first request.
    ///
    /// Validators are cached by name only. A later request for the same name
    /// through a different source returns the validator seeded from the first
    /// source; the mismatch is logged at `warn`.
    pub fn validator_for(&mut self, source: Source, name: &str) -> Validator<'_, 'e, C> {
        let id = match self.index.get(name) {
            Some(&id) => {
                let first = self.arena[id.0].source;
                if first != source {
                    tracing::warn!(
                        name,
                        requested = %source,
                        seeded_from = %first,
                        "validator reused across sources; keeping the first source's value"
                    );
                }
                id
            }
            None => self.seed(source, name),
        };
        Validator::new(self, id)
    }

    /// Source the validator for `name` was seeded from, if it exists.
    pub fn source_of(&self, name: &str) -> Option<Source> {
        self.index.get(name).map(|id| self.arena[id.0].source)
    }

    /// Id of the validator for `name`, if it exists.
    pub fn validator_id(&self, name: &str) -> Option<ValidatorId> {
        self.index.get(name).copied()
    }

    /// Number of validators created in this session.
    pub fn validator_count(&self) -> usize {
        self.arena.len()
    }

    fn seed(&mut self, source: Source, name: &str) -> ValidatorId {
        if !self.vals.contains(name) {
            if let Some(raw) = self.engine.raw(self.ctx, source, name) {
                self.vals.set(name, raw.clone());
            }
        }
        tracing::trace!(
            name,
            source = %source,
            present = self.vals.contains(name),
            "validator created"
        );

        let id = ValidatorId(self.arena.len());
        self.arena.push(ValidatorState {
            name: name.to_owned(),
            source,
            optional: false,
        });
        self.index.insert(name.to_owned(), id);
        id
    }

    // ------------------------------------------------------------------------
    // Session-level assertions
    // ------------------------------------------------------------------------

    /// Fails with an unnamed [`ValidationError`] carrying `tip` when `result`
    /// is false.
    ///
    /// ```
    /// # use bouncer::{Bouncer, RawRequest};
    /// # let engine = Bouncer::<RawRequest>::new();
    /// # let request = RawRequest::new();
    /// let session = engine.session(&request);
    /// let err = session.check(1 + 1 == 3, "math is broken").unwrap_err();
    /// assert_eq!(err.name(), None);
    /// assert_eq!(err.message(), "math is broken");
    /// ```
    #[doc(alias = "assert")]
    #[doc(alias = "validate")]
    pub fn check(&self, result: bool, tip: impl Into<String>) -> ValidationResult<()> {
        if result {
            Ok(())
        } else {
            Err(self.assertion_failed(tip.into()))
        }
    }

    /// Fails with an unnamed [`ValidationError`] carrying `tip` when `result`
    /// is true.
    #[doc(alias = "assert_not")]
    #[doc(alias = "validate_not")]
    pub fn check_not(&self, result: bool, tip: impl Into<String>) -> ValidationResult<()> {
        self.check(!result, tip)
    }

    fn assertion_failed(&self, tip: String) -> ValidationError {
        tracing::debug!(message = %tip, "session assertion failed");
        ValidationError::assertion(tip)
    }

    // ------------------------------------------------------------------------
    // Arena access for validators and steps
    // ------------------------------------------------------------------------

    pub(crate) fn name_of(&self, id: ValidatorId) -> &str {
        &self.arena[id.0].name
    }

    pub(crate) fn value_of(&self, id: ValidatorId) -> Option<&Value> {
        self.vals.get(&self.arena[id.0].name)
    }

    pub(crate) fn set_value(&mut self, id: ValidatorId, value: Value) {
        let Self { vals, arena, .. } = self;
        vals.overwrite(&arena[id.0].name, value);
    }

    pub(crate) fn state(&self, id: ValidatorId) -> &ValidatorState {
        &self.arena[id.0]
    }

    pub(crate) fn state_mut(&mut self, id: ValidatorId) -> &mut ValidatorState {
        &mut self.arena[id.0]
    }
}

impl<C> fmt::Debug for Session<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("vals", &self.vals)
            .field("validators", &self.arena)
            .finish_non_exhaustive()
    }
}

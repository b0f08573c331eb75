//! Engine configuration
//!
//! A [`Bouncer`] holds what every session of an application shares: the three
//! accessors that pull raw values out of a host context and the registry of
//! custom operations. It is immutable once built and `Send + Sync`, so one
//! engine serves every concurrent request; each request opens its own
//! [`Session`].

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::foundation::{ChainOperation, MethodRegistry};
use crate::session::Session;

// ============================================================================
// SOURCES
// ============================================================================

/// Where a validator's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Path parameters (`/users/:id`).
    Params,
    /// Query-string parameters.
    Query,
    /// Request body fields.
    Body,
}

impl Source {
    /// Lower-case label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a host context to one of its name → raw value maps.
pub type Accessor<C> = Arc<dyn Fn(&C) -> Option<&Map<String, Value>> + Send + Sync>;

/// Conventional accessors for host contexts that expose path, query and body
/// values.
pub trait RequestValues {
    /// Path parameters.
    fn params(&self) -> Option<&Map<String, Value>>;

    /// Query-string parameters.
    fn query(&self) -> Option<&Map<String, Value>>;

    /// Body fields. `None` when the body is missing or not an object.
    fn body(&self) -> Option<&Map<String, Value>>;
}

/// A minimal host context: the three raw value maps of one request.
///
/// # Examples
///
/// ```
/// use bouncer::RawRequest;
/// use serde_json::json;
///
/// let request = RawRequest::new()
///     .with_param("id", json!("42"))
///     .with_query("page", json!("2"))
///     .with_body(json!({"name": "alice"}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRequest {
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
}

impl RawRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, name: impl Into<String>, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_query(mut self, name: impl Into<String>, value: Value) -> Self {
        self.query.insert(name.into(), value);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl RequestValues for RawRequest {
    fn params(&self) -> Option<&Map<String, Value>> {
        Some(&self.params)
    }

    fn query(&self) -> Option<&Map<String, Value>> {
        Some(&self.query)
    }

    fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref().and_then(Value::as_object)
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Shared validation engine.
///
/// # Examples
///
/// ```
/// use bouncer::{Bouncer, RawRequest};
/// use serde_json::json;
///
/// let engine = Bouncer::<RawRequest>::new();
/// let request = RawRequest::new().with_body(json!({"age": "21"}));
///
/// let mut session = engine.session(&request);
/// session.validate_body("age").required(None)?.to_int(None)?.gte(18, None)?;
/// assert_eq!(session.vals().get("age"), Some(&json!(21)));
/// # Ok::<(), bouncer::ChainError>(())
/// ```
pub struct Bouncer<C> {
    params: Accessor<C>,
    query: Accessor<C>,
    body: Accessor<C>,
    registry: MethodRegistry<C>,
}

impl<C: RequestValues + 'static> Bouncer<C> {
    /// Creates an engine with the conventional accessors and no custom
    /// operations.
    #[must_use]
    pub fn new() -> Self {
        BouncerBuilder::new().build()
    }

    /// Starts a builder pre-filled with the conventional accessors.
    #[must_use]
    pub fn builder() -> BouncerBuilder<C> {
        BouncerBuilder::new()
    }
}

impl<C: RequestValues + 'static> Default for Bouncer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Bouncer<C> {
    /// Opens a validation session over one host context.
    pub fn session<'e>(&'e self, ctx: &'e C) -> Session<'e, C> {
        Session::new(self, ctx)
    }

    /// The custom operations available to [`Validator::invoke`].
    ///
    /// [`Validator::invoke`]: crate::Validator::invoke
    pub fn registry(&self) -> &MethodRegistry<C> {
        &self.registry
    }

    /// Reads the raw value for `name` from `source`.
    pub(crate) fn raw<'c>(&self, ctx: &'c C, source: Source, name: &str) -> Option<&'c Value> {
        let accessor = match source {
            Source::Params => &self.params,
            Source::Query => &self.query,
            Source::Body => &self.body,
        };
        (**accessor)(ctx).and_then(|values| values.get(name))
    }
}

impl<C> fmt::Debug for Bouncer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bouncer")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Bouncer`].
///
/// # Examples
///
/// ```
/// use bouncer::{Bouncer, BouncerBuilder};
/// use bouncer::foundation::from_fn;
/// use serde_json::{Map, Value};
///
/// struct Ctx {
///     form: Map<String, Value>,
/// }
///
/// let engine: Bouncer<Ctx> = BouncerBuilder::bare()
///     .body(|ctx: &Ctx| Some(&ctx.form))
///     .operation("non_blank", from_fn::<Ctx, _>("non_blank", |step| {
///         match step.value().and_then(Value::as_str) {
///             Some(s) if !s.trim().is_empty() => Ok(()),
///             _ => Err(step.fail("non_blank", "must not be blank")),
///         }
///     }))
///     .build();
///
/// assert!(engine.registry().contains("non_blank"));
/// ```
pub struct BouncerBuilder<C> {
    params: Accessor<C>,
    query: Accessor<C>,
    body: Accessor<C>,
    registry: MethodRegistry<C>,
}

impl<C: RequestValues + 'static> BouncerBuilder<C> {
    /// Creates a builder with the conventional accessors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Arc::new(conventional_params::<C>),
            query: Arc::new(conventional_query::<C>),
            body: Arc::new(conventional_body::<C>),
            registry: MethodRegistry::new(),
        }
    }
}

impl<C: RequestValues + 'static> Default for BouncerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> BouncerBuilder<C> {
    /// Creates a builder for any host context. Every source yields nothing
    /// until an accessor is configured.
    #[must_use]
    pub fn bare() -> Self {
        Self {
            params: Arc::new(no_values::<C>),
            query: Arc::new(no_values::<C>),
            body: Arc::new(no_values::<C>),
            registry: MethodRegistry::new(),
        }
    }

    /// Sets the path-parameter accessor.
    #[must_use = "builder methods must be chained or built"]
    pub fn params<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&C) -> Option<&Map<String, Value>> + Send + Sync + 'static,
    {
        self.params = Arc::new(accessor);
        self
    }

    /// Sets the query-parameter accessor.
    #[must_use = "builder methods must be chained or built"]
    pub fn query<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&C) -> Option<&Map<String, Value>> + Send + Sync + 'static,
    {
        self.query = Arc::new(accessor);
        self
    }

    /// Sets the body accessor.
    #[must_use = "builder methods must be chained or built"]
    pub fn body<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&C) -> Option<&Map<String, Value>> + Send + Sync + 'static,
    {
        self.body = Arc::new(accessor);
        self
    }

    /// Registers a custom operation under `name`.
    #[must_use = "builder methods must be chained or built"]
    pub fn operation<O>(mut self, name: impl Into<String>, operation: O) -> Self
    where
        O: ChainOperation<C> + Send + Sync + 'static,
    {
        self.registry.register(name, operation);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Bouncer<C> {
        tracing::debug!(
            operations = self.registry.len(),
            "validation engine configured"
        );
        Bouncer {
            params: self.params,
            query: self.query,
            body: self.body,
            registry: self.registry,
        }
    }
}

fn conventional_params<C: RequestValues>(ctx: &C) -> Option<&Map<String, Value>> {
    ctx.params()
}

fn conventional_query<C: RequestValues>(ctx: &C) -> Option<&Map<String, Value>> {
    ctx.query()
}

fn conventional_body<C: RequestValues>(ctx: &C) -> Option<&Map<String, Value>> {
    ctx.body()
}

fn no_values<C>(_: &C) -> Option<&Map<String, Value>> {
    None
}

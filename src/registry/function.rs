//! Key functions - callables that compute a key's URL.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{BoxError, ResolveContext};

pub type ContextFreeFn = dyn Fn() -> Result<String, BoxError> + Send + Sync;
pub type ContextAwareFn = dyn Fn(Option<&ResolveContext>) -> Result<String, BoxError> + Send + Sync;

/// A registered resolver function.
///
/// The shape is fixed at registration time; the engine never probes arity.
#[derive(Clone)]
pub enum KeyFunction {
    ContextFree(Arc<ContextFreeFn>),
    ContextAware(Arc<ContextAwareFn>),
}

impl KeyFunction {
    pub fn context_free<F>(f: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self::ContextFree(Arc::new(f))
    }

    pub fn context_aware<F>(f: F) -> Self
    where
        F: Fn(Option<&ResolveContext>) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self::ContextAware(Arc::new(f))
    }

    /// Invoke with the shape this function was registered with.
    pub fn call(&self, context: Option<&ResolveContext>) -> Result<String, BoxError> {
        match self {
            Self::ContextFree(f) => f(),
            Self::ContextAware(f) => f(context),
        }
    }

    pub const fn is_context_aware(&self) -> bool {
        matches!(self, Self::ContextAware(_))
    }
}

impl fmt::Debug for KeyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextFree(_) => f.write_str("KeyFunction::ContextFree"),
            Self::ContextAware(_) => f.write_str("KeyFunction::ContextAware"),
        }
    }
}

// ============================================================================
// FunctionMap
// ============================================================================

/// Key -> function bindings.
#[derive(Debug, Clone, Default)]
pub struct FunctionMap {
    functions: BTreeMap<String, KeyFunction>,
}

impl FunctionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, function: KeyFunction) {
        self.functions.insert(key.into(), function);
    }

    /// Bind a function that ignores the request context.
    pub fn bind_context_free<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.insert(key, KeyFunction::context_free(f));
        self
    }

    /// Bind a function that receives the request context.
    pub fn bind_context_aware<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(Option<&ResolveContext>) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.insert(key, KeyFunction::context_aware(f));
        self
    }

    pub fn get(&self, key: &str) -> Option<&KeyFunction> {
        self.functions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.functions.contains_key(key)
    }

    /// Bound keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a FunctionSpec)> for FunctionMap {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a FunctionSpec)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, spec) in iter {
            map.insert(key, spec.to_function());
        }
        map
    }
}

// ============================================================================
// config-declared functions
// ============================================================================

/// Failure of a config-declared function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("environment variable `{0}` is not set")]
    EnvUnset(String),

    #[error("context value `{0}` is missing and no default is configured")]
    MissingContext(String),
}

/// A function declared in the `[functions]` table.
///
/// ```toml
/// [functions]
/// home = { url = "/" }
/// docs = { env = "DOCS_URL" }
/// next = { context = "next", default = "/" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionSpec {
    /// Constant URL.
    Url { url: String },
    /// Environment variable read at call time.
    Env { env: String },
    /// Context value with an optional fallback.
    Context {
        context: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<String>,
    },
}

impl FunctionSpec {
    pub fn to_function(&self) -> KeyFunction {
        match self.clone() {
            Self::Url { url } => KeyFunction::context_free(move || Ok(url.clone())),
            Self::Env { env } => KeyFunction::context_free(move || {
                std::env::var(&env).map_err(|_| FunctionError::EnvUnset(env.clone()).into())
            }),
            Self::Context { context, default } => KeyFunction::context_aware(move |ctx| {
                ctx.and_then(|c| c.get(&context))
                    .map(str::to_string)
                    .or_else(|| default.clone())
                    .ok_or_else(|| FunctionError::MissingContext(context.clone()).into())
            }),
        }
    }
}

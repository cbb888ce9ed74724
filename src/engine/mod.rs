//! Resolution engine - key (+ optional context) -> URL.
//!
//! Resolution order for a key:
//!
//! 1. unknown key -> `Err(UnknownKey)` or `""` (see `raise_on_error`)
//! 2. function key -> the function's result, unmodified
//! 3. stored key -> the record's URL, or `""` if there is no record
//!
//! Read-time failures of a stored record never surface: a record that went
//! stale resolves to `""`. Write-time validation in [`UrlMapper::put`]
//! always fails loudly.

use std::sync::Arc;

use thiserror::Error;

use crate::core::{BoxError, ResolveContext};
use crate::debug;
use crate::mapping::{MappingRecord, ResolveEnv, ValidationError};
use crate::object::ObjectRegistry;
use crate::registry::Registry;
use crate::route::RouteResolver;
use crate::store::{MappingStore, StoreError};

/// Read-time resolution failure (only with `raise_on_error`).
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("URL key `{0}` is not a known key")]
    UnknownKey(String),

    #[error("function for URL key `{key}` failed")]
    FunctionInvocation {
        key: String,
        #[source]
        source: BoxError,
    },
}

/// Write-time failure.
#[derive(Debug, Error)]
pub enum PutError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The resolution engine and its collaborators.
#[derive(Clone)]
pub struct UrlMapper {
    registry: Arc<Registry>,
    store: Arc<dyn MappingStore>,
    routes: Arc<dyn RouteResolver>,
    objects: Arc<ObjectRegistry>,
}

impl UrlMapper {
    pub fn new(
        registry: Arc<Registry>,
        store: Arc<dyn MappingStore>,
        routes: Arc<dyn RouteResolver>,
        objects: Arc<ObjectRegistry>,
    ) -> Self {
        Self {
            registry,
            store,
            routes,
            objects,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn store(&self) -> &dyn MappingStore {
        self.store.as_ref()
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    /// Collaborators handed to mapping records.
    pub fn env(&self) -> ResolveEnv<'_> {
        ResolveEnv {
            routes: self.routes.as_ref(),
            objects: &self.objects,
        }
    }

    // ========================================================================
    // reading
    // ========================================================================

    /// Resolve a key to its URL.
    ///
    /// `Ok("")` means "no URL available". Errors are only returned for an
    /// unknown key or a failing function, and only when the registry has
    /// `raise_on_error` set.
    pub fn resolve(
        &self,
        key: &str,
        context: Option<&ResolveContext>,
    ) -> Result<String, ResolveError> {
        if !self.registry.is_known(key) {
            debug!("resolve"; "`{}` is not a known key", key);
            return self.fail(ResolveError::UnknownKey(key.to_string()));
        }

        if let Some(function) = self.registry.get_function(key) {
            return match function.call(context) {
                Ok(url) => {
                    debug!("resolve"; "`{}` -> {} (function)", key, url);
                    Ok(url)
                }
                Err(source) => {
                    debug!("resolve"; "function for `{}` failed: {}", key, source);
                    self.fail(ResolveError::FunctionInvocation {
                        key: key.to_string(),
                        source,
                    })
                }
            };
        }

        let Some(record) = self.store.get(key) else {
            debug!("resolve"; "`{}` has no stored mapping", key);
            return Ok(String::new());
        };

        let url = record.get_url(self.env());
        debug!(
            "resolve";
            "`{}` -> {} ({})",
            key,
            url,
            record.mapping_kind().map_or("none", |k| k.as_str())
        );
        Ok(url)
    }

    /// Whether a key currently resolves to a non-empty URL.
    ///
    /// Never fails: resolution errors count as "not mapped".
    pub fn is_mapped(&self, key: &str) -> bool {
        if !self.registry.is_known(key) {
            return false;
        }
        if !self.registry.is_function_key(key) && !self.store.exists(key) {
            return false;
        }
        self.resolve(key, None).is_ok_and(|url| !url.is_empty())
    }

    fn fail(&self, err: ResolveError) -> Result<String, ResolveError> {
        if self.registry.raise_on_error() {
            Err(err)
        } else {
            Ok(String::new())
        }
    }

    // ========================================================================
    // writing
    // ========================================================================

    /// Validate and commit a record. Invalid records are never stored.
    pub fn put(&self, record: MappingRecord) -> Result<(), PutError> {
        if !self.registry.is_known(&record.key) || self.registry.is_function_key(&record.key) {
            return Err(ValidationError::InvalidKey(record.key).into());
        }
        record.validate(self.env())?;
        self.store.insert(record)?;
        Ok(())
    }

    /// Delete the record for a key. Returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        self.store.remove(key)
    }

    /// Stored records, excluding any whose key is bound to a function.
    pub fn list_visible(&self) -> Vec<MappingRecord> {
        self.store.list_visible(&self.registry)
    }

    /// Keys a stored mapping may be created for.
    pub fn key_choices(&self) -> Vec<&str> {
        self.registry.stored_keys()
    }
}

impl std::fmt::Debug for UrlMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlMapper")
            .field("registry", &self.registry)
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

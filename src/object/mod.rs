//! Owning objects - domain objects a key can point at.
//!
//! An object mapping stores a `(content type, object id)` pair. The host
//! registers one [`ObjectSource`] per content type; a source answers whether
//! an object exists and, if the type has one, exposes the
//! [`CanonicalUrlProvider`] capability.
//!
//! ```text
//! ObjectRegistry
//! ├── flatpages.flatpage -> ObjectTable { ids: [1, 2], canonical: "/pages/{id}/" }
//! └── sites.site         -> ObjectTable { ids: [1],    canonical: none }
//! ```

mod content_type;
mod table;

use std::sync::Arc;

use rustc_hash::FxHashMap;

pub use content_type::{ContentType, ParseContentTypeError};
pub use table::ObjectTable;

/// Object identifier (positive integer primary key).
pub type ObjectId = u64;

/// Capability: produce the canonical URL of an object.
pub trait CanonicalUrlProvider: Send + Sync {
    /// Canonical URL for the object, `None` if it cannot be produced.
    fn canonical_url(&self, id: ObjectId) -> Option<String>;
}

/// Host adapter for one content type.
pub trait ObjectSource: Send + Sync {
    /// Whether an object with this id currently exists.
    fn exists(&self, id: ObjectId) -> bool;

    /// The canonical-URL capability, if this type has one.
    fn canonical(&self) -> Option<&dyn CanonicalUrlProvider> {
        None
    }
}

/// Reference to an owning object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub content_type: ContentType,
    pub id: ObjectId,
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.content_type, self.id)
    }
}

/// Content type -> object source lookup.
#[derive(Default, Clone)]
pub struct ObjectRegistry {
    sources: FxHashMap<ContentType, Arc<dyn ObjectSource>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the source for a content type.
    pub fn register(&mut self, content_type: ContentType, source: Arc<dyn ObjectSource>) {
        self.sources.insert(content_type, source);
    }

    pub fn with(mut self, content_type: ContentType, source: impl ObjectSource + 'static) -> Self {
        self.register(content_type, Arc::new(source));
        self
    }

    pub fn source(&self, content_type: &ContentType) -> Option<&dyn ObjectSource> {
        self.sources.get(content_type).map(|s| s.as_ref())
    }

    /// Whether the referenced object exists. Unknown types have no objects.
    pub fn exists(&self, object: &ObjectRef) -> bool {
        self.source(&object.content_type)
            .is_some_and(|s| s.exists(object.id))
    }

    /// Whether objects of this type can produce a canonical URL.
    pub fn has_canonical_url(&self, content_type: &ContentType) -> bool {
        self.source(content_type)
            .is_some_and(|s| s.canonical().is_some())
    }

    /// Canonical URL of a live object.
    ///
    /// `None` when the type is unknown, the object is gone, or the type
    /// is not URL-capable.
    pub fn canonical_url(&self, object: &ObjectRef) -> Option<String> {
        let source = self.source(&object.content_type)?;
        if !source.exists(object.id) {
            return None;
        }
        source.canonical()?.canonical_url(object.id)
    }

    /// Registered content types, sorted.
    pub fn content_types(&self) -> Vec<&ContentType> {
        let mut types: Vec<_> = self.sources.keys().collect();
        types.sort();
        types
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("content_types", &self.content_types())
            .finish()
    }
}

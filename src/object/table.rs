//! Config-backed object source.

use rustc_hash::FxHashSet;

use super::{CanonicalUrlProvider, ObjectId, ObjectSource};

/// Placeholder replaced by the object id in canonical URL templates.
const ID_PLACEHOLDER: &str = "{id}";

/// A fixed set of objects of one content type.
///
/// Objects are URL-capable only when a canonical URL template is set,
/// e.g. `/pages/{id}/`.
#[derive(Debug, Clone, Default)]
pub struct ObjectTable {
    ids: FxHashSet<ObjectId>,
    canonical_url: Option<String>,
}

impl ObjectTable {
    pub fn new(ids: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            canonical_url: None,
        }
    }

    pub fn with_canonical_url(mut self, template: impl Into<String>) -> Self {
        self.canonical_url = Some(template.into());
        self
    }

    pub fn insert(&mut self, id: ObjectId) {
        self.ids.insert(id);
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.ids.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ObjectSource for ObjectTable {
    fn exists(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    fn canonical(&self) -> Option<&dyn CanonicalUrlProvider> {
        self.canonical_url
            .as_ref()
            .map(|_| self as &dyn CanonicalUrlProvider)
    }
}

impl CanonicalUrlProvider for ObjectTable {
    fn canonical_url(&self, id: ObjectId) -> Option<String> {
        self.canonical_url
            .as_ref()
            .map(|template| template.replace(ID_PLACEHOLDER, &id.to_string()))
    }
}

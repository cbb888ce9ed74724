//! Mapping store - one record per stored key.
//!
//! Stores are raw persistence: [`MappingStore::insert`] commits whatever it
//! is given. Validation happens in [`UrlMapper::put`](crate::engine::UrlMapper::put)
//! before a record reaches the store.
//!
//! | Store           | Backing                                   |
//! |-----------------|-------------------------------------------|
//! | [`MemoryStore`] | `RwLock<BTreeMap>`                        |
//! | [`JsonFileStore`] | same map, rewritten to a JSON file on change |

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::mapping::MappingRecord;
use crate::registry::Registry;

/// Persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("mapping file `{0}` is not valid JSON")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Mapping store contract.
pub trait MappingStore: Send + Sync {
    fn get(&self, key: &str) -> Option<MappingRecord>;

    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace the record for its key.
    fn insert(&self, record: MappingRecord) -> Result<(), StoreError>;

    /// Returns whether a record was removed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// All records, sorted by key.
    fn list(&self) -> Vec<MappingRecord>;

    /// Records whose keys are not bound to a function.
    fn list_visible(&self, registry: &Registry) -> Vec<MappingRecord> {
        self.list()
            .into_iter()
            .filter(|record| !registry.is_function_key(&record.key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FunctionMap, RegistrySettings};

    #[test]
    fn test_list_visible_hides_function_keys() {
        let registry = Registry::load(
            RegistrySettings::default().with_keys(["k1", "k3"]),
            FunctionMap::new().bind_context_free("k1", || Ok("a".into())),
        )
        .unwrap();

        let store = MemoryStore::new();
        // A record for a function key can only exist if written around the engine
        store.insert(MappingRecord::direct("k1", "/shadowed/")).unwrap();
        store.insert(MappingRecord::direct("k3", "/test/")).unwrap();

        let keys: Vec<_> = store.list_visible(&registry).into_iter().map(|r| r.key).collect();
        assert_eq!(keys, ["k3"]);
        assert_eq!(store.list().len(), 2);
    }
}

//! In-memory mapping store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{MappingStore, StoreError};
use crate::mapping::MappingRecord;

/// Thread-safe in-memory store keyed by mapping key.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<String, MappingRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with records.
    pub fn with_records(records: impl IntoIterator<Item = MappingRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.key.clone(), r)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl MappingStore for MemoryStore {
    fn get(&self, key: &str) -> Option<MappingRecord> {
        self.records.read().get(key).cloned()
    }

    fn exists(&self, key: &str) -> bool {
        self.records.read().contains_key(key)
    }

    fn insert(&self, record: MappingRecord) -> Result<(), StoreError> {
        self.records.write().insert(record.key.clone(), record);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.records.write().remove(key).is_some())
    }

    fn list(&self) -> Vec<MappingRecord> {
        self.records.read().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.insert(MappingRecord::direct("terms", "/test/")).unwrap();
        assert!(store.exists("terms"));
        assert_eq!(store.get("terms").unwrap().url, "/test/");

        // Replace
        store.insert(MappingRecord::route("terms", "test", "pk=1")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("terms").unwrap().route_name, "test");

        assert!(store.remove("terms").unwrap());
        assert!(!store.remove("terms").unwrap());
        assert!(store.get("terms").is_none());
    }

    #[test]
    fn test_list_sorted_by_key() {
        let store = MemoryStore::with_records([
            MappingRecord::direct("b", "/b/"),
            MappingRecord::direct("a", "/a/"),
        ]);
        let keys: Vec<_> = store.list().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}

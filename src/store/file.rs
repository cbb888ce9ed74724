//! JSON file backed mapping store.
//!
//! The file holds an array of records sorted by key:
//!
//! ```json
//! [
//!   { "key": "terms", "url": "/terms/" },
//!   { "key": "about", "route_name": "page", "route_params": "slug=about" }
//! ]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{MappingStore, StoreError};
use crate::debug;
use crate::mapping::MappingRecord;

/// Store that rewrites its file on every committed change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<BTreeMap<String, MappingRecord>>,
}

impl JsonFileStore {
    /// Open a store, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            Self::read(&path)?
        } else {
            BTreeMap::new()
        };
        debug!("store"; "opened {} ({} records)", path.display(), records.len());

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, MappingRecord>, StoreError> {
        let content =
            fs::read_to_string(path).map_err(|e| StoreError::Io(path.to_path_buf(), e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let records: Vec<MappingRecord> = serde_json::from_str(&content)
            .map_err(|e| StoreError::Json(path.to_path_buf(), e))?;
        Ok(records.into_iter().map(|r| (r.key.clone(), r)).collect())
    }

    fn write(&self, records: &BTreeMap<String, MappingRecord>) -> Result<(), StoreError> {
        let list: Vec<&MappingRecord> = records.values().collect();
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| StoreError::Json(self.path.clone(), e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(&self.path, json + "\n").map_err(|e| StoreError::Io(self.path.clone(), e))
    }
}

impl MappingStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<MappingRecord> {
        self.records.read().get(key).cloned()
    }

    fn exists(&self, key: &str) -> bool {
        self.records.read().contains_key(key)
    }

    fn insert(&self, record: MappingRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let key = record.key.clone();
        let previous = records.insert(key.clone(), record);

        // Memory and file must agree, so undo on a failed write
        if let Err(e) = self.write(&records) {
            match previous {
                Some(previous) => records.insert(key, previous),
                None => records.remove(&key),
            };
            return Err(e);
        }
        debug!("saved"; "{}", key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        let Some(previous) = records.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.write(&records) {
            records.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    fn list(&self) -> Vec<MappingRecord> {
        self.records.read().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ContentType;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp.path().join("urlmap.json")).unwrap();
        assert!(store.list().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_changes_persist_across_open() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data/urlmap.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.insert(MappingRecord::direct("terms", "/test/")).unwrap();
        store
            .insert(MappingRecord::object(
                "about",
                ContentType::new("flatpages", "flatpage"),
                1,
            ))
            .unwrap();
        store.insert(MappingRecord::route("gone", "test", "")).unwrap();
        assert!(store.remove("gone").unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        let keys: Vec<_> = reopened.list().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, ["about", "terms"]);
        assert_eq!(reopened.get("terms").unwrap().url, "/test/");
        assert_eq!(reopened.get("about").unwrap().object_id, Some(1));
    }

    #[test]
    fn test_file_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("urlmap.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.insert(MappingRecord::direct("terms", "/terms/")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value, serde_json::json!([{ "key": "terms", "url": "/terms/" }]));
    }

    #[test]
    fn test_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("urlmap.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Json(..))
        ));
    }

    #[test]
    fn test_empty_file_is_empty_store() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("urlmap.json");
        fs::write(&path, "\n").unwrap();
        assert!(JsonFileStore::open(&path).unwrap().list().is_empty());
    }
}

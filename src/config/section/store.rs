//! `[store]` section configuration.
//!
//! ```toml
//! [store]
//! path = "urlmap.json"   # relative to the config file
//! ```

use std::path::PathBuf;

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Mapping store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "store")]
pub struct StoreConfig {
    /// JSON file holding stored mappings, relative to the config file.
    #[config(default = "urlmap.json")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("urlmap.json"),
        }
    }
}

impl StoreConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.path.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.path,
                "store path must not be empty",
                "remove the field to use \"urlmap.json\"",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::test_parse_config;

    use super::*;

    #[test]
    fn test_store_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.store.path, Path::new("urlmap.json"));
    }

    #[test]
    fn test_store_path() {
        let config = test_parse_config("[store]\npath = \"data/map.json\"");
        assert_eq!(config.store.path, Path::new("data/map.json"));
    }

    #[test]
    fn test_store_template() {
        let template = StoreConfig::template_with_header();
        assert!(template.contains("path = \"urlmap.json\""));

        let config = test_parse_config(&template);
        assert_eq!(config.store.path, StoreConfig::default().path);
    }

    #[test]
    fn test_store_validate_empty() {
        let config = StoreConfig {
            path: PathBuf::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}

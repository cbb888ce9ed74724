//! `[mapper]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [mapper]
//! keys = ["home", "terms", "next"]
//! raise_on_error = true
//! allowed_mappings = ["direct", "object", "route"]
//! content_types = ["flatpages.flatpage"]
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::mapping::MappingKind;
use crate::object::ContentType;
use crate::registry::RegistrySettings;

/// Keys and resolution rules.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "mapper")]
pub struct MapperConfig {
    /// Keys that may be mapped to a URL.
    pub keys: Vec<String>,

    /// Fail on unknown keys and failing functions instead of resolving to "".
    #[config(default = "true")]
    pub raise_on_error: bool,

    /// Mapping kinds that may be stored: direct, object, route.
    #[config(default = r#"["direct", "object", "route"]"#)]
    pub allowed_mappings: Vec<String>,

    /// Content types offered for object mappings (app_label.model).
    /// Empty offers every registered type.
    pub content_types: Vec<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        let defaults = RegistrySettings::default();
        Self {
            keys: defaults.keys,
            raise_on_error: defaults.raise_on_error,
            allowed_mappings: defaults.allowed_mappings,
            content_types: Vec::new(),
        }
    }
}

impl MapperConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.keys.is_empty() {
            diag.warn(Self::FIELDS.keys, "no keys configured, every key resolves as unknown");
        }

        let mut seen = std::collections::BTreeSet::new();
        for key in &self.keys {
            if key.trim().is_empty() {
                diag.error(Self::FIELDS.keys, "keys must not be empty strings");
            } else if !seen.insert(key.as_str()) {
                diag.warn(Self::FIELDS.keys, format!("key `{key}` is listed more than once"));
            }
        }

        if self.allowed_mappings.is_empty() {
            diag.error_with_hint(
                Self::FIELDS.allowed_mappings,
                "at least one mapping kind must be allowed",
                "use any of: direct, object, route",
            );
        }
        for name in &self.allowed_mappings {
            if let Err(e) = name.parse::<MappingKind>() {
                diag.error_with_hint(
                    Self::FIELDS.allowed_mappings,
                    e.to_string(),
                    "use any of: direct, object, route",
                );
            }
        }

        for name in &self.content_types {
            if let Err(e) = name.parse::<ContentType>() {
                diag.error_with_hint(
                    Self::FIELDS.content_types,
                    e.to_string(),
                    "write content types as app_label.model, e.g. \"flatpages.flatpage\"",
                );
            }
        }
    }

    /// Registry settings; content types that fail to parse are skipped.
    pub fn settings(&self) -> RegistrySettings {
        RegistrySettings {
            keys: self.keys.clone(),
            raise_on_error: self.raise_on_error,
            allowed_mappings: self.allowed_mappings.clone(),
            content_types: self
                .content_types
                .iter()
                .filter_map(|name| name.parse().ok())
                .collect(),
        }
    }
}

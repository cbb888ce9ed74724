//! Configuration management for `urlmapper.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── mapper     # [mapper]
//! │   ├── store      # [store]
//! │   ├── route      # [[routes]]
//! │   └── object     # [[objects]]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # UrlMapperConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[mapper]`     | Known keys, raise_on_error, allowed mappings     |
//! | `[functions]`  | Keys resolved by a function instead of the store |
//! | `[store]`      | Mapping file                                     |
//! | `[[routes]]`   | Named routes for route mappings and URL checks   |
//! | `[[objects]]`  | Owning objects for object mappings               |

pub mod section;
pub mod types;
mod util;

pub use util::find_config_file;

pub use section::{MapperConfig, ObjectConfig, RouteConfig, StoreConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::UrlMapper;
use crate::log;
use crate::registry::{FunctionMap, FunctionSpec, Registry};
use crate::store::{JsonFileStore, MappingStore};

/// Field path of the `[functions]` table.
const FUNCTIONS: FieldPath = FieldPath::new("functions");

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing urlmapper.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlMapperConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub mapper: MapperConfig,

    /// Function-backed keys
    #[serde(default)]
    pub functions: BTreeMap<String, FunctionSpec>,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl UrlMapperConfig {
    /// Load and validate a config file.
    ///
    /// The project root is the config file's parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Self::from_path(path)?;

        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Mapping file, resolved against the project root.
    pub fn store_path(&self) -> PathBuf {
        self.root.join(&self.store.path)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.mapper.validate(&mut diag);
        self.store.validate(&mut diag);
        for (index, route) in self.routes.iter().enumerate() {
            route.validate(index, &mut diag);
        }
        for object in &self.objects {
            object.validate(&mut diag);
        }
        self.validate_functions(&mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    fn validate_functions(&self, diag: &mut ConfigDiagnostics) {
        for key in self.functions.keys() {
            if !self.mapper.keys.contains(key) {
                diag.error_with_hint(
                    FUNCTIONS,
                    format!("function bound to `{key}`, which is not a known key"),
                    format!("add \"{key}\" to {}", MapperConfig::FIELDS.keys),
                );
            }
        }
    }

    // ========================================================================
    // assembly
    // ========================================================================

    /// Registry from `[mapper]` and `[functions]`.
    pub fn registry(&self) -> Result<Registry, ConfigError> {
        let functions: FunctionMap = self
            .functions
            .iter()
            .map(|(key, spec)| (key.as_str(), spec))
            .collect();
        Registry::load(self.mapper.settings(), functions)
    }

    /// Assemble a mapper around the given store.
    pub fn assemble(&self, store: Arc<dyn MappingStore>) -> Result<UrlMapper, ConfigError> {
        let registry = self.registry()?;
        let routes = section::route_table(&self.routes)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        let objects = section::object_registry(&self.objects)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(UrlMapper::new(
            Arc::new(registry),
            store,
            Arc::new(routes),
            Arc::new(objects),
        ))
    }

    /// Assemble a mapper backed by the configured mapping file.
    pub fn build(&self) -> Result<UrlMapper> {
        let path = self.store_path();
        let store = JsonFileStore::open(&path)
            .with_context(|| format!("Failed to open mapping store '{}'", path.display()))?;
        Ok(self.assemble(Arc::new(store))?)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from TOML.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> UrlMapperConfig {
    let (parsed, ignored) = UrlMapperConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

//! Config registry - which keys exist and how they may be resolved.
//!
//! A [`Registry`] is built once with [`Registry::load`] and never changes
//! afterwards. It is passed to the engine explicitly; nothing here is global.
//!
//! ```text
//! KnownKeys ─┬─ FunctionKeys  (bound to a KeyFunction)
//!            └─ StoredKeys    (resolved through the mapping store)
//! ```

mod function;

use std::collections::BTreeSet;

pub use function::{
    ContextAwareFn, ContextFreeFn, FunctionError, FunctionMap, FunctionSpec, KeyFunction,
};

use crate::config::ConfigError;
use crate::mapping::MappingKind;
use crate::object::ContentType;

/// App label whose types are never offered for object mappings.
pub const OWN_APP_LABEL: &str = "urlmapper";

/// Raw registry settings, before validation.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub keys: Vec<String>,
    pub raise_on_error: bool,
    /// Kind names (`direct`, `object`, `route`, or their older spellings).
    pub allowed_mappings: Vec<String>,
    /// Types selectable for object mappings; empty means every type.
    pub content_types: Vec<ContentType>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            raise_on_error: true,
            allowed_mappings: MappingKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            content_types: Vec::new(),
        }
    }
}

impl RegistrySettings {
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_raise_on_error(mut self, raise: bool) -> Self {
        self.raise_on_error = raise;
        self
    }
}

/// Validated, immutable registry.
#[derive(Debug, Clone)]
pub struct Registry {
    known: BTreeSet<String>,
    functions: FunctionMap,
    raise_on_error: bool,
    allowed_kinds: Vec<MappingKind>,
    content_types: Vec<ContentType>,
}

impl Registry {
    /// Validate settings and function bindings.
    ///
    /// Fails when a function is bound to a key that is not known, or when
    /// the allowed mapping kinds are empty or name an unknown kind.
    pub fn load(settings: RegistrySettings, functions: FunctionMap) -> Result<Self, ConfigError> {
        let known: BTreeSet<String> = settings.keys.into_iter().collect();

        let dangling: Vec<String> = functions
            .keys()
            .filter(|key| !known.contains(*key))
            .map(str::to_string)
            .collect();
        if !dangling.is_empty() {
            return Err(ConfigError::DanglingFunctionKeys(dangling));
        }

        let allowed_kinds = parse_kinds(&settings.allowed_mappings)?;

        Ok(Self {
            known,
            functions,
            raise_on_error: settings.raise_on_error,
            allowed_kinds,
            content_types: settings.content_types,
        })
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.known.contains(key)
    }

    pub fn is_function_key(&self, key: &str) -> bool {
        self.functions.contains(key)
    }

    pub fn get_function(&self, key: &str) -> Option<&KeyFunction> {
        self.functions.get(key)
    }

    pub const fn raise_on_error(&self) -> bool {
        self.raise_on_error
    }

    pub fn allowed_kinds(&self) -> &[MappingKind] {
        &self.allowed_kinds
    }

    pub fn allows(&self, kind: MappingKind) -> bool {
        self.allowed_kinds.contains(&kind)
    }

    /// All known keys, sorted.
    pub fn known_keys(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }

    /// Keys that may be stored (known keys without a function), sorted.
    pub fn stored_keys(&self) -> Vec<&str> {
        self.known_keys()
            .filter(|key| !self.is_function_key(key))
            .collect()
    }

    pub fn function_keys(&self) -> Vec<&str> {
        self.functions.keys().collect()
    }

    /// Whether objects of this type may be chosen for an object mapping.
    pub fn content_type_selectable(&self, content_type: &ContentType) -> bool {
        if self.content_types.is_empty() {
            content_type.app_label() != OWN_APP_LABEL
        } else {
            self.content_types.contains(content_type)
        }
    }
}

/// Parse allowed kind names, collecting every unknown one.
fn parse_kinds(names: &[String]) -> Result<Vec<MappingKind>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::InvalidMappingKinds(Vec::new()));
    }

    let mut kinds = BTreeSet::new();
    let mut invalid = Vec::new();
    for name in names {
        match name.parse::<MappingKind>() {
            Ok(kind) => {
                kinds.insert(kind);
            }
            Err(_) => invalid.push(name.clone()),
        }
    }

    if invalid.is_empty() {
        Ok(kinds.into_iter().collect())
    } else {
        Err(ConfigError::InvalidMappingKinds(invalid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RegistrySettings {
        RegistrySettings::default().with_keys(["k1", "k2", "k3", "k4", "k5"])
    }

    fn functions() -> FunctionMap {
        FunctionMap::new()
            .bind_context_free("k1", || Ok("a".into()))
            .bind_context_aware("k2", |_| Ok("b".into()))
    }

    #[test]
    fn test_load_partitions_keys() {
        let registry = Registry::load(settings(), functions()).unwrap();

        assert!(registry.is_known("k3"));
        assert!(!registry.is_known("k6"));
        assert!(registry.is_function_key("k1"));
        assert!(!registry.is_function_key("k3"));
        assert_eq!(registry.stored_keys(), ["k3", "k4", "k5"]);
        assert_eq!(registry.function_keys(), ["k1", "k2"]);
        assert!(registry.raise_on_error());
    }

    #[test]
    fn test_load_rejects_dangling_function_keys() {
        let functions = functions().bind_context_free("zz", || Ok(String::new()));
        let functions = functions.bind_context_free("aa", || Ok(String::new()));

        match Registry::load(settings(), functions) {
            Err(ConfigError::DanglingFunctionKeys(keys)) => assert_eq!(keys, ["aa", "zz"]),
            other => panic!("expected dangling keys, got {other:?}"),
        }
    }

    #[test]
    fn test_allowed_kinds_default_all() {
        let registry = Registry::load(settings(), FunctionMap::new()).unwrap();
        assert_eq!(registry.allowed_kinds(), MappingKind::ALL);
        assert!(registry.allows(MappingKind::Object));
    }

    #[test]
    fn test_allowed_kinds_subset_and_aliases() {
        let settings = RegistrySettings {
            allowed_mappings: vec!["url".into(), "view_name".into()],
            ..settings()
        };
        let registry = Registry::load(settings, FunctionMap::new()).unwrap();
        assert_eq!(
            registry.allowed_kinds(),
            [MappingKind::Direct, MappingKind::Route]
        );
        assert!(!registry.allows(MappingKind::Object));
    }

    #[test]
    fn test_allowed_kinds_invalid() {
        let empty = RegistrySettings {
            allowed_mappings: Vec::new(),
            ..settings()
        };
        assert!(matches!(
            Registry::load(empty, FunctionMap::new()),
            Err(ConfigError::InvalidMappingKinds(_))
        ));

        let bogus = RegistrySettings {
            allowed_mappings: vec!["direct".into(), "redirect".into()],
            ..settings()
        };
        match Registry::load(bogus, FunctionMap::new()) {
            Err(ConfigError::InvalidMappingKinds(names)) => assert_eq!(names, ["redirect"]),
            other => panic!("expected invalid kinds, got {other:?}"),
        }
    }

    #[test]
    fn test_content_type_selectable() {
        let flatpage = ContentType::new("flatpages", "flatpage");
        let own = ContentType::new("urlmapper", "urlmap");

        let all = Registry::load(settings(), FunctionMap::new()).unwrap();
        assert!(all.content_type_selectable(&flatpage));
        assert!(!all.content_type_selectable(&own));

        let limited = RegistrySettings {
            content_types: vec![flatpage.clone()],
            ..settings()
        };
        let limited = Registry::load(limited, FunctionMap::new()).unwrap();
        assert!(limited.content_type_selectable(&flatpage));
        assert!(!limited.content_type_selectable(&ContentType::new("sites", "site")));
    }
}

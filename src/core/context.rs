//! Per-request context handed to context-aware key functions.

use std::collections::BTreeMap;

/// Context for resolving a key.
///
/// Carries whatever the host request layer wants to expose to bound
/// functions: the current path and free-form string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveContext {
    /// Path of the request being rendered (e.g., /posts/hello/)
    pub path: Option<String>,
    /// Named values (query parameters, user locale, ...)
    pub values: BTreeMap<String, String>,
}

impl ResolveContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Look up a named value. `path` is also reachable under the name "path".
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None if name == "path" => self.path.as_deref(),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_values_and_path() {
        let ctx = ResolveContext::new()
            .with_path("/blog/")
            .with_value("next", "/login/");

        assert_eq!(ctx.get("next"), Some("/login/"));
        assert_eq!(ctx.get("path"), Some("/blog/"));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_explicit_value_shadows_path() {
        let ctx = ResolveContext::new()
            .with_path("/blog/")
            .with_value("path", "/other/");
        assert_eq!(ctx.get("path"), Some("/other/"));
    }
}

//! Named route table.

use super::{NoRouteMatch, Pattern, PatternError, RouteParams, RouteResolver};
use crate::core::UrlPath;

/// A named route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub pattern: Pattern,
}

/// Ordered table of named routes.
///
/// Several routes may share a name; reversing tries them in declaration
/// order and the first one accepting the parameters wins.
///
/// ```ignore
/// let table = RouteTable::new()
///     .route("test", "test/")?
///     .route("test", "test/{slug:slug}/")?
///     .route("test", "test/{pk:int}/")?;
///
/// let params = RouteParams::new().with("pk", "12345");
/// assert_eq!(table.reverse("test", &params)?, "/test/12345/");
/// assert!(table.is_routable("/test/3/"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RouteTable::add`].
    pub fn route(mut self, name: &str, pattern: &str) -> Result<Self, PatternError> {
        self.add(name, pattern)?;
        Ok(self)
    }

    pub fn add(&mut self, name: &str, pattern: &str) -> Result<(), PatternError> {
        self.routes.push(Route {
            name: name.to_string(),
            pattern: Pattern::compile(pattern)?,
        });
        Ok(())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Names of the routes matching a path (first match first).
    pub fn matching(&self, path: &str) -> Vec<&str> {
        let Some(path) = UrlPath::from_request(path) else {
            return Vec::new();
        };
        self.routes
            .iter()
            .filter(|r| r.pattern.matches(path.relative()))
            .map(|r| r.name.as_str())
            .collect()
    }
}

impl RouteResolver for RouteTable {
    fn reverse(&self, name: &str, params: &RouteParams) -> Result<String, NoRouteMatch> {
        self.routes
            .iter()
            .filter(|r| r.name == name)
            .find_map(|r| r.pattern.expand(params))
            .ok_or_else(|| NoRouteMatch::new(name, params))
    }

    fn is_routable(&self, path: &str) -> bool {
        UrlPath::from_request(path).is_some_and(|path| {
            self.routes
                .iter()
                .any(|r| r.pattern.matches(path.relative()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new()
            .route("test", "test/")
            .and_then(|t| t.route("test", "test/{slug:slug}/"))
            .and_then(|t| t.route("test", "test/{pk:int}/"))
            .and_then(|t| t.route("home", ""))
            .unwrap()
    }

    #[test]
    fn test_reverse_without_params() {
        assert_eq!(table().reverse("test", &RouteParams::new()).unwrap(), "/test/");
        assert_eq!(table().reverse("home", &RouteParams::new()).unwrap(), "/");
    }

    #[test]
    fn test_reverse_picks_route_by_param_names() {
        let t = table();
        let pk = RouteParams::new().with("pk", "12345");
        assert_eq!(t.reverse("test", &pk).unwrap(), "/test/12345/");

        let slug = RouteParams::new().with("slug", "test-it-works");
        assert_eq!(t.reverse("test", &slug).unwrap(), "/test/test-it-works/");
    }

    #[test]
    fn test_reverse_no_match() {
        let t = table();
        let err = t
            .reverse("test", &RouteParams::new().with("still", "invalid"))
            .unwrap_err();
        assert_eq!(err.name, "test");
        assert_eq!(err.params.get("still"), Some("invalid"));

        assert!(t.reverse("invalid", &RouteParams::new()).is_err());
        // Value rejected by the converter
        assert!(t.reverse("test", &RouteParams::new().with("pk", "abc")).is_err());
    }

    #[test]
    fn test_is_routable() {
        let t = table();
        assert!(t.is_routable("/test/"));
        assert!(t.is_routable("/test/3/"));
        assert!(t.is_routable("/test/some-slug/"));
        assert!(t.is_routable("/test/3/?page=2"));
        assert!(t.is_routable("/"));
        assert!(!t.is_routable("/invalid/"));
        assert!(!t.is_routable("test/3/"));
        assert!(!t.is_routable("abc"));
        assert!(!t.is_routable("https://example.com/test/"));
    }

    #[test]
    fn test_matching_names() {
        let t = table();
        assert_eq!(t.matching("/test/3/"), vec!["test", "test"]);
        assert!(t.matching("/nope/").is_empty());
    }

    #[test]
    fn test_add_rejects_bad_pattern() {
        let mut t = RouteTable::new();
        assert!(t.add("bad", "x/{oops").is_err());
        assert!(t.is_empty());
    }
}

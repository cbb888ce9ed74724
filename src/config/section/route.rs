//! `[[routes]]` entries - the application's named routes.
//!
//! ```toml
//! [[routes]]
//! name = "page"
//! pattern = "pages/{slug:slug}/"
//!
//! [[routes]]
//! name = "page"
//! pattern = "pages/{pk:int}/"
//! ```
//!
//! Entries sharing a name are tried in file order when reversing.

use macros::Config;
use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::route::{Pattern, RouteTable};

/// One named route.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "routes")]
pub struct RouteConfig {
    /// Route name used by route mappings.
    pub name: String,

    /// Path pattern without the leading slash; `{param}` or `{param:converter}`.
    pub pattern: String,
}

impl RouteConfig {
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.error(Self::FIELDS.name, format!("route #{} has no name", index + 1));
        }
        if let Err(e) = Pattern::compile(&self.pattern) {
            diag.error_with_hint(
                Self::FIELDS.pattern,
                format!("route `{}`: {}", self.name, e),
                "placeholders look like {name} or {name:int}; converters: str, int, slug, path",
            );
        }
    }
}

/// Build a route table, in file order.
pub fn route_table(routes: &[RouteConfig]) -> Result<RouteTable, crate::route::PatternError> {
    let mut table = RouteTable::new();
    for route in routes {
        table.add(&route.name, &route.pattern)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use crate::route::{RouteParams, RouteResolver};

    use super::*;

    #[test]
    fn test_routes_parse_in_order() {
        let config = test_parse_config(
            "[[routes]]\nname = \"test\"\npattern = \"test/\"\n\n[[routes]]\nname = \"test\"\npattern = \"test/{pk:int}/\"",
        );
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].pattern, "test/{pk:int}/");

        let table = route_table(&config.routes).unwrap();
        let params = RouteParams::new().with("pk", "7");
        assert_eq!(table.reverse("test", &params).unwrap(), "/test/7/");
    }

    #[test]
    fn test_route_validate() {
        let route = RouteConfig {
            name: String::new(),
            pattern: "test/{pk:float}/".into(),
        };
        let mut diag = ConfigDiagnostics::new();
        route.validate(0, &mut diag);

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].field.as_str(), "routes.name");
        assert_eq!(diag.errors()[1].field.as_str(), "routes.pattern");
        assert!(route_table(&[route]).is_err());
    }
}

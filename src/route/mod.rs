//! Route resolution - named route + parameters -> URL.
//!
//! The engine only talks to the [`RouteResolver`] trait. [`RouteTable`] is
//! the host-side implementation used by the command line tool and tests.
//!
//! # Module Structure
//!
//! - [`params`]: ordered parameters and their `k=v, k=v` text form
//! - [`pattern`]: `{name:converter}` placeholder patterns
//! - [`table`]: named route table implementing [`RouteResolver`]

mod params;
mod pattern;
mod table;

use thiserror::Error;

pub use params::{ParseParamsError, RouteParams};
pub use pattern::{Converter, Pattern, PatternError};
pub use table::{Route, RouteTable};

/// No route with this name accepts these parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route named `{name}` accepts parameters {{{params}}}")]
pub struct NoRouteMatch {
    pub name: String,
    pub params: RouteParams,
}

impl NoRouteMatch {
    pub fn new(name: impl Into<String>, params: &RouteParams) -> Self {
        Self {
            name: name.into(),
            params: params.clone(),
        }
    }
}

/// Route resolver contract.
pub trait RouteResolver: Send + Sync {
    /// Reverse a named route with parameters into a site-absolute path.
    fn reverse(&self, name: &str, params: &RouteParams) -> Result<String, NoRouteMatch>;

    /// Whether a path resolves to a route of the application.
    fn is_routable(&self, path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_route_match_display() {
        let err = NoRouteMatch::new("test", &RouteParams::new().with("still", "invalid"));
        assert_eq!(
            err.to_string(),
            "no route named `test` accepts parameters {still=invalid}"
        );
    }
}

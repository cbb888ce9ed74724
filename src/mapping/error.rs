//! Mapping record validation errors.

use thiserror::Error;

use crate::object::{ContentType, ObjectId};
use crate::route::RouteParams;

/// A mapping record violates one of its invariants.
///
/// Raised only when a record is written, never when it is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please supply exactly one form of URL mapping ({count} supplied)")]
    MultipleOrNoMapping { count: usize },

    #[error("URL {0} does not correspond to a valid application route")]
    UnroutableUrl(String),

    #[error("please supply both a content type and object ID")]
    IncompleteObjectRef,

    #[error("object with type {content_type} and ID {id} does not exist")]
    ObjectNotFound { content_type: ContentType, id: ObjectId },

    #[error("object with type {content_type} and ID {id} does not have a canonical URL")]
    ObjectNotUrlCapable { content_type: ContentType, id: ObjectId },

    #[error("route parameters supplied but no route name provided")]
    OrphanRouteParams,

    #[error("route parameters `{text}` are not in the format a=b, c=d")]
    MalformedRouteParams { text: String },

    #[error("no match for route {name} and parameters {{{params}}}")]
    RouteNoMatch { name: String, params: RouteParams },

    #[error("key `{0}` is not available for stored mappings")]
    InvalidKey(String),
}

impl ValidationError {
    /// Stable machine-readable kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MultipleOrNoMapping { .. } => "multiple-or-no-mapping",
            Self::UnroutableUrl(_) => "unroutable-url",
            Self::IncompleteObjectRef => "incomplete-object-ref",
            Self::ObjectNotFound { .. } => "object-not-found",
            Self::ObjectNotUrlCapable { .. } => "object-not-url-capable",
            Self::OrphanRouteParams => "orphan-route-params",
            Self::MalformedRouteParams { .. } => "malformed-route-params",
            Self::RouteNoMatch { .. } => "route-no-match",
            Self::InvalidKey(_) => "invalid-key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let err = ValidationError::MultipleOrNoMapping { count: 2 };
        assert_eq!(err.kind(), "multiple-or-no-mapping");
        assert!(err.to_string().contains("(2 supplied)"));

        let err = ValidationError::RouteNoMatch {
            name: "test".into(),
            params: RouteParams::new().with("still", "invalid"),
        };
        assert_eq!(err.kind(), "route-no-match");
        assert_eq!(
            err.to_string(),
            "no match for route test and parameters {still=invalid}"
        );
    }
}

//! Persisted mapping record.

use serde::{Deserialize, Serialize};

use super::{MappingKind, ValidationError};
use crate::debug;
use crate::object::{ContentType, ObjectId, ObjectRef, ObjectRegistry};
use crate::route::{RouteParams, RouteResolver};

/// Collaborators a record needs to validate or resolve itself.
#[derive(Clone, Copy)]
pub struct ResolveEnv<'a> {
    pub routes: &'a dyn RouteResolver,
    pub objects: &'a ObjectRegistry,
}

/// Typed view of which mapping form a record holds.
///
/// Derived with priority direct > object > route, so a record violating
/// the single-mapping rule still has exactly one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping<'a> {
    Direct(&'a str),
    /// `None` when only one half of the reference is set.
    Object(Option<ObjectRef>),
    Route { name: &'a str, params: &'a str },
    Empty,
}

impl Mapping<'_> {
    pub const fn kind(&self) -> Option<MappingKind> {
        match self {
            Self::Direct(_) => Some(MappingKind::Direct),
            Self::Object(_) => Some(MappingKind::Object),
            Self::Route { .. } => Some(MappingKind::Route),
            Self::Empty => None,
        }
    }
}

/// One key's stored resolution rule.
///
/// Fields mirror the persisted form: empty strings and `None` mean "unset".
/// Use [`MappingRecord::mapping`] for a typed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingRecord {
    pub key: String,

    /// Literal, site-relative URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_name: String,

    /// Raw `k=v, k=v` text.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub route_params: String,
}

impl MappingRecord {
    /// A record with no mapping yet.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn direct(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(key).with_url(url)
    }

    pub fn object(key: impl Into<String>, content_type: ContentType, id: ObjectId) -> Self {
        Self::new(key).with_object(content_type, id)
    }

    pub fn route(key: impl Into<String>, name: impl Into<String>, params: impl Into<String>) -> Self {
        Self::new(key).with_route(name, params)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_object(mut self, content_type: ContentType, id: ObjectId) -> Self {
        self.content_type = Some(content_type);
        self.object_id = Some(id);
        self
    }

    pub fn with_route(mut self, name: impl Into<String>, params: impl Into<String>) -> Self {
        self.route_name = name.into();
        self.route_params = params.into();
        self
    }

    fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    fn has_object(&self) -> bool {
        self.content_type.is_some() || self.object_id.is_some()
    }

    fn has_route(&self) -> bool {
        !self.route_name.is_empty() || !self.route_params.is_empty()
    }

    /// Number of mapping forms populated (valid records have exactly one).
    pub fn mapping_count(&self) -> usize {
        [self.has_url(), self.has_object(), self.has_route()]
            .into_iter()
            .filter(|set| *set)
            .count()
    }

    /// Complete object reference, if both halves are set.
    pub fn object_ref(&self) -> Option<ObjectRef> {
        Some(ObjectRef {
            content_type: self.content_type.clone()?,
            id: self.object_id?,
        })
    }

    pub fn mapping(&self) -> Mapping<'_> {
        if self.has_url() {
            Mapping::Direct(&self.url)
        } else if self.has_object() {
            Mapping::Object(self.object_ref())
        } else if self.has_route() {
            Mapping::Route {
                name: &self.route_name,
                params: &self.route_params,
            }
        } else {
            Mapping::Empty
        }
    }

    /// Classification for display (direct > object > route).
    pub fn mapping_kind(&self) -> Option<MappingKind> {
        self.mapping().kind()
    }

    /// Parsed route parameters.
    pub fn route_params(&self) -> Result<RouteParams, ValidationError> {
        RouteParams::parse(&self.route_params).map_err(|_| ValidationError::MalformedRouteParams {
            text: self.route_params.clone(),
        })
    }

    // ========================================================================
    // resolution
    // ========================================================================

    /// Destination URL, or an empty string when nothing resolves.
    ///
    /// Never fails: a record that went stale after it was written (object
    /// deleted, route removed) reads as unmapped.
    pub fn get_url(&self, env: ResolveEnv<'_>) -> String {
        if self.has_url() {
            return self.url.clone();
        }

        if let Some(object) = self.object_ref()
            && let Some(url) = env.objects.canonical_url(&object)
        {
            return url;
        }

        if !self.route_name.is_empty() {
            let params = RouteParams::parse_lenient(&self.route_params);
            return match env.routes.reverse(&self.route_name, &params) {
                Ok(url) => url,
                Err(e) => {
                    debug!("resolve"; "`{}`: {}", self.key, e);
                    String::new()
                }
            };
        }

        String::new()
    }

    /// `key --> url` with the URL this record currently resolves to.
    pub fn describe(&self, env: ResolveEnv<'_>) -> String {
        format!("{} --> {}", self.key, self.get_url(env))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check every invariant; the first violation wins.
    pub fn validate(&self, env: ResolveEnv<'_>) -> Result<(), ValidationError> {
        self.validate_single_mapping()?;
        self.validate_url(env)?;
        self.validate_object(env)?;
        self.validate_route(env)
    }

    fn validate_single_mapping(&self) -> Result<(), ValidationError> {
        match self.mapping_count() {
            1 => Ok(()),
            count => Err(ValidationError::MultipleOrNoMapping { count }),
        }
    }

    fn validate_url(&self, env: ResolveEnv<'_>) -> Result<(), ValidationError> {
        if self.has_url() && !env.routes.is_routable(&self.url) {
            return Err(ValidationError::UnroutableUrl(self.url.clone()));
        }
        Ok(())
    }

    fn validate_object(&self, env: ResolveEnv<'_>) -> Result<(), ValidationError> {
        if !self.has_object() {
            return Ok(());
        }
        let object = self
            .object_ref()
            .ok_or(ValidationError::IncompleteObjectRef)?;

        if !env.objects.exists(&object) {
            return Err(ValidationError::ObjectNotFound {
                content_type: object.content_type,
                id: object.id,
            });
        }
        if !env.objects.has_canonical_url(&object.content_type) {
            return Err(ValidationError::ObjectNotUrlCapable {
                content_type: object.content_type,
                id: object.id,
            });
        }
        Ok(())
    }

    fn validate_route(&self, env: ResolveEnv<'_>) -> Result<(), ValidationError> {
        if !self.route_params.is_empty() && self.route_name.is_empty() {
            return Err(ValidationError::OrphanRouteParams);
        }
        let params = self.route_params()?;

        if !self.route_name.is_empty() {
            env.routes
                .reverse(&self.route_name, &params)
                .map_err(|e| ValidationError::RouteNoMatch {
                    name: e.name,
                    params: e.params,
                })?;
        }
        Ok(())
    }
}

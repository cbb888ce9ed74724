//! Mapping kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three forms a stored mapping can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    /// Literal URL.
    Direct,
    /// Owning object with a canonical URL.
    Object,
    /// Named route plus parameters.
    Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mapping kind `{0}`, expected one of: direct, object, route")]
pub struct ParseKindError(pub String);

impl MappingKind {
    pub const ALL: [Self; 3] = [Self::Direct, Self::Object, Self::Route];

    /// Config name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Object => "object",
            Self::Route => "route",
        }
    }

    /// Human label used in listings.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Object => "Object",
            Self::Route => "Route",
        }
    }

    /// Label for an optional kind (`None` for records with no mapping).
    pub fn label_of(kind: Option<Self>) -> &'static str {
        kind.map_or("None", |k| k.label())
    }
}

/// Accepts the config names plus the older `url`, `view` and `view_name`.
impl FromStr for MappingKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "url" => Ok(Self::Direct),
            "object" => Ok(Self::Object),
            "route" | "view" | "view_name" => Ok(Self::Route),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

impl fmt::Display for MappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

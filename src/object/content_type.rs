//! Content type tag (`app_label.model`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Type tag identifying a kind of owning object.
///
/// Written as `app_label.model`, both parts lowercase identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentType {
    app_label: String,
    model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid content type `{0}`, expected `app_label.model`")]
pub struct ParseContentTypeError(pub String);

impl ContentType {
    pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into().to_ascii_lowercase(),
            model: model.into().to_ascii_lowercase(),
        }
    }

    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn is_ident(part: &str) -> bool {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl FromStr for ContentType {
    type Err = ParseContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (app_label, model) = s
            .trim()
            .split_once('.')
            .ok_or_else(|| ParseContentTypeError(s.to_string()))?;

        if !Self::is_ident(app_label) || !Self::is_ident(model) {
            return Err(ParseContentTypeError(s.to_string()));
        }
        Ok(Self::new(app_label, model))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model)
    }
}

impl Serialize for ContentType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ContentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

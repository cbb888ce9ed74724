//! Route parameters and their `k=v, k=v` text form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A segment of parameter text that is not a `name=value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{segment}` is not in the form name=value")]
pub struct ParseParamsError {
    pub segment: String,
}

/// Ordered route parameters (name -> value).
///
/// Insertion order is kept; inserting an existing name replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `k=v` pairs separated by commas.
    ///
    /// Whitespace around names and values is trimmed. Empty segments are
    /// skipped, so `"slug=terms, language=en,"` is two parameters, but a
    /// whitespace-only segment is malformed.
    pub fn parse(text: &str) -> Result<Self, ParseParamsError> {
        let mut params = Self::new();
        for segment in text.split(',') {
            if segment.is_empty() {
                continue;
            }
            let (name, value) = segment
                .split_once('=')
                .map(|(n, v)| (n.trim(), v.trim()))
                .filter(|(n, _)| !n.is_empty())
                .ok_or_else(|| ParseParamsError {
                    segment: segment.trim().to_string(),
                })?;
            params.insert(name, value);
        }
        Ok(params)
    }

    /// Parse, treating malformed text as "no parameters".
    pub fn parse_lenient(text: &str) -> Self {
        Self::parse(text).unwrap_or_default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

impl FromStr for RouteParams {
    type Err = ParseParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical text form: `name=value, name=value`.
impl fmt::Display for RouteParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

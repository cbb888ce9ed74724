//! URL path type for route matching.
//!
//! - Internal representation: always decoded (human-readable)
//! - Request boundary: decode on input, encode on output

use std::borrow::Borrow;
use std::sync::{Arc, OnceLock};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped inside a single path segment.
///
/// Everything outside the RFC 3986 `pchar` set, plus `/` so that a value
/// can never introduce an extra segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Same as [`SEGMENT`] but keeps `/` (for `path` converter values).
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Decoded, site-absolute request path.
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Never carries a query string or fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Parse a path as a request would carry it.
    ///
    /// Returns `None` for anything that is not site-absolute
    /// (relative paths, `scheme:` URLs, protocol-relative `//host` links).
    pub fn from_request(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !trimmed.starts_with('/') || trimmed.starts_with("//") {
            return None;
        }

        let path = Self::strip_query_fragment(trimmed);
        let decoded = percent_decode_str(&path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or(path);

        Some(Self(Arc::from(decoded)))
    }

    /// Strip query string and fragment using the url crate.
    fn strip_query_fragment(path: &str) -> String {
        // Use a dummy base URL to parse the path
        static BASE: OnceLock<Option<url::Url>> = OnceLock::new();
        let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

        match base.as_ref().map(|b| b.join(path)) {
            Some(Ok(parsed)) => parsed.path().to_string(),
            // Fallback to simple split if url parsing fails
            _ => path.split(['?', '#']).next().unwrap_or(path).to_string(),
        }
    }

    /// Decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path without its leading `/` (what route patterns are matched against).
    #[inline]
    pub fn relative(&self) -> &str {
        &self.0[1..]
    }
}

/// Percent-encode a value for use as one path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Percent-encode a value that may span several segments.
pub fn encode_path(value: &str) -> String {
    utf8_percent_encode(value, PATH).to_string()
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

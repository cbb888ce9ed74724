//! Route patterns with `{name}` / `{name:converter}` placeholders.

use regex::Regex;
use thiserror::Error;

use super::RouteParams;
use crate::core::{encode_path, encode_segment};

/// Errors compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unclosed `{{` in pattern `{0}`")]
    Unclosed(String),

    #[error("unexpected `}}` in pattern `{0}`")]
    Unopened(String),

    #[error("invalid parameter name `{name}` in pattern `{pattern}`")]
    BadName { pattern: String, name: String },

    #[error("unknown converter `{converter}` in pattern `{pattern}`")]
    UnknownConverter { pattern: String, converter: String },

    #[error("parameter `{name}` appears twice in pattern `{pattern}`")]
    Duplicate { pattern: String, name: String },

    #[error("pattern `{0}` does not compile")]
    Regex(String),
}

/// Value converter for a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Any non-empty text without `/` (default).
    Str,
    /// ASCII digits.
    Int,
    /// ASCII letters, digits, `-` and `_`.
    Slug,
    /// Any non-empty text, `/` included.
    Path,
}

impl Converter {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "" | "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            "slug" => Some(Self::Slug),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    const fn regex(&self) -> &'static str {
        match self {
            Self::Str => "[^/]+",
            Self::Int => "[0-9]+",
            Self::Slug => "[-a-zA-Z0-9_]+",
            Self::Path => ".+",
        }
    }

    /// Whether a reverse value is acceptable for this converter.
    pub fn accepts(&self, value: &str) -> bool {
        !value.is_empty()
            && match self {
                Self::Str => !value.contains('/'),
                Self::Int => value.bytes().all(|b| b.is_ascii_digit()),
                Self::Slug => value
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
                Self::Path => true,
            }
    }

    fn encode(&self, value: &str) -> String {
        match self {
            Self::Path => encode_path(value),
            _ => encode_segment(value),
        }
    }
}

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A compiled route pattern.
///
/// Patterns are written relative to the site root (`test/{pk:int}/`);
/// a leading `/` is accepted and ignored.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    parts: Vec<Part>,
    regex: Regex,
}

impl Pattern {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let body = pattern.trim().trim_start_matches('/');
        let parts = Self::split(pattern, body)?;

        let mut re = String::from("^");
        for part in &parts {
            match part {
                Part::Literal(text) => re.push_str(&regex::escape(text)),
                Part::Param { name, converter } => {
                    re.push_str(&format!("(?P<{name}>{})", converter.regex()));
                }
            }
        }
        re.push('$');

        let regex = Regex::new(&re).map_err(|_| PatternError::Regex(pattern.to_string()))?;

        Ok(Self {
            source: pattern.to_string(),
            parts,
            regex,
        })
    }

    fn split(pattern: &str, body: &str) -> Result<Vec<Part>, PatternError> {
        let mut parts = Vec::new();
        let mut seen: Vec<&str> = Vec::new();
        let mut rest = body;

        while !rest.is_empty() {
            let open = rest.find('{');
            let close = rest.find('}');
            match (open, close) {
                (None, None) => {
                    parts.push(Part::Literal(rest.to_string()));
                    break;
                }
                (None, Some(_)) => return Err(PatternError::Unopened(pattern.to_string())),
                (Some(o), Some(c)) if c < o => {
                    return Err(PatternError::Unopened(pattern.to_string()));
                }
                (Some(_), None) => return Err(PatternError::Unclosed(pattern.to_string())),
                (Some(o), Some(c)) => {
                    if o > 0 {
                        parts.push(Part::Literal(rest[..o].to_string()));
                    }
                    let inner = &rest[o + 1..c];
                    let (name, conv) = inner.split_once(':').unwrap_or((inner, ""));
                    let (name, conv) = (name.trim(), conv.trim());

                    if !is_ident(name) {
                        return Err(PatternError::BadName {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    if seen.contains(&name) {
                        return Err(PatternError::Duplicate {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    let converter =
                        Converter::parse(conv).ok_or_else(|| PatternError::UnknownConverter {
                            pattern: pattern.to_string(),
                            converter: conv.to_string(),
                        })?;

                    seen.push(name);
                    parts.push(Part::Param {
                        name: name.to_string(),
                        converter,
                    });
                    rest = &rest[c + 1..];
                }
            }
        }
        Ok(parts)
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(|p| match p {
            Part::Param { name, .. } => Some(name.as_str()),
            Part::Literal(_) => None,
        })
    }

    /// Whether a root-relative, decoded path matches this pattern fully.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }

    /// Build the site-absolute path for these parameters.
    ///
    /// Returns `None` unless the parameter names equal the placeholder
    /// names and every value is accepted by its converter.
    pub fn expand(&self, params: &RouteParams) -> Option<String> {
        let expected = self.param_names().count();
        if params.len() != expected || params.names().any(|n| !self.has_param(n)) {
            return None;
        }

        let mut out = String::from("/");
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Param { name, converter } => {
                    let value = params.get(name)?;
                    if !converter.accepts(value) {
                        return None;
                    }
                    out.push_str(&converter.encode(value));
                }
            }
        }
        Some(out)
    }

    fn has_param(&self, name: &str) -> bool {
        self.param_names().any(|n| n == name)
    }
}

fn is_ident(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_literal() {
        let p = Pattern::compile("test/").unwrap();
        assert!(p.matches("test/"));
        assert!(!p.matches("test/3/"));
        assert!(!p.matches("xtest/"));
        assert_eq!(p.param_names().count(), 0);
    }

    #[test]
    fn test_leading_slash_ignored() {
        let p = Pattern::compile("/about/").unwrap();
        assert!(p.matches("about/"));
        assert_eq!(p.expand(&RouteParams::new()).as_deref(), Some("/about/"));
    }

    #[test]
    fn test_int_converter() {
        let p = Pattern::compile("test/{pk:int}/").unwrap();
        assert!(p.matches("test/3/"));
        assert!(!p.matches("test/abc/"));

        let params = RouteParams::new().with("pk", "12345");
        assert_eq!(p.expand(&params).as_deref(), Some("/test/12345/"));
        assert_eq!(p.expand(&RouteParams::new().with("pk", "x")), None);
    }

    #[test]
    fn test_expand_requires_exact_names() {
        let p = Pattern::compile("test/{slug:slug}/").unwrap();
        assert_eq!(p.expand(&RouteParams::new().with("still", "invalid")), None);
        assert_eq!(p.expand(&RouteParams::new()), None);
        assert_eq!(
            p.expand(&RouteParams::new().with("slug", "a").with("extra", "b")),
            None
        );
        assert_eq!(
            p.expand(&RouteParams::new().with("slug", "test-it-works"))
                .as_deref(),
            Some("/test/test-it-works/")
        );
    }

    #[test]
    fn test_str_and_path_encoding() {
        let p = Pattern::compile("docs/{page}/").unwrap();
        assert_eq!(
            p.expand(&RouteParams::new().with("page", "a b")).as_deref(),
            Some("/docs/a%20b/")
        );
        assert_eq!(p.expand(&RouteParams::new().with("page", "a/b")), None);

        let p = Pattern::compile("files/{rest:path}").unwrap();
        assert!(p.matches("files/a/b.txt"));
        assert_eq!(
            p.expand(&RouteParams::new().with("rest", "a/b c.txt")).as_deref(),
            Some("/files/a/b%20c.txt")
        );
    }

    #[test]
    fn test_literal_regex_chars_escaped() {
        let p = Pattern::compile("a.b/").unwrap();
        assert!(p.matches("a.b/"));
        assert!(!p.matches("axb/"));
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(
            Pattern::compile("test/{pk"),
            Err(PatternError::Unclosed(_))
        ));
        assert!(matches!(
            Pattern::compile("test/pk}/"),
            Err(PatternError::Unopened(_))
        ));
        assert!(matches!(
            Pattern::compile("test/{1pk}/"),
            Err(PatternError::BadName { .. })
        ));
        assert!(matches!(
            Pattern::compile("test/{pk:float}/"),
            Err(PatternError::UnknownConverter { .. })
        ));
        assert!(matches!(
            Pattern::compile("{a}/{a}/"),
            Err(PatternError::Duplicate { .. })
        ));
    }
}

//! Template adapters.
//!
//! Two tags are recognised in text passed to [`render`]:
//!
//! ```text
//! <a href="{% mapped_url 'terms' %}">Terms</a>
//! {{ 'terms'|is_mapped_url }}     -> True / False
//! ```
//!
//! Keys may be quoted with `'` or `"`. Everything else is copied verbatim.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::ResolveContext;
use crate::engine::{ResolveError, UrlMapper};

/// Resolve a key, exactly like [`UrlMapper::resolve`].
pub fn mapped_url(
    mapper: &UrlMapper,
    key: &str,
    context: Option<&ResolveContext>,
) -> Result<String, ResolveError> {
    mapper.resolve(key, context)
}

/// Whether a key is mapped, exactly like [`UrlMapper::is_mapped`].
pub fn is_mapped_url(mapper: &UrlMapper, key: &str) -> bool {
    mapper.is_mapped(key)
}

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"\{%[ \t]*mapped_url[ \t]+(?:'(?P<url_sq>[^']*)'|"(?P<url_dq>[^"]*)")[ \t]*%\}"#,
        "|",
        r#"\{\{[ \t]*(?:'(?P<is_sq>[^']*)'|"(?P<is_dq>[^"]*)")[ \t]*\|[ \t]*is_mapped_url[ \t]*\}\}"#,
    ))
    .expect("template tag regex is valid")
});

/// Expand every tag in `text`.
///
/// The first resolution error aborts rendering (only possible when the
/// registry raises on error).
pub fn render(
    mapper: &UrlMapper,
    text: &str,
    context: Option<&ResolveContext>,
) -> Result<String, ResolveError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in TAG.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&expand(mapper, &caps, context)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

fn expand(
    mapper: &UrlMapper,
    caps: &Captures<'_>,
    context: Option<&ResolveContext>,
) -> Result<String, ResolveError> {
    let group = |names: [&str; 2]| {
        names
            .into_iter()
            .find_map(|name| caps.name(name))
            .map(|m| m.as_str())
    };

    if let Some(key) = group(["url_sq", "url_dq"]) {
        return mapped_url(mapper, key, context);
    }
    let key = group(["is_sq", "is_dq"]).unwrap_or_default();
    Ok(if is_mapped_url(mapper, key) { "True" } else { "False" }.to_string())
}

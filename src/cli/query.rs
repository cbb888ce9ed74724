//! Read-only commands: resolve, check, render, keys, list.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::ContextArgs;
use crate::core::ResolveContext;
use crate::engine::UrlMapper;
use crate::logger::Table;
use crate::mapping::MappingKind;
use crate::template;

impl ContextArgs {
    /// Request context, or `None` when no context flag was given.
    pub fn to_context(&self) -> Option<ResolveContext> {
        if self.path.is_none() && self.values.is_empty() {
            return None;
        }
        let base = match &self.path {
            Some(path) => ResolveContext::new().with_path(path.clone()),
            None => ResolveContext::new(),
        };
        Some(
            self.values
                .iter()
                .fold(base, |ctx, (name, value)| ctx.with_value(name.clone(), value.clone())),
        )
    }
}

/// Print the URL a key resolves to (an empty line when unmapped).
pub fn resolve_key(mapper: &UrlMapper, key: &str, context: &ContextArgs) -> Result<()> {
    let context = context.to_context();
    let url = mapper
        .resolve(key, context.as_ref())
        .with_context(|| format!("Failed to resolve '{key}'"))?;
    println!("{url}");
    Ok(())
}

/// Print `True`/`False`; returns whether the key is mapped.
pub fn check_key(mapper: &UrlMapper, key: &str) -> bool {
    let mapped = mapper.is_mapped(key);
    println!("{}", if mapped { "True" } else { "False" });
    mapped
}

/// Expand template tags in a file (or stdin) and print the result.
pub fn render_file(mapper: &UrlMapper, file: &Path, context: &ContextArgs) -> Result<()> {
    let text = if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read template from stdin")?;
        text
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read template '{}'", file.display()))?
    };

    let context = context.to_context();
    let rendered = template::render(mapper, &text, context.as_ref())
        .with_context(|| format!("Failed to render '{}'", file.display()))?;
    print!("{rendered}");
    Ok(())
}

/// Print every known key and how it resolves.
pub fn list_keys(mapper: &UrlMapper) {
    let registry = mapper.registry();
    let mut table = Table::new(["key", "source", "mapped"]);
    for key in registry.known_keys() {
        let source = if registry.is_function_key(key) {
            "function"
        } else if mapper.store().exists(key) {
            "stored"
        } else {
            "-"
        };
        let mapped = if mapper.is_mapped(key) { "yes" } else { "no" };
        table.row([key, source, mapped]);
    }
    table.print();
}

/// Print stored mappings, function keys excluded.
pub fn list_mappings(mapper: &UrlMapper) {
    let records = mapper.list_visible();
    if records.is_empty() {
        crate::log!("list"; "no stored mappings");
        return;
    }

    let env = mapper.env();
    let mut table = Table::new(["key", "type", "url"]);
    for record in &records {
        table.row([
            record.key.clone(),
            MappingKind::label_of(record.mapping_kind()).to_string(),
            record.get_url(env),
        ]);
    }
    table.print();
}

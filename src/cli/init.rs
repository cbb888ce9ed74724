//! Configuration file generation.
//!
//! Creates `urlmapper.toml` with every section documented.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::{MapperConfig, StoreConfig};
use crate::log;

/// Sections without a scalar default, written as commented examples.
const COLLABORATOR_EXAMPLES: &str = r#"# [functions]
# home = { url = "/" }
# docs = { env = "DOCS_URL" }
# next = { context = "next", default = "/" }

# [[routes]]
# name = "page"
# pattern = "pages/{slug}/"

# [[objects]]
# type = "flatpages.flatpage"
# canonical_url = "/pages/{id}/"
# ids = [1, 2, 3]
"#;

/// Generate urlmapper.toml content with comments
pub fn generate_config_template() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "# urlmapper configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    // [mapper] section
    out.push_str(&MapperConfig::template_with_header());
    out.push('\n');

    // [store] section
    out.push_str(&StoreConfig::template_with_header());
    out.push('\n');

    out.push_str(COLLABORATOR_EXAMPLES);
    out
}

/// Write the default configuration; an existing file is left alone.
pub fn write_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }

    fs::write(path, generate_config_template())
        .with_context(|| format!("Failed to write config file '{}'", path.display()))
}

/// Run `init`. With `dry_run`, only prints the template to stdout.
pub fn new_config(path: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", generate_config_template());
        return Ok(());
    }

    write_config(path)?;
    log!("init"; "wrote {}", path.display());
    Ok(())
}

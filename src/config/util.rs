//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Locate the config file.
///
/// An absolute `config_name` is used as is. A relative one is looked up in
/// the working directory and then in each parent, so commands work from
/// anywhere below the project root.
///
/// ```text
/// /home/user/app/templates/blog/  ← cwd
/// /home/user/app/urlmapper.toml   ← found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

// ============================================================================
// tests
// ============================================================================

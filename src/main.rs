//! urlmapper - resolve symbolic keys to URLs and manage stored mappings.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};

use urlmapper::cli::{self, Cli, Commands};
use urlmapper::config::{UrlMapperConfig, find_config_file};
use urlmapper::engine::UrlMapper;
use urlmapper::{debug, log, logger};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // Every command but `init` needs a loaded config
    let mapper = || load_mapper(&cli);

    match &cli.command {
        Commands::Init { dry } => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            cli::init::new_config(&cwd.join(&cli.config), *dry)
        }
        Commands::Resolve { key, context } => cli::query::resolve_key(&mapper()?, key, context),
        Commands::Check { key } => {
            if !cli::query::check_key(&mapper()?, key) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Keys => {
            cli::query::list_keys(&mapper()?);
            Ok(())
        }
        Commands::List => {
            cli::query::list_mappings(&mapper()?);
            Ok(())
        }
        Commands::Set { args } => cli::edit::set_mapping(&mapper()?, args),
        Commands::Remove { key } => cli::edit::remove_mapping(&mapper()?, key),
        Commands::Validate => {
            if !cli::validate::validate_store(&mapper()?)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Render { file, context } => {
            cli::query::render_file(&mapper()?, file, context)
        }
    }
}

/// Locate the config file, load it and open the mapping store.
fn load_mapper(cli: &Cli) -> Result<UrlMapper> {
    let Some(path) = find_config_file(&cli.config) else {
        log!("error"; "config file '{}' not found, run `urlmapper init` to create one", cli.config.display());
        std::process::exit(1);
    };
    debug!("config"; "using {}", path.display());

    let config = UrlMapperConfig::load(&path)?;
    config.build()
}

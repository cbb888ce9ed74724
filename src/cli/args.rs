//! Command-line interface definitions.

use clap::{ArgGroup, ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve symbolic keys to URLs and manage stored mappings
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: urlmapper.toml)
    #[arg(short = 'C', long, global = true, default_value = "urlmapper.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a commented urlmapper.toml template
    #[command(visible_alias = "i")]
    Init {
        /// Print the template to stdout instead of writing it
        #[arg(long)]
        dry: bool,
    },

    /// Resolve a key to its URL
    #[command(visible_alias = "r")]
    Resolve {
        /// Key to resolve
        key: String,

        #[command(flatten)]
        context: ContextArgs,
    },

    /// Check whether a key is mapped (exit code 1 if not)
    #[command(visible_alias = "c")]
    Check {
        /// Key to check
        key: String,
    },

    /// List keys available for stored mappings
    #[command(visible_alias = "k")]
    Keys,

    /// List stored mappings
    #[command(visible_alias = "l")]
    List,

    /// Create or replace a stored mapping
    #[command(visible_alias = "s")]
    Set {
        #[command(flatten)]
        args: SetArgs,
    },

    /// Delete a stored mapping
    #[command(visible_alias = "rm")]
    Remove {
        /// Key whose mapping to delete
        key: String,
    },

    /// Re-check every stored mapping
    #[command(visible_alias = "v")]
    Validate,

    /// Expand mapped_url tags in a file and print the result
    Render {
        /// Template file (`-` for stdin)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        #[command(flatten)]
        context: ContextArgs,
    },
}

/// Request context passed to context-aware functions.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ContextArgs {
    /// Request path
    #[arg(long)]
    pub path: Option<String>,

    /// Extra context value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_context_value)]
    pub values: Vec<(String, String)>,
}

fn parse_context_value(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("`{s}` is not in the form NAME=VALUE"))?;
    if name.trim().is_empty() {
        return Err(format!("`{s}` has an empty name"));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

/// Set command arguments.
#[derive(clap::Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "object", "route"])))]
pub struct SetArgs {
    /// Key to map
    pub key: String,

    /// Map to a literal URL
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Map to an owning object, written TYPE:ID (e.g. flatpages.flatpage:1)
    #[arg(long, short = 'o', value_name = "TYPE:ID")]
    pub object: Option<String>,

    /// Map to a named route
    #[arg(long, short = 'r', value_name = "NAME")]
    pub route: Option<String>,

    /// Route parameters, written a=1, b=2
    #[arg(long, short = 'p', requires = "route", value_name = "PARAMS")]
    pub params: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve_with_context() {
        let cli = Cli::parse_from([
            "urlmapper", "resolve", "next", "--path", "/cart/", "--set", "next=/checkout/",
        ]);
        match cli.command {
            Commands::Resolve { key, context } => {
                assert_eq!(key, "next");
                assert_eq!(context.path.as_deref(), Some("/cart/"));
                assert_eq!(context.values, [("next".to_string(), "/checkout/".to_string())]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_set_requires_target() {
        assert!(Cli::try_parse_from(["urlmapper", "set", "terms"]).is_err());
        assert!(Cli::try_parse_from(["urlmapper", "set", "terms", "--params", "pk=1"]).is_err());

        let cli = Cli::try_parse_from([
            "urlmapper", "set", "terms", "--route", "test", "--params", "pk=1",
        ])
        .unwrap();
        let Commands::Set { args } = cli.command else {
            panic!("expected set");
        };
        assert_eq!(args.route.as_deref(), Some("test"));
        assert_eq!(args.params.as_deref(), Some("pk=1"));
    }

    #[test]
    fn test_parse_set_single_target() {
        assert!(
            Cli::try_parse_from(["urlmapper", "set", "terms", "--url", "/a/", "--route", "x"])
                .is_err()
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["urlmapper", "keys", "-C", "other.toml", "-v"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_init_keeps_config_path() {
        let cli = Cli::parse_from(["urlmapper", "-C", "conf/app.toml", "init", "--dry"]);
        assert!(matches!(cli.command, Commands::Init { dry: true }));
        assert_eq!(cli.config, PathBuf::from("conf/app.toml"));
    }

    #[test]
    fn test_context_value_parser() {
        assert_eq!(
            parse_context_value("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_context_value("novalue").is_err());
        assert!(parse_context_value("=x").is_err());
    }
}

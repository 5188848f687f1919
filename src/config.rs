//! Configuration management for the WebRelease language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Tag registry overlay locations

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the WebRelease language server
#[derive(Debug, Parser)]
#[command(name = "webrelease-ls")]
#[command(about = "Language server for WebRelease templates")]
#[command(version)]
pub struct Args {
    /// Extra tag registry to merge over the built-in tags
    #[arg(long, help = "TOML file with additional tag definitions")]
    pub registry: Option<PathBuf>,

    /// Skip the per-user registry overlay
    #[arg(long, help = "Do not load ~/.config/webrelease-ls/tags.toml")]
    pub no_user_registry: bool,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Registry overlay given on the command line; must load
    pub registry_file: Option<PathBuf>,
    /// Per-user registry overlay; loaded when present
    pub user_registry: Option<PathBuf>,
    /// Log level
    pub log_level: String,
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_file: None,
            user_registry: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let log_level = args.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            bail!("Unknown log level '{}'", args.log_level);
        }

        let user_registry = if args.no_user_registry {
            None
        } else {
            default_user_registry()
        };

        Ok(Config {
            registry_file: args.registry,
            user_registry,
            log_level,
        })
    }

    /// Install the logger on stderr. `RUST_LOG` wins over `--log-level`.
    pub fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(&self.log_level);
        // A second initialisation (tests, embedding) is harmless
        let _ = env_logger::Builder::from_env(env)
            .target(env_logger::Target::Stderr)
            .try_init();
    }
}

/// `<config dir>/webrelease-ls/tags.toml`
pub fn default_user_registry() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("webrelease-ls").join("tags.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let args = Args::try_parse_from(["webrelease-ls"]).unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.registry_file.is_none());
        assert_eq!(config.user_registry, default_user_registry());
    }

    #[test]
    fn test_explicit_registry_and_no_user_registry() {
        let args = Args::try_parse_from([
            "webrelease-ls",
            "--registry",
            "tags.toml",
            "--no-user-registry",
            "--log-level",
            "DEBUG",
        ])
        .unwrap();
        let config = Config::from_args(args).unwrap();
        assert_eq!(config.registry_file, Some(PathBuf::from("tags.toml")));
        assert!(config.user_registry.is_none());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let args = Args::try_parse_from(["webrelease-ls", "--log-level", "loud"]).unwrap();
        assert!(Config::from_args(args).is_err());
    }
}

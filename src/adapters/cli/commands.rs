//! CLI Command Definitions
//!
//! Argument parsing for the dex-alerts binary. Handlers live in `main.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::AlertCategory;

pub const DEFAULT_CONFIG_PATH: &str = "config/alerts.toml";

/// dex-alerts - DexScreener gainers and new-launch digests for Telegram
#[derive(Parser, Debug)]
#[command(
    name = "dex-alerts",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "DexScreener gainers and new-launch digests for Telegram",
    long_about = "dex-alerts polls DexScreener on a fixed interval, ranks Solana pairs into \
                  1h/6h/24h gainers and new launches, and posts one digest per category \
                  to a Telegram chat."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the alert loop
    Run(RunCmd),

    /// Run one collection and print the digests without sending
    Preview(PreviewCmd),
}

/// Start alert loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file (missing file means defaults)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Print digests to stdout instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Preview digests
#[derive(Parser, Debug)]
pub struct PreviewCmd {
    /// Path to configuration file (missing file means defaults)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Only render one category (1h, 6h, 24h, new)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<AlertCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_app_parse_run() {
        let args = vec!["dex-alerts", "run", "--config", "test.toml"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.config, PathBuf::from("test.toml"));
                assert!(!cmd.once);
                assert!(!cmd.dry_run);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_app_parse_run_once_dry() {
        let args = vec!["dex-alerts", "run", "--once", "--dry-run"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Run(cmd) => {
                assert!(cmd.once);
                assert!(cmd.dry_run);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_app_parse_preview() {
        let args = vec!["dex-alerts", "preview", "--category", "6h"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Preview(cmd) => {
                assert_eq!(cmd.category, Some(AlertCategory::Gainers6h));
                assert_eq!(cmd.config, PathBuf::from(DEFAULT_CONFIG_PATH));
            }
            _ => panic!("Expected Preview command"),
        }
    }

    #[test]
    fn test_cli_app_parse_preview_bad_category() {
        let args = vec!["dex-alerts", "preview", "--category", "weekly"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = vec!["dex-alerts", "--verbose", "run"];
        let app = CliApp::try_parse_from(args).unwrap();
        assert!(app.verbose);
        assert!(!app.debug);

        let args = vec!["dex-alerts", "preview", "--debug"];
        let app = CliApp::try_parse_from(args).unwrap();
        assert!(app.debug);
    }

    #[test]
    fn test_default_config_path() {
        let args = vec!["dex-alerts", "run"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Run(cmd) => assert_eq!(cmd.config, PathBuf::from("config/alerts.toml")),
            _ => panic!("Expected Run command"),
        }
    }
}

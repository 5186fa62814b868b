//! CLI Adapter
//!
//! Command-line interface for dex-alerts.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, PreviewCmd, RunCmd, DEFAULT_CONFIG_PATH};

/// Parse the process arguments
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}

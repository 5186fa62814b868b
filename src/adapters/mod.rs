//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - DexScreener: pair discovery API client
//! - Telegram: Bot API message delivery
//! - Console: stdout sink for dry runs and previews
//! - CLI: Command-line interface definitions

pub mod dexscreener;
pub mod telegram;
pub mod console;
pub mod cli;

#[cfg(test)]
pub(crate) mod http_stub;

pub use dexscreener::{DexScreenerClient, DexScreenerConfig};
pub use telegram::{TelegramConfig, TelegramNotifier};
pub use console::ConsoleSink;
pub use cli::CliApp;

//! Telegram Adapter
//!
//! Delivers rendered digests through the Bot API `sendMessage` method, with a
//! single plain-text retry when MarkdownV2 parsing is rejected.

mod client;

pub use client::{strip_markup, TelegramConfig, TelegramNotifier, DEFAULT_API_URL};

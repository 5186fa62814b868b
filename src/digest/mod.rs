//! Digest Module - Message formatting and rendering
//!
//! - `format`: value formatters (magnitude, percent, tiered price, age) and
//!   MarkdownV2 escaping
//! - `render`: one Telegram message per ranked alert

pub mod format;
pub mod render;

pub use format::{
    escape_markdown, format_age, format_magnitude, format_percent, format_price,
    MARKDOWN_RESERVED, NOT_AVAILABLE,
};
pub use render::{AlertRenderer, PairLinks};

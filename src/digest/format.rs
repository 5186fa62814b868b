//! Value formatting for alert messages
//!
//! Pure, total functions. A missing input renders as [`NOT_AVAILABLE`].

use chrono::{DateTime, Utc};

pub const NOT_AVAILABLE: &str = "N/A";

/// Characters Telegram MarkdownV2 reserves outside entities
pub const MARKDOWN_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Dollar amount with B/M/K suffix ("$1.25M", "$830.00")
pub fn format_magnitude(value: Option<f64>) -> String {
    let Some(num) = value else {
        return NOT_AVAILABLE.to_string();
    };

    if num >= 1e9 {
        format!("${:.2}B", num / 1e9)
    } else if num >= 1e6 {
        format!("${:.2}M", num / 1e6)
    } else if num >= 1e3 {
        format!("${:.2}K", num / 1e3)
    } else {
        format!("${:.2}", num)
    }
}

/// Signed percentage ("+12.50%", "-3.10%")
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(num) if num >= 0.0 => format!("+{:.2}%", num),
        Some(num) => format!("{:.2}%", num),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Price with precision tiered by magnitude
///
/// - below 0.00001: scientific, two decimals ("$4.20e-7", zero is "$0.00e+0")
/// - below 0.01: six decimals
/// - below 1: four decimals
/// - otherwise: two decimals
pub fn format_price(value: Option<f64>) -> String {
    let Some(num) = value else {
        return NOT_AVAILABLE.to_string();
    };

    if num < 0.00001 {
        format!("${}", scientific(num))
    } else if num < 0.01 {
        format!("${:.6}", num)
    } else if num < 1.0 {
        format!("${:.4}", num)
    } else {
        format!("${:.2}", num)
    }
}

/// Two-decimal scientific notation with a signed exponent
fn scientific(num: f64) -> String {
    let formatted = format!("{:.2e}", num);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Elapsed time since `created_at` in the coarsest fitting unit, truncated
///
/// Months are 30 days and years 365 days. Creation times in the future
/// render as "0m".
pub fn format_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created) = created_at else {
        return NOT_AVAILABLE.to_string();
    };

    let elapsed_ms = now.signed_duration_since(created).num_milliseconds().max(0);
    let hours = elapsed_ms as f64 / 3_600_000.0;

    if hours < 1.0 {
        format!("{}m", (hours * 60.0).floor() as u64)
    } else if hours < 24.0 {
        format!("{}h", hours.floor() as u64)
    } else if hours < 24.0 * 30.0 {
        format!("{}d", (hours / 24.0).floor() as u64)
    } else if hours < 24.0 * 365.0 {
        format!("{}mo", (hours / (24.0 * 30.0)).floor() as u64)
    } else {
        format!("{}y", (hours / (24.0 * 365.0)).floor() as u64)
    }
}

/// Backslash-escape every MarkdownV2 reserved character
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if MARKDOWN_RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

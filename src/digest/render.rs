//! Alert Renderer
//!
//! Turns one ranked list into a Telegram MarkdownV2 message body. Every
//! dynamic value goes through `escape_markdown` exactly once; the literal
//! markup (bold markers, link syntax, escaped separators) is written here.

use chrono::{DateTime, Utc};

use super::format::{
    escape_markdown, format_age, format_magnitude, format_percent, format_price,
};
use crate::domain::{AlertCategory, PairRecord, Window};
use crate::strategy::RankedAlert;

const UNKNOWN_SYMBOL: &str = "UNKNOWN";

#[derive(Debug, Clone)]
pub struct AlertRenderer {
    chain_id: String,
}

impl AlertRenderer {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
        }
    }

    /// Full message for one category
    pub fn render(&self, alert: &RankedAlert<'_>, now: DateTime<Utc>) -> String {
        let mut message = header(alert.category, alert.pairs.len(), now);
        for (index, pair) in alert.pairs.iter().enumerate() {
            message.push_str(&self.render_pair(index + 1, pair, now));
        }
        message
    }

    fn render_pair(&self, rank: usize, pair: &PairRecord, now: DateTime<Utc>) -> String {
        let raw_symbol = pair.symbol().unwrap_or(UNKNOWN_SYMBOL);
        let symbol = escape_markdown(raw_symbol);
        let price = escape_markdown(&format_price(pair.price_usd));
        let change_1h = escape_markdown(&format_percent(pair.price_change.get(Window::H1)));
        let change_6h = escape_markdown(&format_percent(pair.price_change.get(Window::H6)));
        let change_24h = escape_markdown(&format_percent(pair.price_change.get(Window::H24)));
        let mcap = escape_markdown(&format_magnitude(pair.market_cap_usd()));
        let vol_1h = escape_markdown(&format_magnitude(pair.volume.get(Window::H1)));
        let vol_6h = escape_markdown(&format_magnitude(pair.volume.get(Window::H6)));
        let age = escape_markdown(&format_age(pair.created_at, now));

        let links = PairLinks::new(&self.chain_id, pair);

        let mut block = String::new();
        block.push_str(&format!("*{}\\. {}* \\| {}\n", rank, symbol, price));
        block.push_str(&format!(
            "📈 1h: {} \\| 6h: {} \\| 24h: {}\n",
            change_1h, change_6h, change_24h
        ));
        block.push_str(&format!("💰 MCap: {}\n", mcap));
        block.push_str(&format!("📊 Vol 1h: {} \\| 6h: {}\n", vol_1h, vol_6h));
        block.push_str(&format!("⏰ Age: {}\n", age));
        block.push_str(&format!(
            "🔗 [DexScreener]({}) \\| [Axiom]({}) \\| [Twitter]({})\n\n\n",
            links.dexscreener, links.axiom, links.twitter
        ));
        block
    }
}

fn header(category: AlertCategory, count: usize, now: DateTime<Utc>) -> String {
    let timestamp = format!("{} UTC", now.format("%H:%M"));
    match category.gainer_window() {
        Some(window) => {
            let (emoji, title) = match window {
                Window::H1 => ("⚡", "1 HOUR"),
                Window::H6 => ("📈", "6 HOUR"),
                Window::H24 => ("🔥", "24 HOUR"),
            };
            format!(
                "{} *TOP {} GAINERS \\- {}* \\- {}\n\n",
                emoji, count, title, timestamp
            )
        }
        None => format!(
            "🆕 *TOP {} NEW LAUNCHES \\(<24hrs\\)* \\- {}\n\n",
            count, timestamp
        ),
    }
}

/// Navigation links derived from the base token
#[derive(Debug, Clone, PartialEq)]
pub struct PairLinks {
    pub dexscreener: String,
    pub axiom: String,
    pub twitter: String,
}

impl PairLinks {
    pub fn new(chain_id: &str, pair: &PairRecord) -> Self {
        let address = pair.token_address().as_str();
        let symbol = pair.symbol().unwrap_or_default();
        Self {
            dexscreener: format!("https://dexscreener.com/{}/{}", chain_id, address),
            axiom: format!("https://axiom.trade/t/{}", address),
            twitter: format!("https://twitter.com/search?q={}", query_component(&format!("${}", symbol))),
        }
    }
}

/// Form-encode a query value; the result never contains `)` or `\`,
/// which would end or break a MarkdownV2 link target
fn query_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

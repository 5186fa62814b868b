//! DexScreener wire types
//!
//! The upstream payloads are loosely typed: any field may be missing or null,
//! and numeric fields arrive either as JSON numbers or as decimal strings.
//! Every field is optional here and conversion into domain types decides
//! what is required.

use chrono::DateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{PairRecord, Window};
use crate::ports::TokenListing;

/// Accept a number, a numeric string, or null
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    let number = value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    Ok(number.filter(|x| x.is_finite()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseTokenPayload {
    pub address: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowPayload {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h6: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h24: Option<f64>,
}

impl WindowPayload {
    fn get(&self, window: Window) -> Option<f64> {
        match window {
            Window::H1 => self.h1,
            Window::H6 => self.h6,
            Window::H24 => self.h24,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiquidityPayload {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub usd: Option<f64>,
}

/// One pair as returned by search and token lookups
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairPayload {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<BaseTokenPayload>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
    pub price_change: Option<WindowPayload>,
    pub liquidity: Option<LiquidityPayload>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_cap: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fdv: Option<f64>,
    pub volume: Option<WindowPayload>,
    /// Milliseconds since the epoch
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pair_created_at: Option<f64>,
}

impl PairPayload {
    /// Convert into a domain record.
    ///
    /// Returns `None` when the pair address, chain or base token address is
    /// missing, since such a pair can be neither deduplicated nor linked.
    pub fn into_record(self) -> Option<PairRecord> {
        let pair_address = non_empty(self.pair_address)?;
        let chain_id = non_empty(self.chain_id)?;
        let base = self.base_token.unwrap_or_default();
        let token_address = non_empty(base.address)?;

        let mut record = PairRecord::new(pair_address, chain_id, token_address);
        record.base_token.symbol = non_empty(base.symbol);
        record.dex_id = non_empty(self.dex_id);
        record.price_usd = self.price_usd;
        record.liquidity_usd = self.liquidity.and_then(|l| l.usd);
        record.market_cap = self.market_cap;
        record.fdv = self.fdv;

        let changes = self.price_change.unwrap_or_default();
        let volume = self.volume.unwrap_or_default();
        for window in Window::ALL {
            record.price_change.set(window, changes.get(window));
            record.volume.set(window, volume.get(window));
        }

        record.created_at = self
            .pair_created_at
            .filter(|ms| *ms > 0.0)
            .and_then(|ms| DateTime::from_timestamp_millis(ms as i64));

        Some(record)
    }
}

/// `/latest/dex/search` envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub pairs: Option<Vec<Value>>,
}

/// One entry of a profile or boost feed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    pub chain_id: Option<String>,
    pub token_address: Option<String>,
}

impl ListingPayload {
    pub fn into_listing(self) -> Option<TokenListing> {
        Some(TokenListing::new(
            non_empty(self.chain_id)?,
            non_empty(self.token_address)?,
        ))
    }
}

/// Convert a JSON array of pairs, skipping entries that fail to parse
pub fn parse_pairs(values: Vec<Value>) -> Vec<PairRecord> {
    let total = values.len();
    let records: Vec<PairRecord> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<PairPayload>(v).ok())
        .filter_map(PairPayload::into_record)
        .collect();

    if records.len() < total {
        tracing::debug!("Skipped {} of {} malformed pair entries", total - records.len(), total);
    }
    records
}

/// Convert a JSON array of listing entries, skipping unusable ones
pub fn parse_listings(values: Vec<Value>) -> Vec<TokenListing> {
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value::<ListingPayload>(v).ok())
        .filter_map(ListingPayload::into_listing)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_pair() -> Value {
        json!({
            "chainId": "solana",
            "dexId": "raydium",
            "url": "https://dexscreener.com/solana/pair111",
            "pairAddress": "pair111",
            "baseToken": { "address": "tok111", "name": "Dog Wif Cat", "symbol": "DWC" },
            "quoteToken": { "address": "So11111111111111111111111111111111111111112", "symbol": "SOL" },
            "priceNative": "0.0000123",
            "priceUsd": "0.002345",
            "txns": { "h1": { "buys": 10, "sells": 4 } },
            "volume": { "h24": 912000.5, "h6": 210000, "h1": 41000 },
            "priceChange": { "h1": 12.5, "h6": -3.2, "h24": "45.1" },
            "liquidity": { "usd": 88000.25, "base": 1000, "quote": 20 },
            "fdv": 2400000,
            "marketCap": 2300000,
            "pairCreatedAt": 1700000000000u64
        })
    }

    #[test]
    fn test_full_pair_converts() {
        let record = parse_pairs(vec![sample_pair()]).remove(0);

        assert_eq!(record.pair_identity.as_str(), "pair111");
        assert_eq!(record.chain_id, "solana");
        assert_eq!(record.dex_id.as_deref(), Some("raydium"));
        assert_eq!(record.symbol(), Some("DWC"));
        assert_eq!(record.token_address().as_str(), "tok111");
        assert_eq!(record.price_usd, Some(0.002345));
        assert_eq!(record.price_change.get(Window::H1), Some(12.5));
        assert_eq!(record.price_change.get(Window::H24), Some(45.1));
        assert_eq!(record.volume.get(Window::H6), Some(210000.0));
        assert_eq!(record.liquidity_usd, Some(88000.25));
        assert_eq!(record.market_cap, Some(2_300_000.0));
        assert_eq!(record.created_at, Some(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()));
    }

    #[test]
    fn test_sparse_pair_keeps_missing_fields_absent() {
        let value = json!({
            "chainId": "solana",
            "pairAddress": "p",
            "baseToken": { "address": "t" },
            "priceUsd": null,
            "priceChange": {},
            "pairCreatedAt": 0
        });
        let record = parse_pairs(vec![value]).remove(0);

        assert_eq!(record.symbol(), None);
        assert_eq!(record.price_usd, None);
        assert_eq!(record.price_change.get(Window::H1), None);
        assert_eq!(record.liquidity_usd, None);
        assert_eq!(record.market_cap_usd(), None);
        assert_eq!(record.created_at, None);
    }

    #[test]
    fn test_unusable_pairs_are_skipped() {
        let values = vec![
            json!({ "chainId": "solana", "baseToken": { "address": "t" } }),
            json!({ "chainId": "solana", "pairAddress": "", "baseToken": { "address": "t" } }),
            json!({ "chainId": "solana", "pairAddress": "p" }),
            json!({ "chainId": "solana", "pairAddress": "p", "baseToken": "not-an-object" }),
            json!("garbage"),
            sample_pair(),
        ];

        let records = parse_pairs(values);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pair_identity.as_str(), "pair111");
    }

    #[test]
    fn test_non_numeric_strings_become_absent() {
        let value = json!({
            "chainId": "solana",
            "pairAddress": "p",
            "baseToken": { "address": "t" },
            "priceUsd": "n/a",
            "marketCap": true,
            "fdv": "150000"
        });
        let record = parse_pairs(vec![value]).remove(0);

        assert_eq!(record.price_usd, None);
        assert_eq!(record.market_cap, None);
        assert_eq!(record.market_cap_usd(), Some(150_000.0));
    }

    #[test]
    fn test_search_envelope_with_null_pairs() {
        let response: SearchResponse =
            serde_json::from_value(json!({ "schemaVersion": "1.0.0", "pairs": null })).unwrap();
        assert!(response.pairs.is_none());
    }

    #[test]
    fn test_listing_entries() {
        let values = vec![
            json!({
                "url": "https://dexscreener.com/solana/abc",
                "chainId": "solana",
                "tokenAddress": "abc",
                "amount": 100,
                "totalAmount": 500,
                "links": []
            }),
            json!({ "chainId": "base" }),
            json!({ "tokenAddress": "orphan" }),
            json!({ "chainId": "ethereum", "tokenAddress": "0xdef" }),
        ];

        let listings = parse_listings(values);
        assert_eq!(
            listings,
            vec![
                TokenListing::new("solana", "abc"),
                TokenListing::new("ethereum", "0xdef"),
            ]
        );
    }
}

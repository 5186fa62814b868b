//! Pair Records
//!
//! A `PairRecord` is one tradeable listing (token vs. reference asset on one DEX)
//! as seen in a single discovery snapshot. Every market field is optional: the
//! aggregator omits data freely, and each consumer decides how a gap is treated.
//!
//! Fallback rules:
//! - `market_cap_usd()` falls back to fully-diluted valuation when market cap is
//!   absent or zero
//! - `liquidity_or_zero()` treats missing liquidity as 0 (fails any minimum)
//! - `age_hours()` treats a missing creation time as infinitely old

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque on-chain token address, scoped to one network
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenIdentifier(String);

impl TokenIdentifier {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenIdentifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Pair (pool) address - the deduplication key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairIdentity(String);

impl PairIdentity {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookback window for price change and volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    H1,
    H6,
    H24,
}

impl Window {
    pub const ALL: [Window; 3] = [Window::H1, Window::H6, Window::H24];

    /// Short label used in messages ("1h", "6h", "24h")
    pub fn label(&self) -> &'static str {
        match self {
            Window::H1 => "1h",
            Window::H6 => "6h",
            Window::H24 => "24h",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One optional value per window; entries are independently absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowValues {
    pub h1: Option<f64>,
    pub h6: Option<f64>,
    pub h24: Option<f64>,
}

impl WindowValues {
    pub fn new(h1: Option<f64>, h6: Option<f64>, h24: Option<f64>) -> Self {
        Self { h1, h6, h24 }
    }

    pub fn get(&self, window: Window) -> Option<f64> {
        match window {
            Window::H1 => self.h1,
            Window::H6 => self.h6,
            Window::H24 => self.h24,
        }
    }

    /// Value for `window`, with a missing entry counted as zero
    pub fn get_or_zero(&self, window: Window) -> f64 {
        self.get(window).unwrap_or(0.0)
    }

    pub fn set(&mut self, window: Window, value: Option<f64>) {
        match window {
            Window::H1 => self.h1 = value,
            Window::H6 => self.h6 = value,
            Window::H24 => self.h24 = value,
        }
    }
}

/// Base token of a pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseToken {
    pub address: TokenIdentifier,
    /// Ticker, if the aggregator reported one
    pub symbol: Option<String>,
}

/// A single pair snapshot from one discovery cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub pair_identity: PairIdentity,
    pub chain_id: String,
    pub dex_id: Option<String>,
    pub base_token: BaseToken,
    pub price_usd: Option<f64>,
    pub price_change: WindowValues,
    pub liquidity_usd: Option<f64>,
    pub market_cap: Option<f64>,
    pub fdv: Option<f64>,
    pub volume: WindowValues,
    pub created_at: Option<DateTime<Utc>>,
}

impl PairRecord {
    /// Create a record with only identity fields set
    pub fn new(
        pair_identity: impl Into<String>,
        chain_id: impl Into<String>,
        token_address: impl Into<String>,
    ) -> Self {
        Self {
            pair_identity: PairIdentity::new(pair_identity),
            chain_id: chain_id.into(),
            dex_id: None,
            base_token: BaseToken {
                address: TokenIdentifier::new(token_address),
                symbol: None,
            },
            price_usd: None,
            price_change: WindowValues::default(),
            liquidity_usd: None,
            market_cap: None,
            fdv: None,
            volume: WindowValues::default(),
            created_at: None,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.base_token.symbol = Some(symbol.into());
        self
    }

    pub fn with_price(mut self, price_usd: f64) -> Self {
        self.price_usd = Some(price_usd);
        self
    }

    pub fn with_price_change(mut self, window: Window, pct: f64) -> Self {
        self.price_change.set(window, Some(pct));
        self
    }

    pub fn with_liquidity(mut self, usd: f64) -> Self {
        self.liquidity_usd = Some(usd);
        self
    }

    pub fn with_market_cap(mut self, usd: f64) -> Self {
        self.market_cap = Some(usd);
        self
    }

    pub fn with_fdv(mut self, usd: f64) -> Self {
        self.fdv = Some(usd);
        self
    }

    pub fn with_volume(mut self, window: Window, usd: f64) -> Self {
        self.volume.set(window, Some(usd));
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn symbol(&self) -> Option<&str> {
        self.base_token.symbol.as_deref()
    }

    pub fn token_address(&self) -> &TokenIdentifier {
        &self.base_token.address
    }

    /// Market cap, falling back to FDV when market cap is missing or zero
    pub fn market_cap_usd(&self) -> Option<f64> {
        match self.market_cap {
            Some(mcap) if mcap != 0.0 => Some(mcap),
            _ => self.fdv,
        }
    }

    pub fn market_cap_or_zero(&self) -> f64 {
        self.market_cap_usd().unwrap_or(0.0)
    }

    pub fn liquidity_or_zero(&self) -> f64 {
        self.liquidity_usd.unwrap_or(0.0)
    }

    /// Hours since the pair was created; `f64::INFINITY` when unknown
    pub fn age_hours(&self, now: DateTime<Utc>) -> f64 {
        match self.created_at {
            Some(created) => {
                let elapsed = now.signed_duration_since(created);
                elapsed.num_milliseconds() as f64 / 3_600_000.0
            }
            None => f64::INFINITY,
        }
    }

    pub fn is_on_chain(&self, chain_id: &str) -> bool {
        self.chain_id.eq_ignore_ascii_case(chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_market_cap_prefers_primary() {
        let pair = PairRecord::new("p", "solana", "t")
            .with_market_cap(400_000.0)
            .with_fdv(900_000.0);
        assert_eq!(pair.market_cap_usd(), Some(400_000.0));
    }

    #[test]
    fn test_market_cap_falls_back_to_fdv() {
        let pair = PairRecord::new("p", "solana", "t").with_fdv(900_000.0);
        assert_eq!(pair.market_cap_usd(), Some(900_000.0));

        let zero_mcap = PairRecord::new("p", "solana", "t")
            .with_market_cap(0.0)
            .with_fdv(700_000.0);
        assert_eq!(zero_mcap.market_cap_usd(), Some(700_000.0));
    }

    #[test]
    fn test_market_cap_absent() {
        let pair = PairRecord::new("p", "solana", "t");
        assert_eq!(pair.market_cap_usd(), None);
        assert_eq!(pair.market_cap_or_zero(), 0.0);
    }

    #[test]
    fn test_age_hours_known() {
        let pair = PairRecord::new("p", "solana", "t")
            .with_created_at(now() - Duration::minutes(90));
        assert_eq!(pair.age_hours(now()), 1.5);
    }

    #[test]
    fn test_age_hours_unknown_is_infinite() {
        let pair = PairRecord::new("p", "solana", "t");
        assert!(pair.age_hours(now()).is_infinite());
    }

    #[test]
    fn test_window_values_zero_treatment() {
        let values = WindowValues::new(Some(12.5), None, Some(-3.0));
        assert_eq!(values.get(Window::H1), Some(12.5));
        assert_eq!(values.get(Window::H6), None);
        assert_eq!(values.get_or_zero(Window::H6), 0.0);
        assert_eq!(values.get_or_zero(Window::H24), -3.0);
    }

    #[test]
    fn test_chain_match_is_case_insensitive() {
        let pair = PairRecord::new("p", "Solana", "t");
        assert!(pair.is_on_chain("solana"));
        assert!(!pair.is_on_chain("ethereum"));
    }
}

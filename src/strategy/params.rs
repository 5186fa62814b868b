//! Ranking Parameters
//!
//! Thresholds for the four alert pipelines. Defaults split pairs at 24 hours:
//! established pairs need $50k liquidity and a $300k-$50M market cap, new
//! pairs need $25k liquidity and at least $300k market cap.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RankingConfigError {
    #[error("top_n must be > 0")]
    ZeroTopN,
    #[error("max_age_new_hours must be > 0, got {0}")]
    InvalidAgeSplit(f64),
    #[error("{field} must be >= 0, got {value}")]
    NegativeThreshold { field: &'static str, value: f64 },
    #[error("market cap window is empty: min {min} > max {max}")]
    EmptyMarketCapWindow { min: f64, max: f64 },
}

/// Immutable thresholds shared by every ranking pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Records per alert
    pub top_n: usize,
    /// Age split between "new" and "established" pairs
    pub max_age_new_hours: f64,
    /// Minimum liquidity for pairs older than the split
    pub min_liquidity_established: f64,
    /// Minimum liquidity for pairs younger than the split
    pub min_liquidity_new: f64,
    /// Market cap floor for every category
    pub min_market_cap: f64,
    /// Market cap ceiling for established pairs
    pub max_market_cap_established: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            max_age_new_hours: 24.0,
            min_liquidity_established: 50_000.0,
            min_liquidity_new: 25_000.0,
            min_market_cap: 300_000.0,
            max_market_cap_established: 50_000_000.0,
        }
    }
}

impl RankingConfig {
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_min_liquidity_established(mut self, usd: f64) -> Self {
        self.min_liquidity_established = usd;
        self
    }

    pub fn with_min_liquidity_new(mut self, usd: f64) -> Self {
        self.min_liquidity_new = usd;
        self
    }

    pub fn with_market_cap_window(mut self, min: f64, max: f64) -> Self {
        self.min_market_cap = min;
        self.max_market_cap_established = max;
        self
    }

    pub fn validate(&self) -> Result<(), RankingConfigError> {
        if self.top_n == 0 {
            return Err(RankingConfigError::ZeroTopN);
        }
        if !(self.max_age_new_hours > 0.0) {
            return Err(RankingConfigError::InvalidAgeSplit(self.max_age_new_hours));
        }
        for (field, value) in [
            ("min_liquidity_established", self.min_liquidity_established),
            ("min_liquidity_new", self.min_liquidity_new),
            ("min_market_cap", self.min_market_cap),
            ("max_market_cap_established", self.max_market_cap_established),
        ] {
            if value < 0.0 {
                return Err(RankingConfigError::NegativeThreshold { field, value });
            }
        }
        if self.min_market_cap > self.max_market_cap_established {
            return Err(RankingConfigError::EmptyMarketCapWindow {
                min: self.min_market_cap,
                max: self.max_market_cap_established,
            });
        }
        Ok(())
    }
}

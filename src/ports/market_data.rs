//! Market data port
//!
//! Read-only queries against a pair aggregator. Implementations convert wire
//! shapes into domain `PairRecord`s and must not filter by chain: callers
//! apply the chain filter themselves.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::{PairRecord, TokenIdentifier};

#[cfg(test)]
use mockall::automock;

/// Upstream limit on addresses per batch lookup
pub const MAX_BATCH_SIZE: usize = 30;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Listing-style feeds that return bare token identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingFeed {
    LatestProfiles,
    LatestBoosts,
    TopBoosts,
}

impl ListingFeed {
    pub const ALL: [ListingFeed; 3] = [
        ListingFeed::LatestProfiles,
        ListingFeed::LatestBoosts,
        ListingFeed::TopBoosts,
    ];
}

impl fmt::Display for ListingFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ListingFeed::LatestProfiles => "latest profiles",
            ListingFeed::LatestBoosts => "latest boosts",
            ListingFeed::TopBoosts => "top boosts",
        };
        f.write_str(name)
    }
}

/// One entry of a listing feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenListing {
    pub chain_id: String,
    pub token_address: TokenIdentifier,
}

impl TokenListing {
    pub fn new(chain_id: impl Into<String>, token_address: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            token_address: TokenIdentifier::new(token_address),
        }
    }

    pub fn is_on_chain(&self, chain_id: &str) -> bool {
        self.chain_id.eq_ignore_ascii_case(chain_id)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Token identifiers from a listing feed (profiles, boosts)
    async fn listings(&self, feed: ListingFeed) -> Result<Vec<TokenListing>, MarketDataError>;

    /// Pairs matching a free-text search
    async fn search_pairs(&self, query: &str) -> Result<Vec<PairRecord>, MarketDataError>;

    /// Best pairs for a batch of token addresses on one chain
    async fn token_pairs(
        &self,
        chain_id: &str,
        addresses: &[TokenIdentifier],
    ) -> Result<Vec<PairRecord>, MarketDataError>;
}

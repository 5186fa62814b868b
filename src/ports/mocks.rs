use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;

use super::market_data::{ListingFeed, MarketDataError, MarketDataPort, TokenListing};
use super::notifier::{AlertSink, DeliveryReceipt, NotifierError};
use super::pacing::Pacer;
use crate::domain::{PairRecord, TokenIdentifier};

/// A call made against `StaticMarketData`
#[derive(Debug, Clone, PartialEq)]
pub enum MarketDataCall {
    Listings(ListingFeed),
    Search(String),
    TokenPairs { chain_id: String, addresses: Vec<String> },
}

/// Canned market data that records every call
#[derive(Debug, Default, Clone)]
pub struct StaticMarketData {
    calls: Arc<Mutex<Vec<MarketDataCall>>>,
    listings: HashMap<ListingFeed, Vec<TokenListing>>,
    searches: HashMap<String, Vec<PairRecord>>,
    token_pairs: Vec<PairRecord>,
    failing_feeds: HashSet<ListingFeed>,
    failing_searches: HashSet<String>,
    fail_token_pairs: bool,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the entries of a listing feed
    pub fn with_listings(mut self, feed: ListingFeed, listings: Vec<TokenListing>) -> Self {
        self.listings.insert(feed, listings);
        self
    }

    /// Builder method to set the result of a search term
    pub fn with_search(mut self, query: &str, pairs: Vec<PairRecord>) -> Self {
        self.searches.insert(query.to_string(), pairs);
        self
    }

    /// Pairs served by batch lookups, matched on base token address
    pub fn with_token_pairs(mut self, pairs: Vec<PairRecord>) -> Self {
        self.token_pairs = pairs;
        self
    }

    pub fn with_failing_feed(mut self, feed: ListingFeed) -> Self {
        self.failing_feeds.insert(feed);
        self
    }

    pub fn with_failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_string());
        self
    }

    pub fn with_failing_token_pairs(mut self) -> Self {
        self.fail_token_pairs = true;
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<MarketDataCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MarketDataCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataPort for StaticMarketData {
    async fn listings(&self, feed: ListingFeed) -> Result<Vec<TokenListing>, MarketDataError> {
        self.record(MarketDataCall::Listings(feed));
        if self.failing_feeds.contains(&feed) {
            return Err(MarketDataError::Status {
                endpoint: feed.to_string(),
                status: 503,
            });
        }
        Ok(self.listings.get(&feed).cloned().unwrap_or_default())
    }

    async fn search_pairs(&self, query: &str) -> Result<Vec<PairRecord>, MarketDataError> {
        self.record(MarketDataCall::Search(query.to_string()));
        if self.failing_searches.contains(query) {
            return Err(MarketDataError::Http(format!("connection reset for '{}'", query)));
        }
        Ok(self.searches.get(query).cloned().unwrap_or_default())
    }

    async fn token_pairs(
        &self,
        chain_id: &str,
        addresses: &[TokenIdentifier],
    ) -> Result<Vec<PairRecord>, MarketDataError> {
        self.record(MarketDataCall::TokenPairs {
            chain_id: chain_id.to_string(),
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
        });
        if self.fail_token_pairs {
            return Err(MarketDataError::RateLimited);
        }
        Ok(self
            .token_pairs
            .iter()
            .filter(|p| addresses.contains(p.token_address()))
            .cloned()
            .collect())
    }
}

/// Sink that keeps every delivered message
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
    reject_all: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to make every delivery fail
    pub fn rejecting() -> Self {
        Self {
            reject_all: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    async fn deliver(&self, message: &str) -> Result<DeliveryReceipt, NotifierError> {
        if self.reject_all {
            return Err(NotifierError::Rejected("can't parse entities".to_string()));
        }
        self.messages.lock().unwrap().push(message.to_string());
        Ok(DeliveryReceipt::Formatted)
    }
}

/// Pacer that records pauses instead of sleeping
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_market_data_records_calls() {
        let mock = StaticMarketData::new()
            .with_listings(ListingFeed::TopBoosts, vec![TokenListing::new("solana", "A")])
            .with_failing_search("broken");

        let listings = mock.listings(ListingFeed::TopBoosts).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert!(mock.search_pairs("broken").await.is_err());

        assert_eq!(
            mock.get_calls(),
            vec![
                MarketDataCall::Listings(ListingFeed::TopBoosts),
                MarketDataCall::Search("broken".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_token_pairs_match_requested_addresses() {
        let mock = StaticMarketData::new().with_token_pairs(vec![
            PairRecord::new("p1", "solana", "A"),
            PairRecord::new("p2", "solana", "B"),
        ]);

        let pairs = mock
            .token_pairs("solana", &[TokenIdentifier::new("B")])
            .await
            .unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].pair_identity.as_str(), "p2");
    }

    #[tokio::test]
    async fn test_recording_sink_and_pacer() {
        let sink = RecordingSink::new();
        assert_eq!(sink.deliver("hello").await.unwrap(), DeliveryReceipt::Formatted);
        assert_eq!(sink.messages(), vec!["hello".to_string()]);

        assert!(RecordingSink::rejecting().deliver("x").await.is_err());

        let pacer = RecordingPacer::new();
        pacer.pause(Duration::from_millis(250)).await;
        assert_eq!(pacer.pauses(), vec![Duration::from_millis(250)]);
    }
}

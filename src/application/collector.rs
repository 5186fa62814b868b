//! Candidate Collector
//!
//! Queries every discovery source in sequence and gathers a raw pair list:
//! - listing feeds (profiles, boosts) contribute bare token identifiers
//! - search terms contribute inline pair records
//! - identifiers with no inline pair are resolved through batched lookups
//!
//! Every response is chain-filtered here. A failing source is logged and
//! recorded as a failed `SourceOutcome`; it never aborts collection.
//!
//! Features:
//! - Fixed pacing delay between successive upstream requests
//! - Overall cap on resolved identifiers (excess dropped, not queued)
//! - Per-request batch cap for detail lookups

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{PairRecord, TokenIdentifier};
use crate::ports::{ListingFeed, MarketDataPort, Pacer, MAX_BATCH_SIZE};

/// Default search terms, one per major Solana venue plus the chain ticker
pub const DEFAULT_SEARCH_TERMS: [&str; 4] =
    ["raydium solana", "jupiter solana", "orca solana", "SOL"];

#[derive(Debug, Error, PartialEq)]
pub enum DiscoveryConfigError {
    #[error("chain_id cannot be empty")]
    EmptyChain,
    #[error("batch_size must be 1..={max}, got {got}")]
    InvalidBatchSize { got: usize, max: usize },
    #[error("no discovery sources configured")]
    NoSources,
}

/// Discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Chain every record and listing must belong to
    pub chain_id: String,
    /// Free-text search queries
    pub search_terms: Vec<String>,
    /// Listing feeds to pull identifiers from
    pub listing_feeds: Vec<ListingFeed>,
    /// Addresses per batch lookup
    pub batch_size: usize,
    /// Identifiers resolved per cycle; the rest are dropped
    pub max_resolved_tokens: usize,
    /// Delay between successive source queries
    pub source_delay_ms: u64,
    /// Delay between successive batch lookups
    pub batch_delay_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            chain_id: "solana".to_string(),
            search_terms: DEFAULT_SEARCH_TERMS.iter().map(|s| s.to_string()).collect(),
            listing_feeds: ListingFeed::ALL.to_vec(),
            batch_size: MAX_BATCH_SIZE,
            max_resolved_tokens: 150,
            source_delay_ms: 250,
            batch_delay_ms: 200,
        }
    }
}

impl DiscoveryConfig {
    pub fn with_chain(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn with_search_terms(mut self, terms: &[&str]) -> Self {
        self.search_terms = terms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_listing_feeds(mut self, feeds: &[ListingFeed]) -> Self {
        self.listing_feeds = feeds.to_vec();
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_max_resolved_tokens(mut self, max: usize) -> Self {
        self.max_resolved_tokens = max;
        self
    }

    pub fn source_delay(&self) -> Duration {
        Duration::from_millis(self.source_delay_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn validate(&self) -> Result<(), DiscoveryConfigError> {
        if self.chain_id.trim().is_empty() {
            return Err(DiscoveryConfigError::EmptyChain);
        }
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(DiscoveryConfigError::InvalidBatchSize {
                got: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        if self.search_terms.is_empty() && self.listing_feeds.is_empty() {
            return Err(DiscoveryConfigError::NoSources);
        }
        Ok(())
    }
}

/// A single upstream query within one collection pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverySource {
    Listing(ListingFeed),
    Search(String),
    TokenBatch { index: usize, size: usize },
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverySource::Listing(feed) => write!(f, "{}", feed),
            DiscoverySource::Search(term) => write!(f, "search '{}'", term),
            DiscoverySource::TokenBatch { index, size } => {
                write!(f, "token batch #{} ({} addresses)", index + 1, size)
            }
        }
    }
}

/// What a successful source contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceYield {
    /// Pair records kept after the chain filter
    pub pairs: usize,
    /// New identifiers kept after the chain filter
    pub identifiers: usize,
    /// Entries dropped for belonging to another chain
    pub off_chain: usize,
}

/// Per-source result: data counts or the failure reason
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub source: DiscoverySource,
    pub result: Result<SourceYield, String>,
}

impl SourceOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Raw output of one collection pass
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Pairs in arrival order, not yet deduplicated
    pub pairs: Vec<PairRecord>,
    pub outcomes: Vec<SourceOutcome>,
    /// Identifiers skipped because of the resolution cap
    pub identifiers_dropped: usize,
}

impl CollectionReport {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| !o.is_success())
    }
}

pub struct CandidateCollector {
    market_data: Arc<dyn MarketDataPort>,
    pacer: Arc<dyn Pacer>,
    config: DiscoveryConfig,
}

impl CandidateCollector {
    pub fn new(
        market_data: Arc<dyn MarketDataPort>,
        pacer: Arc<dyn Pacer>,
        config: DiscoveryConfig,
    ) -> Result<Self, DiscoveryConfigError> {
        config.validate()?;
        Ok(Self {
            market_data,
            pacer,
            config,
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Run one collection pass over every configured source
    pub async fn collect(&self) -> CollectionReport {
        let chain = self.config.chain_id.as_str();
        let mut report = CollectionReport::default();
        let mut identifiers: Vec<TokenIdentifier> = Vec::new();
        let mut seen_identifiers: HashSet<TokenIdentifier> = HashSet::new();
        let mut requests = 0usize;

        for &feed in &self.config.listing_feeds {
            self.pace(&mut requests, self.config.source_delay()).await;
            let source = DiscoverySource::Listing(feed);

            let result = match self.market_data.listings(feed).await {
                Ok(listings) => {
                    let mut yielded = SourceYield::default();
                    for listing in listings {
                        if !listing.is_on_chain(chain) {
                            yielded.off_chain += 1;
                            continue;
                        }
                        if seen_identifiers.insert(listing.token_address.clone()) {
                            identifiers.push(listing.token_address);
                            yielded.identifiers += 1;
                        }
                    }
                    tracing::debug!(
                        "{}: {} new identifiers, {} off-chain",
                        source, yielded.identifiers, yielded.off_chain
                    );
                    Ok(yielded)
                }
                Err(e) => {
                    tracing::warn!("Discovery source {} failed: {}", source, e);
                    Err(e.to_string())
                }
            };
            report.outcomes.push(SourceOutcome { source, result });
        }

        for term in &self.config.search_terms {
            self.pace(&mut requests, self.config.source_delay()).await;
            let source = DiscoverySource::Search(term.clone());

            let result = match self.market_data.search_pairs(term).await {
                Ok(pairs) => {
                    let yielded = keep_on_chain(pairs, chain, &mut report.pairs);
                    tracing::debug!("{}: {} pairs, {} off-chain", source, yielded.pairs, yielded.off_chain);
                    Ok(yielded)
                }
                Err(e) => {
                    tracing::warn!("Discovery source {} failed: {}", source, e);
                    Err(e.to_string())
                }
            };
            report.outcomes.push(SourceOutcome { source, result });
        }

        let pending = self.pending_identifiers(identifiers, &report.pairs, &mut report.identifiers_dropped);

        for (index, batch) in pending.chunks(self.config.batch_size).enumerate() {
            let delay = if index == 0 {
                self.config.source_delay()
            } else {
                self.config.batch_delay()
            };
            self.pace(&mut requests, delay).await;
            let source = DiscoverySource::TokenBatch {
                index,
                size: batch.len(),
            };

            let result = match self.market_data.token_pairs(chain, batch).await {
                Ok(pairs) => Ok(keep_on_chain(pairs, chain, &mut report.pairs)),
                Err(e) => {
                    tracing::warn!("Discovery source {} failed: {}", source, e);
                    Err(e.to_string())
                }
            };
            report.outcomes.push(SourceOutcome { source, result });
        }

        let failed = report.failed_sources().count();
        tracing::info!(
            "Collected {} raw pairs from {} sources ({} failed)",
            report.pairs.len(),
            report.outcomes.len(),
            failed
        );
        if report.all_failed() {
            tracing::warn!("Every discovery source failed this cycle");
        }

        report
    }

    /// Identifiers still lacking a pair record, capped
    fn pending_identifiers(
        &self,
        identifiers: Vec<TokenIdentifier>,
        inline_pairs: &[PairRecord],
        dropped: &mut usize,
    ) -> Vec<TokenIdentifier> {
        let covered: HashSet<&TokenIdentifier> =
            inline_pairs.iter().map(|p| p.token_address()).collect();

        let mut pending: Vec<TokenIdentifier> = identifiers
            .into_iter()
            .filter(|id| !covered.contains(id))
            .collect();

        let cap = self.config.max_resolved_tokens;
        if pending.len() > cap {
            *dropped = pending.len() - cap;
            tracing::info!(
                "Resolving {} of {} identifiers ({} over cap dropped)",
                cap,
                pending.len(),
                *dropped
            );
            pending.truncate(cap);
        }
        pending
    }

    async fn pace(&self, requests: &mut usize, delay: Duration) {
        if *requests > 0 {
            self.pacer.pause(delay).await;
        }
        *requests += 1;
    }
}

fn keep_on_chain(pairs: Vec<PairRecord>, chain: &str, out: &mut Vec<PairRecord>) -> SourceYield {
    let mut yielded = SourceYield::default();
    for pair in pairs {
        if pair.is_on_chain(chain) {
            out.push(pair);
            yielded.pairs += 1;
        } else {
            yielded.off_chain += 1;
        }
    }
    yielded
}

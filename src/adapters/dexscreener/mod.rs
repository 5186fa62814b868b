//! DexScreener Adapter
//!
//! Pair discovery against the public DexScreener API:
//! - Listing feeds (latest profiles, latest and top boosts) yield bare token identifiers
//! - Keyword search yields full pair records
//! - Batched token lookups resolve identifiers into pair records
//!
//! Payloads are parsed leniently; malformed entries are skipped rather than
//! failing the whole response.

mod client;
mod types;

pub use client::{DexScreenerClient, DexScreenerConfig, DEFAULT_BASE_URL};
pub use types::{parse_listings, parse_pairs};

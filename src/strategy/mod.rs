//! Strategy Layer - Eligibility filters and ranking
//!
//! Pure, synchronous pipelines over a cycle's `CandidateSet`:
//! - `RankingConfig`: immutable thresholds (liquidity floors, market cap window, top N)
//! - `RankingEngine`: per-category filter -> sort -> truncate

pub mod params;
pub mod ranking;

pub use params::{RankingConfig, RankingConfigError};
pub use ranking::{RankedAlert, RankingEngine};

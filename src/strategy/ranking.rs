//! Eligibility & Ranking Engine
//!
//! Four independent pipelines over one `CandidateSet`, each:
//! filter -> stable sort (descending) -> truncate to `top_n`.
//!
//! | Category    | Eligibility                                         | Sort key       |
//! |-------------|-----------------------------------------------------|----------------|
//! | Gainers@W   | age > split, change[W] present, liq >= est-min,     | change[W]      |
//! |             | min mcap <= mcap <= est-max                         |                |
//! | NewLaunches | 0 < age <= split, liq >= new-min, mcap >= min mcap  | volume[6h]     |
//!
//! Unknown age counts as infinitely old, so such pairs can only ever be
//! gainers. Missing sort values count as zero. Ties keep input order.

use chrono::{DateTime, Utc};

use super::params::{RankingConfig, RankingConfigError};
use crate::domain::{AlertCategory, CandidateSet, PairRecord, Window};

/// Ranked output of one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct RankedAlert<'a> {
    pub category: AlertCategory,
    pub pairs: Vec<&'a PairRecord>,
    /// How many records passed the filter before truncation
    pub eligible: usize,
}

#[derive(Debug, Clone)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Result<Self, RankingConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Category predicate evaluated at `now`
    pub fn is_eligible(&self, pair: &PairRecord, category: AlertCategory, now: DateTime<Utc>) -> bool {
        let cfg = &self.config;
        let age_hours = pair.age_hours(now);
        let liquidity = pair.liquidity_or_zero();
        let mcap = pair.market_cap_or_zero();

        match category.gainer_window() {
            Some(window) => {
                age_hours > cfg.max_age_new_hours
                    && pair.price_change.get(window).is_some()
                    && liquidity >= cfg.min_liquidity_established
                    && mcap >= cfg.min_market_cap
                    && mcap <= cfg.max_market_cap_established
            }
            None => {
                age_hours <= cfg.max_age_new_hours
                    && age_hours > 0.0
                    && liquidity >= cfg.min_liquidity_new
                    && mcap >= cfg.min_market_cap
            }
        }
    }

    /// Descending sort key; missing values count as zero
    pub fn sort_key(pair: &PairRecord, category: AlertCategory) -> f64 {
        match category.gainer_window() {
            Some(window) => pair.price_change.get_or_zero(window),
            None => pair.volume.get_or_zero(Window::H6),
        }
    }

    /// Run one pipeline. `None` means nothing qualified: skip the alert.
    pub fn rank<'a>(
        &self,
        candidates: &'a CandidateSet,
        category: AlertCategory,
        now: DateTime<Utc>,
    ) -> Option<RankedAlert<'a>> {
        let mut eligible: Vec<&PairRecord> = candidates
            .iter()
            .filter(|pair| self.is_eligible(pair, category, now))
            .collect();

        if eligible.is_empty() {
            return None;
        }

        let eligible_count = eligible.len();
        // sort_by is stable, so equal keys keep first-seen order
        eligible.sort_by(|a, b| {
            Self::sort_key(b, category).total_cmp(&Self::sort_key(a, category))
        });
        eligible.truncate(self.config.top_n);

        Some(RankedAlert {
            category,
            pairs: eligible,
            eligible: eligible_count,
        })
    }

    /// Run every pipeline in delivery order
    pub fn rank_all<'a>(
        &self,
        candidates: &'a CandidateSet,
        now: DateTime<Utc>,
    ) -> Vec<(AlertCategory, Option<RankedAlert<'a>>)> {
        AlertCategory::ALL
            .iter()
            .map(|&category| (category, self.rank(candidates, category, now)))
            .collect()
    }
}

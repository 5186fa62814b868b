//! Candidate Set
//!
//! Deduplicated view of one cycle's raw pairs. At most one record per
//! `PairIdentity` survives; the first one seen wins and later duplicates are
//! discarded without inspection.

use std::collections::HashMap;

use super::pair::{PairIdentity, PairRecord};

/// Unique-by-pair collection built fresh every cycle
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    records: Vec<PairRecord>,
    index: HashMap<PairIdentity, usize>,
    duplicates_dropped: usize,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw list, keeping the first record for each identity
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = PairRecord>,
    {
        let mut set = Self::new();
        for pair in pairs {
            set.insert(pair);
        }
        set
    }

    /// Insert unless the identity is already present. Returns whether it was added.
    pub fn insert(&mut self, pair: PairRecord) -> bool {
        if self.index.contains_key(&pair.pair_identity) {
            self.duplicates_dropped += 1;
            return false;
        }
        self.index.insert(pair.pair_identity.clone(), self.records.len());
        self.records.push(pair);
        true
    }

    pub fn get(&self, identity: &PairIdentity) -> Option<&PairRecord> {
        self.index.get(identity).map(|&i| &self.records[i])
    }

    pub fn contains(&self, identity: &PairIdentity) -> bool {
        self.index.contains_key(identity)
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &PairRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many raw records were discarded as duplicates
    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }
}

impl FromIterator<PairRecord> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = PairRecord>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

//! Domain Layer - Pair snapshots and alert categories
//!
//! Pure types with no I/O. Everything here lives for exactly one discovery
//! cycle: records are built from an aggregator snapshot, read, filtered and
//! reordered, then dropped.

pub mod pair;
pub mod candidate_set;
pub mod category;

pub use pair::{BaseToken, PairIdentity, PairRecord, TokenIdentifier, Window, WindowValues};
pub use candidate_set::CandidateSet;
pub use category::AlertCategory;

//! Application Layer - Use cases
//!
//! - `collector`: one discovery pass over every configured source
//! - `orchestrator`: the scheduled collect, rank and deliver cycle

pub mod collector;
pub mod orchestrator;

pub use collector::{
    CandidateCollector, CollectionReport, DiscoveryConfig, DiscoveryConfigError, DiscoverySource,
    SourceOutcome, SourceYield,
};
pub use orchestrator::{AlertOrchestrator, AlertOutcome, CycleReport, OrchestratorConfig};

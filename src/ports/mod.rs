//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Market data queries (listing feeds, pair search, batch pair lookup)
//! - Alert delivery (chat webhook, console)
//! - Request pacing (timer-backed or recorded in tests)

pub mod market_data;
pub mod notifier;
pub mod pacing;
pub mod mocks;

pub use market_data::{ListingFeed, MarketDataError, MarketDataPort, TokenListing, MAX_BATCH_SIZE};
pub use notifier::{AlertSink, DeliveryReceipt, NotifierError};
pub use pacing::{Pacer, TokioPacer};

//! dex-alerts - DexScreener Gainers & New Launch Digests
//!
//! Polls DexScreener for Solana pairs on a fixed interval, ranks them into
//! four categories and posts one Telegram digest per category.
//!
//! # Modules
//!
//! - `domain`: Core records (PairRecord, CandidateSet, AlertCategory)
//! - `ports`: Trait abstractions (MarketDataPort, AlertSink, Pacer)
//! - `strategy`: Eligibility filters and ranking
//! - `digest`: Value formatting and MarkdownV2 rendering
//! - `adapters`: External implementations (DexScreener, Telegram, console, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Candidate collector and cycle orchestrator

pub mod domain;
pub mod ports;
pub mod strategy;
pub mod digest;
pub mod adapters;
pub mod config;
pub mod application;

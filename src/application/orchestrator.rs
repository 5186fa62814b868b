//! Alert Orchestrator
//!
//! Runs the alert cycle: collect -> dedup -> rank four categories -> deliver.
//! Cycles are serialized on a fixed interval; a cycle that overruns the
//! period delays the next one instead of overlapping it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Notify, RwLock};
use tokio::time::MissedTickBehavior;

use super::collector::CandidateCollector;
use crate::digest::AlertRenderer;
use crate::domain::{AlertCategory, CandidateSet};
use crate::ports::{AlertSink, DeliveryReceipt, Pacer};
use crate::strategy::RankingEngine;

/// Scheduling and delivery settings for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Period between cycle starts
    pub interval: Duration,
    /// Run the first cycle at startup instead of after one interval
    pub run_immediately: bool,
    /// Pause between successive category deliveries
    pub message_delay: Duration,
    /// Categories to process, in delivery order
    pub categories: Vec<AlertCategory>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            run_immediately: true,
            message_delay: Duration::from_secs(2),
            categories: AlertCategory::ALL.to_vec(),
        }
    }
}

/// What happened to one category in one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    /// Nothing passed the filter; no message
    Skipped,
    Delivered(DeliveryReceipt),
    /// Delivery failed after the fallback attempt
    Failed(String),
}

/// Summary of one cycle
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    /// Raw records before dedup
    pub raw_pairs: usize,
    /// Distinct records after dedup
    pub candidates: usize,
    pub failed_sources: usize,
    /// One entry per processed category; empty when the cycle was skipped
    pub outcomes: Vec<(AlertCategory, AlertOutcome)>,
}

impl CycleReport {
    /// True when collection produced nothing and no category was attempted
    pub fn was_skipped(&self) -> bool {
        self.candidates == 0
    }

    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, AlertOutcome::Delivered(_)))
            .count()
    }

    pub fn outcome(&self, category: AlertCategory) -> Option<&AlertOutcome> {
        self.outcomes
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, o)| o)
    }
}

/// Coordinates collection, ranking, rendering and delivery
pub struct AlertOrchestrator {
    collector: Arc<CandidateCollector>,
    engine: RankingEngine,
    renderer: AlertRenderer,
    sink: Arc<dyn AlertSink>,
    pacer: Arc<dyn Pacer>,
    config: OrchestratorConfig,
    is_running: Arc<RwLock<bool>>,
    shutdown: Arc<Notify>,
}

impl AlertOrchestrator {
    pub fn new(
        collector: CandidateCollector,
        engine: RankingEngine,
        sink: Arc<dyn AlertSink>,
        pacer: Arc<dyn Pacer>,
        config: OrchestratorConfig,
    ) -> Self {
        let renderer = AlertRenderer::new(collector.config().chain_id.clone());
        Self {
            collector: Arc::new(collector),
            engine,
            renderer,
            sink,
            pacer,
            config,
            is_running: Arc::new(RwLock::new(false)),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Run one full cycle evaluated at `now`
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleReport {
        tracing::info!("Alert cycle started at {}", now.to_rfc3339());

        let collection = self.collector.collect().await;
        let raw_pairs = collection.pairs.len();
        let failed_sources = collection.failed_sources().count();
        let candidates = CandidateSet::from_pairs(collection.pairs);

        let mut report = CycleReport {
            started_at: now,
            raw_pairs,
            candidates: candidates.len(),
            failed_sources,
            outcomes: Vec::new(),
        };

        if candidates.is_empty() {
            tracing::warn!("No pairs fetched, skipping this cycle");
            return report;
        }
        tracing::info!(
            "{} distinct pairs ({} duplicates dropped)",
            candidates.len(),
            candidates.duplicates_dropped()
        );

        for (index, &category) in self.config.categories.iter().enumerate() {
            if index > 0 {
                self.pacer.pause(self.config.message_delay).await;
            }

            let outcome = match self.engine.rank(&candidates, category, now) {
                None => {
                    tracing::info!("No pairs qualify for {}", category);
                    AlertOutcome::Skipped
                }
                Some(alert) => {
                    tracing::info!(
                        "Sending {} alert ({} of {} eligible)",
                        category,
                        alert.pairs.len(),
                        alert.eligible
                    );
                    let message = self.renderer.render(&alert, now);
                    match self.sink.deliver(&message).await {
                        Ok(receipt) => {
                            if receipt == DeliveryReceipt::PlainFallback {
                                tracing::warn!("{} alert delivered as plain text", category);
                            }
                            AlertOutcome::Delivered(receipt)
                        }
                        Err(e) => {
                            tracing::error!("Failed to deliver {} alert: {}", category, e);
                            AlertOutcome::Failed(e.to_string())
                        }
                    }
                }
            };
            report.outcomes.push((category, outcome));
        }

        tracing::info!(
            "Alert cycle completed: {}/{} categories delivered",
            report.delivered(),
            report.outcomes.len()
        );
        report
    }

    /// Run cycles on the configured interval until `stop` is called
    pub async fn run(&self) {
        *self.is_running.write().await = true;

        tracing::info!(
            "Starting alert orchestrator - interval: {:?}, categories: {}",
            self.config.interval,
            self.config.categories.len()
        );

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        if !self.config.run_immediately {
            // First tick of a tokio interval fires at once
            ticker.tick().await;
        }

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = self.shutdown.notified() => break,
            }
            if !*self.is_running.read().await {
                break;
            }

            self.run_cycle(Utc::now()).await;

            if !*self.is_running.read().await {
                break;
            }
        }

        tracing::info!("Alert orchestrator stopped");
    }

    /// Stop the loop after the current cycle
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
        self.shutdown.notify_one();
        tracing::info!("Stop signal sent to orchestrator");
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }
}

// Shares the running flag so a clone can stop the original from another task
impl Clone for AlertOrchestrator {
    fn clone(&self) -> Self {
        Self {
            collector: Arc::clone(&self.collector),
            engine: self.engine.clone(),
            renderer: self.renderer.clone(),
            sink: Arc::clone(&self.sink),
            pacer: Arc::clone(&self.pacer),
            config: self.config.clone(),
            is_running: Arc::clone(&self.is_running),
            shutdown: Arc::clone(&self.shutdown),
        }
    }
}

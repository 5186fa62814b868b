//! dex-alerts - DexScreener gainers and new-launch digests for Telegram

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use dex_alerts::adapters::cli::{self, Command, PreviewCmd, RunCmd};
use dex_alerts::adapters::{ConsoleSink, DexScreenerClient, TelegramNotifier};
use dex_alerts::application::{AlertOrchestrator, CandidateCollector, OrchestratorConfig};
use dex_alerts::config::{existing_config_path, load_config, Config};
use dex_alerts::ports::{AlertSink, MarketDataPort, Pacer, TokioPacer};
use dex_alerts::strategy::RankingEngine;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in the config file)
    dotenvy::dotenv().ok();

    let app = cli::init();

    let config_path = match &app.command {
        Command::Run(cmd) => cmd.config.clone(),
        Command::Preview(cmd) => cmd.config.clone(),
    };
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    init_logging(app.verbose, app.debug, &config.logging.level);
    if existing_config_path(&config_path).is_none() {
        tracing::info!("No config file at {}, using defaults", config_path.display());
    }

    match app.command {
        Command::Run(cmd) => run_command(cmd, config).await,
        Command::Preview(cmd) => preview_command(cmd, config).await,
    }
}

/// RUST_LOG wins, then --debug / --verbose, then the configured level
fn init_logging(verbose: bool, debug: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else if verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new(configured)
        }
    });

    fmt().with_env_filter(filter).init();
}

fn build_orchestrator(
    config: &Config,
    sink: Arc<dyn AlertSink>,
    orchestrator_config: OrchestratorConfig,
) -> Result<AlertOrchestrator> {
    let market_data: Arc<dyn MarketDataPort> = Arc::new(
        DexScreenerClient::with_config(config.dexscreener_config())
            .context("Failed to create DexScreener client")?,
    );
    let pacer: Arc<dyn Pacer> = Arc::new(TokioPacer);

    let collector = CandidateCollector::new(
        market_data,
        Arc::clone(&pacer),
        config.discovery.sources.clone(),
    )
    .context("Invalid discovery settings")?;
    let engine = RankingEngine::new(config.ranking.clone()).context("Invalid ranking settings")?;

    Ok(AlertOrchestrator::new(collector, engine, sink, pacer, orchestrator_config))
}

async fn run_command(cmd: RunCmd, config: Config) -> Result<()> {
    tracing::info!("Starting dex-alerts...");

    let sink: Arc<dyn AlertSink> = if cmd.dry_run {
        tracing::warn!("DRY RUN - digests are printed, not sent");
        Arc::new(ConsoleSink::new())
    } else {
        // Missing credentials end the process before any cycle runs
        let telegram = config
            .telegram_config()
            .context("Telegram credentials are required (set them in .env or the environment)")?;
        Arc::new(TelegramNotifier::new(telegram).context("Failed to create Telegram notifier")?)
    };

    let orchestrator_config = config.orchestrator_config();
    tracing::info!(
        "Chain: {} | interval: {}s | top {} | new launches < {}h",
        config.discovery.sources.chain_id,
        orchestrator_config.interval.as_secs(),
        config.ranking.top_n,
        config.ranking.max_age_new_hours
    );
    tracing::info!(
        "Min liquidity: ${:.0}k established, ${:.0}k new",
        config.ranking.min_liquidity_established / 1000.0,
        config.ranking.min_liquidity_new / 1000.0
    );

    let orchestrator = build_orchestrator(&config, sink, orchestrator_config)?;

    if cmd.once {
        let report = orchestrator.run_cycle(Utc::now()).await;
        tracing::info!(
            "Single cycle finished: {} candidates, {} delivered",
            report.candidates,
            report.delivered()
        );
        return Ok(());
    }

    // Setup Ctrl+C handler
    let orch = orchestrator.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        orch.stop().await;
    });

    orchestrator.run().await;
    tracing::info!("dex-alerts stopped");
    Ok(())
}

async fn preview_command(cmd: PreviewCmd, config: Config) -> Result<()> {
    let mut orchestrator_config = config.orchestrator_config();
    orchestrator_config.message_delay = std::time::Duration::ZERO;
    if let Some(category) = cmd.category {
        orchestrator_config.categories = vec![category];
    }

    let orchestrator = build_orchestrator(&config, Arc::new(ConsoleSink::new()), orchestrator_config)?;
    let report = orchestrator.run_cycle(Utc::now()).await;

    if report.was_skipped() {
        println!("No pairs collected ({} sources failed)", report.failed_sources);
    }
    for (category, outcome) in &report.outcomes {
        tracing::info!("{}: {:?}", category, outcome);
    }
    Ok(())
}

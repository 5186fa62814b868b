//! Configuration Loader
//!
//! Loads and validates configuration from a TOML file. Every section is
//! optional and falls back to defaults; a missing file means all defaults.
//! Secrets come from the environment (or `.env`), never from compiled-in values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::dexscreener::{DexScreenerConfig, DEFAULT_BASE_URL};
use crate::adapters::telegram::{TelegramConfig, DEFAULT_API_URL};
use crate::application::{DiscoveryConfig, DiscoveryConfigError, OrchestratorConfig};
use crate::domain::AlertCategory;
use crate::strategy::{RankingConfig, RankingConfigError};

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_INTERVAL_SECS: &str = "ALERT_INTERVAL_SECS";
pub const ENV_CHAIN_ID: &str = "DEXSCREENER_CHAIN_ID";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoverySection,
    pub ranking: RankingConfig,
    pub telegram: TelegramSection,
    pub schedule: ScheduleSection,
    pub logging: LoggingSection,
}

/// Discovery configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// DexScreener API root
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Chain, sources, batching and pacing
    #[serde(flatten)]
    pub sources: DiscoveryConfig,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 15,
            sources: DiscoveryConfig::default(),
        }
    }
}

/// Telegram configuration section
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TelegramSection {
    /// Usually supplied through TELEGRAM_BOT_TOKEN
    pub bot_token: Option<String>,
    /// Usually supplied through TELEGRAM_CHAT_ID
    pub chat_id: Option<String>,
    pub api_url: String,
    /// Pause between category messages
    pub message_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for TelegramSection {
    fn default() -> Self {
        Self {
            bot_token: None,
            chat_id: None,
            api_url: DEFAULT_API_URL.to_string(),
            message_delay_ms: 2000,
            timeout_secs: 15,
        }
    }
}

impl std::fmt::Debug for TelegramSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSection")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .field("message_delay_ms", &self.message_delay_ms)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Schedule configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleSection {
    /// Seconds between cycle starts
    pub interval_secs: u64,
    /// Run the first cycle at startup
    pub run_immediately: bool,
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            interval_secs: 600,
            run_immediately: true,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid discovery settings: {0}")]
    Discovery(#[from] DiscoveryConfigError),
    #[error("Invalid ranking settings: {0}")]
    Ranking(#[from] RankingConfigError),
    #[error("Missing credentials: {0} must be set")]
    MissingCredentials(String),
}

/// Resolve the config path, expanding a leading `~`
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

/// Expanded path of the config file, or `None` when there is no file to read
pub fn existing_config_path(path: &Path) -> Option<PathBuf> {
    let path = expand_path(path);
    path.exists().then_some(path)
}

/// Load configuration from a TOML file, apply environment overrides, validate.
///
/// A path that does not exist yields the defaults. Runs before logging is
/// set up, so callers report the fallback themselves.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let mut config = match existing_config_path(path.as_ref()) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            Config::from_toml_str(&content)?
        }
        None => Config::default(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Parse without environment overrides or validation
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply overrides from `lookup` (the process environment in production)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = lookup(ENV_BOT_TOKEN) {
            self.telegram.bot_token = Some(token);
        }
        if let Some(chat_id) = lookup(ENV_CHAT_ID) {
            self.telegram.chat_id = Some(chat_id);
        }
        if let Some(chain_id) = lookup(ENV_CHAIN_ID) {
            self.discovery.sources.chain_id = chain_id;
        }
        if let Some(raw) = lookup(ENV_INTERVAL_SECS) {
            self.schedule.interval_secs = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_INTERVAL_SECS, raw
                ))
            })?;
        }
        Ok(())
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discovery.sources.validate()?;
        self.ranking.validate()?;

        if self.discovery.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "discovery.base_url cannot be empty".to_string(),
            ));
        }

        if self.discovery.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "discovery.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.telegram.api_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "telegram.api_url cannot be empty".to_string(),
            ));
        }

        if self.schedule.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "schedule.interval_secs must be > 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {:?}, got '{}'",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }

    /// Telegram settings with both credentials present
    pub fn telegram_config(&self) -> Result<TelegramConfig, ConfigError> {
        let token = non_blank(&self.telegram.bot_token)
            .ok_or_else(|| ConfigError::MissingCredentials(ENV_BOT_TOKEN.to_string()))?;
        let chat_id = non_blank(&self.telegram.chat_id)
            .ok_or_else(|| ConfigError::MissingCredentials(ENV_CHAT_ID.to_string()))?;

        let mut config = TelegramConfig::new(token, chat_id).with_api_url(self.telegram.api_url.clone());
        config.timeout = Duration::from_secs(self.telegram.timeout_secs.max(1));
        Ok(config)
    }

    pub fn dexscreener_config(&self) -> DexScreenerConfig {
        DexScreenerConfig::new(
            self.discovery.base_url.clone(),
            Duration::from_secs(self.discovery.timeout_secs),
        )
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            interval: Duration::from_secs(self.schedule.interval_secs),
            run_immediately: self.schedule.run_immediately,
            message_delay: Duration::from_millis(self.telegram.message_delay_ms),
            categories: AlertCategory::ALL.to_vec(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

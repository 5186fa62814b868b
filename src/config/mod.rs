//! Configuration Module
//!
//! Loads and validates configuration from TOML files with environment overrides.

pub mod loader;

pub use loader::{
    existing_config_path, expand_path, load_config, Config, ConfigError, DiscoverySection, LoggingSection,
    ScheduleSection, TelegramSection,
};

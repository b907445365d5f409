use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, created by the operator
pub const CONFIG_FILE: &str = "volcache.yaml";

/// Optional local overrides layered over [`CONFIG_FILE`]
pub const LOCAL_CONFIG_FILE: &str = "volcache.local.yaml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "VOLCACHE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Log level is not a known level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Provisioner filter is set but blank
    #[error("Provisioner name cannot be empty when set")]
    EmptyProvisionerName,

    /// A label selector has an empty key
    #[error("Label selector key cannot be empty")]
    EmptyLabelKey,

    /// Settings are individually valid but inconsistent together
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. volcache.yaml in the working directory
    /// 3. volcache.local.yaml (optional local overrides)
    /// 4. Environment variables (VOLCACHE_* prefix, `__` separates nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.logging.log_dir.is_none() && !config.logging.enable_stdout {
            return Err(ConfigError::ValidationFailed(
                "logging needs stdout or a log_dir".to_string(),
            ));
        }

        let admission = &config.cache.admission;
        if admission
            .provisioner_name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::EmptyProvisionerName);
        }

        if admission.match_labels.keys().any(|key| key.trim().is_empty()) {
            return Err(ConfigError::EmptyLabelKey);
        }

        Ok(())
    }
}

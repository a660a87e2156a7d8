use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::action::format::FORMATTED_RESULTS;
use crate::action::history::DEFAULT_HISTORY_WINDOW;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AgentActionConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Default result count for `search` when `-n` is not given.
    pub max_results: usize,
    /// Default entry count for `history` when `-n` is not given.
    pub history_window: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_agentaction_dir()
            .join("actions.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_results: FORMATTED_RESULTS,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Returns `~/.agentaction/`, or `./.agentaction/` when no home directory is known.
pub fn default_agentaction_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".agentaction")
}

/// Returns the default config file path: `~/.agentaction/config.toml`
pub fn default_config_path() -> PathBuf {
    default_agentaction_dir().join("config.toml")
}

impl AgentActionConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            AgentActionConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (AGENTACTION_DB, AGENTACTION_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AGENTACTION_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("AGENTACTION_LOG_LEVEL") {
            self.logging.log_level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

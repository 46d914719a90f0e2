//! Layered configuration loading.
//!
//! Sources, highest priority first:
//!
//! 1. Environment variables prefixed `TASKDECK_`, with `__` separating
//!    sections (`TASKDECK_STORE__PATH` sets `store.path`)
//! 2. `taskdeck.toml` in the working directory, when present
//! 3. Built-in defaults

use camino::Utf8PathBuf;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{adapters::json_file::JsonFileTaskRepository, ports::TaskRepositoryResult};

/// Name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "taskdeck.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "TASKDECK_";

const DEFAULT_STORE_PATH: &str = "data/tasks.json";
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A value parsed but is unusable.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskdeckConfig {
    /// Task store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Task store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON file holding task records.
    pub path: Utf8PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Utf8PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

impl StoreConfig {
    /// Opens the JSON file repository at the configured path.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store directory cannot be
    /// created or opened.
    pub fn open_repository(&self) -> TaskRepositoryResult<JsonFileTaskRepository> {
        JsonFileTaskRepository::open(&self.path)
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directives, such as `info` or `taskdeck=debug`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl TaskdeckConfig {
    /// Loads configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed or a value is
    /// unusable.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Builds the provider chain.
    ///
    /// Public so callers can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE_NAME))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Extracts and checks configuration from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is unusable.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.path.file_name().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "store.path",
                reason: format!("'{}' does not name a file", self.store.path),
            });
        }
        if self.log.filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log.filter",
                reason: "filter must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}

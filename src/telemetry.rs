//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::LogConfig;

/// Environment variable whose directives override the configured filter.
pub const LOG_ENV_VAR: &str = "TASKDECK_LOG";

/// Errors raised while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directives do not parse.
    #[error("invalid log filter '{directives}': {source}")]
    InvalidFilter {
        /// The rejected directives.
        directives: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Parses `tracing` filter directives.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when a directive is malformed.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidFilter {
        directives: directives.to_owned(),
        source,
    })
}

/// Installs a formatted subscriber as the global default.
///
/// Directives in [`LOG_ENV_VAR`] take precedence over `config.filter`.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the configured filter is malformed or a
/// subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => parse_filter(&config.filter)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}

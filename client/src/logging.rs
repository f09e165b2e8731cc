//! Tracing subscriber setup for binaries and tests embedding the client.

use tracing_subscriber::{filter::ParseError, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install a global fmt subscriber filtered by `config.level`.
///
/// # Errors
/// Returns an error if the level is not a valid filter directive or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::debug!(level = %config.level, "logging initialized");
    Ok(())
}

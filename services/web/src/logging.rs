//! Logging initialization.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| LoggingError::InvalidFilter(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_invalid_level_is_rejected() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }

        let config = LoggingConfig {
            level: "web=notalevel".to_string(),
            format: LogFormat::Text,
        };
        assert!(matches!(
            build_filter(&config),
            Err(LoggingError::InvalidFilter(_))
        ));
    }

    #[test]
    #[serial]
    fn test_valid_directives() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }

        let config = LoggingConfig {
            level: "info,web=debug,sqlx=warn".to_string(),
            format: LogFormat::Json,
        };
        assert!(build_filter(&config).is_ok());
    }
}

use crate::config::{AppConfig, AppEnvironment};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the configured log level, so a
/// deployment can override filtering without touching its config.
pub const LOG_FILTER_ENV: &str = "BECAS_LOG";

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("subscriber already installed: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber. Consumers call this once at startup.
///
/// Output is compact with ANSI colors reserved for development; test and
/// production runs emit plain text suitable for capture.
pub fn init(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_env(LOG_FILTER_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.telemetry.log_level).map_err(|source| {
            TelemetryError::Filter {
                value: config.telemetry.log_level.clone(),
                source,
            }
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(config.environment == AppEnvironment::Development)
        .try_init()
        .map_err(TelemetryError::Install)
}

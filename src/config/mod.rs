use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the workflow core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub store: StoreConfig,
    pub telemetry: TelemetryConfig,
    /// Insert the demo admin/evaluator/applicant trio on first run.
    pub seed_demo_users: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("BECAS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("BECAS_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        let seed_demo_users = env::var("BECAS_SEED_DEMO_USERS")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(environment != AppEnvironment::Production);

        let log_level = env::var("BECAS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            store: StoreConfig {
                data_dir: PathBuf::from(data_dir),
            },
            telemetry: TelemetryConfig { log_level },
            seed_demo_users,
        })
    }
}

/// Settings controlling where the JSON-file store keeps its records.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

/// Settings controlling log output.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDataDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDataDir => write!(f, "BECAS_DATA_DIR must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

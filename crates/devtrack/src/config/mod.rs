use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub report: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("DEVTRACK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let catalog_path = env::var_os("DEVTRACK_CATALOG").map(PathBuf::from);
        let entries_path = env::var_os("DEVTRACK_ENTRIES").map(PathBuf::from);
        let parallel = match env::var("DEVTRACK_PARALLEL") {
            Ok(raw) => parse_flag("DEVTRACK_PARALLEL", &raw)?,
            Err(_) => true,
        };

        let log_level = env::var("DEVTRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            report: ReportConfig {
                catalog_path,
                entries_path,
                parallel,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Default inputs and evaluation mode for progress reports.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub catalog_path: Option<PathBuf>,
    pub entries_path: Option<PathBuf>,
    /// Evaluate indicators on the rayon pool.
    pub parallel: bool,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { key, value } => {
                write!(f, "{key} must be a boolean flag, got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "fixtures";
pub const DEFAULT_TOP_RATED_LIMIT: usize = 5;

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

/// Top-level configuration for the admissions reports.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub data: DataConfig,
    pub reports: ReportConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("ADMISSIONS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dir = env::var("ADMISSIONS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let top_rated_limit = match env::var("ADMISSIONS_TOP_RATED_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopRatedLimit { value: raw })?,
            Err(_) => DEFAULT_TOP_RATED_LIMIT,
        };

        let log_level = env::var("ADMISSIONS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            data: DataConfig { dir },
            reports: ReportConfig { top_rated_limit },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Location of the four CSV datasets.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub top_rated_limit: usize,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidTopRatedLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTopRatedLimit { value } => write!(
                f,
                "ADMISSIONS_TOP_RATED_LIMIT must be a non-negative integer, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("ADMISSIONS_ENV");
        env::remove_var("ADMISSIONS_DATA_DIR");
        env::remove_var("ADMISSIONS_TOP_RATED_LIMIT");
        env::remove_var("ADMISSIONS_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.data.dir, PathBuf::from("fixtures"));
        assert_eq!(config.reports.top_rated_limit, 5);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADMISSIONS_ENV", "CI");
        env::set_var("ADMISSIONS_DATA_DIR", "/srv/admissions");
        env::set_var("ADMISSIONS_TOP_RATED_LIMIT", " 10 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.data.dir, PathBuf::from("/srv/admissions"));
        assert_eq!(config.reports.top_rated_limit, 10);
    }

    #[test]
    fn rejects_unparseable_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ADMISSIONS_TOP_RATED_LIMIT", "five");
        let err = AppConfig::load().expect_err("limit must be numeric");
        reset_env();

        assert!(matches!(
            err,
            ConfigError::InvalidTopRatedLimit { ref value } if value == "five"
        ));
    }
}

use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct HospitalConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
    pub timeouts: TimeoutConfig,
    /// OTLP collector for span export. Local JSON logs only when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    /// Namespace holding patients, doctors, appointments and departments.
    pub database: String,
    /// Separate namespace for the user registry.
    pub users_database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutConfig {
    /// Budget shared by all store calls made while serving one request.
    pub request: Duration,
    /// Budget for connecting, pinging and index creation at startup.
    pub startup: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(5),
            startup: Duration::from_secs(10),
        }
    }
}

impl HospitalConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(HospitalConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("hospitaldb"), is_prod)?,
                users_database: get_env("MONGODB_USERS_DATABASE", Some("userdb"), is_prod)?,
            },
            store: StoreConfig {
                backend: get_env("STORE_BACKEND", Some("mongo"), false)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
            timeouts: TimeoutConfig {
                request: Duration::from_secs(get_secs("REQUEST_TIMEOUT_SECS", 5)?),
                startup: Duration::from_secs(get_secs("STARTUP_TIMEOUT_SECS", 10)?),
            },
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} is required in production but not set",
            key
        ))),
        Err(_) => default.map(str::to_string).ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("{} is required but not set", key))
        }),
    }
}

/// Upper bound for any configured timeout.
const MAX_TIMEOUT_SECS: u64 = 3600;

fn get_secs(key: &str, default: u64) -> Result<u64, AppError> {
    match env::var(key) {
        Ok(val) => parse_secs(key, &val),
        Err(_) => Ok(default),
    }
}

fn parse_secs(key: &str, val: &str) -> Result<u64, AppError> {
    let secs: u64 = val.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} must be a whole number of seconds: {}", key, e))
    })?;

    if secs == 0 || secs > MAX_TIMEOUT_SECS {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be between 1 and {} seconds, got {}",
            key,
            MAX_TIMEOUT_SECS,
            secs
        )));
    }

    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_store_backend() {
        assert_eq!("mongo".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("MongoDB".parse::<StoreBackend>(), Ok(StoreBackend::Mongo));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn default_timeouts() {
        let timeouts = TimeoutConfig::default();
        assert_eq!(timeouts.request, Duration::from_secs(5));
        assert_eq!(timeouts.startup, Duration::from_secs(10));
    }

    #[test]
    fn timeout_seconds_are_bounded() {
        assert_eq!(parse_secs("REQUEST_TIMEOUT_SECS", "5").unwrap(), 5);
        assert_eq!(parse_secs("REQUEST_TIMEOUT_SECS", " 3600 ").unwrap(), 3600);

        for bad in ["0", "3601", "18446744073709551615", "-1", "five"] {
            let err = parse_secs("REQUEST_TIMEOUT_SECS", bad).unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)), "accepted {}", bad);
            assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
        }
    }
}

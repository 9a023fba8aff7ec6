//! Configuration loading from TOML files.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub oracle: OracleConfig,
    pub worker: WorkerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Bounded wait on an empty queue before restarting the loop.
    pub idle_timeout_secs: u64,
    /// Fixed delay observed after any failed iteration.
    pub backoff_secs: u64,
    /// Deliveries per payload before it is dead-lettered.
    pub max_attempts: u32,
    /// Queue poll interval while waiting for work.
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            oracle: OracleConfig::default(),
            worker: WorkerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "riskline.db".into(),
        }
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".into(),
            timeout_secs: 5,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 5,
            backoff_secs: 1,
            max_attempts: 5,
            poll_interval_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl Config {
    /// Load from a TOML file. A missing file yields the defaults, so
    /// the binary runs without a config in development.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.url",
                reason: "must be non-empty".into(),
            }
            .into());
        }
        if let Err(e) = url::Url::parse(&self.oracle.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "oracle.base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if self.oracle.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "oracle.timeout_secs",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.worker.idle_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.idle_timeout_secs",
                reason: "must be positive".into(),
            }
            .into());
        }
        if self.worker.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.max_attempts",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.worker.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "worker.poll_interval_ms",
                reason: "must be positive".into(),
            }
            .into());
        }
        Ok(())
    }

    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle.timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.worker.idle_timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.worker.backoff_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.worker.poll_interval_ms)
    }

    /// Install the global tracing subscriber.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

use thiserror::Error;

use crate::domain::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Price-oracle lookup errors.
///
/// All variants classify as transient at the worker boundary: a lookup
/// that fails now may succeed on a later delivery of the same trade id.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("unknown instrument '{instrument}' (status {status})")]
    UnknownInstrument { instrument: String, status: u16 },

    #[error("price lookup for '{instrument}' returned status {status}")]
    Status { instrument: String, status: u16 },

    #[error("price lookup for '{instrument}' failed: {source}")]
    Transport {
        instrument: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Top-level error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("migration error: {0}")]
    Migration(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::Database(err.to_string())
    }
}

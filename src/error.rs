// src/error.rs
use thiserror::Error;

/// Everything the data layer can report back to a caller.
///
/// Row- and field-level anomalies never show up here: bad rows are dropped
/// and bad numbers become 0 (see `normalize::NormalizeReport`). What remains
/// are load failures and configuration mistakes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tabular input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input has no header row")]
    EmptyInput,

    #[error("Unknown sort field: {0}")]
    UnknownSortKey(String),

    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    InvalidDirection(String),

    #[error("Invalid page size: {0} (expected a positive number or \"all\")")]
    InvalidPageSize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error type shared by the store, persistence and command layers.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for taskboard operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid date_format '{format}' in {path}")]
    InvalidDateFormat { path: PathBuf, format: String },

    #[error("Unrecognised due date '{0}'. Use YYYY-MM-DD, 'today', 'tomorrow', or 'in Nd'.")]
    InvalidDate(String),

    #[error("Task {0} not found")]
    TaskNotFound(u64),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Core error types for sobertrack-core.
//!
//! Every concern gets its own thiserror enum; `CoreError` wraps them so
//! callers that don't care about the distinction can use one `?` chain.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sobertrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification scheduling errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Read of a single key failed
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Write of a single key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Any other SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Transient failures while fetching a quote from the remote source.
///
/// These never escape the quote fetcher; they only drive its retry loop.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("Quote source returned HTTP {0}")]
    Status(u16),

    /// Body parsed but a required field was missing or empty
    #[error("Malformed quote response: {0}")]
    Malformed(String),

    /// Endpoint could not be turned into a request URL
    #[error("Invalid quote endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Start date lies after the reference day
    #[error("Start date {date} is in the future (today is {today})")]
    FutureStartDate {
        date: chrono::NaiveDate,
        today: chrono::NaiveDate,
    },

    /// Date string is not `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Errors reported by an external notification scheduler.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// User or OS denied notification permission
    #[error("Notification permission denied")]
    PermissionDenied,

    /// The scheduler could not register the trigger
    #[error("Failed to schedule notification: {0}")]
    ScheduleFailed(String),

    /// The scheduler could not remove pending triggers
    #[error("Failed to cancel notifications: {0}")]
    CancelFailed(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked
                    || e.code == rusqlite::ErrorCode::DatabaseBusy =>
            {
                PersistenceError::Locked
            }
            _ => PersistenceError::Sqlite(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

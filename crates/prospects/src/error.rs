//! Error types for prospects.
//!
//! The store itself never surfaces these to its callers: load failures fall
//! back to an empty collection and save failures are logged. They exist so
//! the lower-level operations (`save`, config loading, reminder scheduling)
//! can report precisely what went wrong.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for prospects operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Persistence Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the temporary file that replaces the saved collection.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination of the write.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the freshly written file over the saved collection.
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// Destination of the write.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Reminder Errors ===
    /// The notification permission was refused.
    #[error("reminder permission denied")]
    ReminderPermissionDenied,

    /// The scheduler could not accept a reminder.
    #[error("failed to schedule reminder: {0}")]
    ReminderSchedule(String),
}

/// A specialized Result type for prospects operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new reminder scheduling error.
    #[must_use]
    pub fn reminder_schedule(message: impl Into<String>) -> Self {
        Self::ReminderSchedule(message.into())
    }

    /// Check if this error is a permission refusal.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::ReminderPermissionDenied)
    }
}

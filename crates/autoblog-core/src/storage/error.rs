//! Store error handling
//!
//! Typed errors for article store operations with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during article store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Database file is missing (read-only opens never create it)
    #[error("Database not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Database is locked by another writer past the busy timeout
    #[error("Database is busy: {0}")]
    Busy(#[source] rusqlite::Error),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Stored content could not be encoded or decoded
    #[error("Invalid article content: {0}")]
    Content(#[from] serde_json::Error),

    /// Stored row has a value that doesn't fit the model
    #[error("Corrupt article row '{id}': {details}")]
    CorruptRow { id: String, details: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(error: rusqlite::Error) -> Self {
        match error.sqlite_error_code() {
            Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
                StoreError::Busy(error)
            }
            _ => StoreError::Database(error),
        }
    }
}

impl StoreError {
    /// Check if retrying the same operation later might succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Busy(_) | StoreError::CreateDirectory { .. })
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::Busy(_) => Some("Another writer holds the database. Try again shortly."),
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::CorruptRow { .. } => {
                Some("The row was written by an incompatible version. Inspect the database manually.")
            }
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_classification() {
        let err = StoreError::from(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));

        assert!(matches!(err, StoreError::Busy(_)));
        assert!(err.is_recoverable());
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn test_other_sqlite_errors_are_database_errors() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_create_directory_display() {
        let err = StoreError::CreateDirectory {
            path: PathBuf::from("/readonly/autoblog"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        let msg = err.to_string();
        assert!(msg.contains("Failed to create data directory"));
        assert!(msg.contains("/readonly/autoblog"));
    }

    #[test]
    fn test_corrupt_row_display() {
        let err = StoreError::CorruptRow {
            id: "abc".to_string(),
            details: "bad timestamp".to_string(),
        };
        assert!(err.to_string().contains("abc"));
        assert!(err.recovery_suggestion().is_some());
    }
}

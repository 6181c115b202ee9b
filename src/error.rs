//! Error types for catalog_sync

use std::fmt;

/// Unified error type for sync operations
#[derive(Debug)]
pub enum SyncError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse bulk card data
    Parse(serde_json::Error),
    /// Failed to read a local bulk data file
    Io(std::io::Error),
    /// Database operation failed
    Database(rusqlite::Error),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(e) => write!(f, "Network error: {}", e),
            SyncError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            SyncError::Parse(e) => write!(f, "Parse error: {}", e),
            SyncError::Io(e) => write!(f, "I/O error: {}", e),
            SyncError::Database(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Network(e) => Some(e),
            SyncError::HttpStatus(_) => None,
            SyncError::Parse(e) => Some(e),
            SyncError::Io(e) => Some(e),
            SyncError::Database(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Network(err)
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Parse(err)
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::Io(err)
    }
}

impl From<rusqlite::Error> for SyncError {
    fn from(err: rusqlite::Error) -> Self {
        SyncError::Database(err)
    }
}

/// Result alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

//! Error types for Brasa.

use thiserror::Error;

/// Common error type for Brasa.
#[derive(Error, Debug)]
pub enum BrasaError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the SQLite
    /// backend. Errors from rusqlite are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from rusqlite errors
impl From<rusqlite::Error> for BrasaError {
    fn from(e: rusqlite::Error) -> Self {
        BrasaError::Database(e.to_string())
    }
}

/// Result type alias for Brasa operations.
pub type Result<T> = std::result::Result<T, BrasaError>;

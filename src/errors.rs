//! Unified application error type.
//! All modules (db, core, transport, cli) return AppError to keep the error
//! handling consistent and easy to map onto status codes.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    /// The open interval changed between the read and the conditional write.
    #[error("Concurrent update conflict: {0}")]
    Conflict(String),

    // ---------------------------
    // Request errors
    // ---------------------------
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

/// Coarse classification used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Unexpected,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidInput => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Unexpected => 500,
        }
    }
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Unexpected,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(AppError::invalid("Invalid ID").kind().status_code(), 400);
        assert_eq!(AppError::not_found("Location Not Found").kind().status_code(), 404);
        assert_eq!(AppError::Conflict("row 1".into()).kind().status_code(), 500);
        assert_eq!(
            AppError::Db(rusqlite::Error::QueryReturnedNoRows).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn request_errors_display_bare_message() {
        assert_eq!(AppError::invalid("Invalid ID").to_string(), "Invalid ID");
        assert_eq!(
            AppError::not_found("Location Not Found").to_string(),
            "Location Not Found"
        );
    }
}

//! Error types for waypoint-store operations.

use std::io;
use thiserror::Error;

/// The error type for waypoint-store operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record was structurally valid JSON but not a valid store record.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// A specialized Result type for waypoint-store operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for packetview.

use thiserror::Error;

/// Main error type for packetview operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error extracting a frame summary from a serialized record
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    /// Error from the backing record store
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to parsing serialized packet records.
#[derive(Error, Debug)]
pub enum RecordError {
    /// Record text is not valid JSON
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Record has no `frame` object
    #[error("Record has no frame object")]
    MissingFrame,

    /// The `frame` object has no `frame.number` field
    #[error("Record has no frame.number field")]
    MissingFrameNumber,

    /// The `frame.number` field is not a non-negative integer
    #[error("Invalid frame.number: {value}")]
    InvalidFrameNumber { value: String },
}

/// Errors related to the backing record store.
///
/// The in-memory store never fails, but the trait allows persistent
/// backends to surface read/write failures distinctly so the ledger
/// can keep its bounds consistent with what was actually persisted.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Read of a stored record failed
    #[error("Read of key {key} failed: {reason}")]
    Read { key: String, reason: String },

    /// Write of a record failed
    #[error("Write of key {key} failed: {reason}")]
    Write { key: String, reason: String },

    /// Clearing the store failed
    #[error("Clear failed: {reason}")]
    Clear { reason: String },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for isamlite
//!
//! Provides a unified error type for all operations.
//!
//! Fatal vs recoverable: store creation/open failures and record corruption
//! abort a program run; a single failed write is counted by the loader and
//! the batch continues. End-of-store is not an error — cursors signal it by
//! returning `None`.

use thiserror::Error;

/// Result type alias using IsamError
pub type Result<T> = std::result::Result<T, IsamError>;

/// Unified error type for isamlite operations
#[derive(Debug, Error)]
pub enum IsamError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Store create failed: {0}")]
    StoreCreate(String),

    #[error("Store open failed: {0}")]
    StoreOpen(String),

    #[error("Store write failed: {0}")]
    StoreWrite(String),

    /// A stored record was shorter than the schema length — the data file
    /// is corrupt, since appends only ever write whole records.
    #[error("Malformed record: expected {expected} bytes, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    // -------------------------------------------------------------------------
    // Index Sidecar Errors
    // -------------------------------------------------------------------------
    /// The persisted ordering index failed validation. Recovered internally
    /// by rebuilding from the data file; never surfaces from open.
    #[error("Index sidecar corrupt: {0}")]
    IndexCorrupt(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Schema / Record Errors
    // -------------------------------------------------------------------------
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    #[error("Record does not match schema: {0}")]
    FieldMismatch(String),

    // -------------------------------------------------------------------------
    // Text Input Errors
    // -------------------------------------------------------------------------
    #[error("Input error: {0}")]
    Input(String),
}

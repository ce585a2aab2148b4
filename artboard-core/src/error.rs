//! Error types for artboard operations.
//!
//! Layer operations themselves are total and never error: a stale id is a
//! silent no-op and history boundaries are guarded. Errors exist only at
//! the persistence edge.

use thiserror::Error;

/// Result type for artboard operations.
pub type ArtboardResult<T> = Result<T, ArtboardError>;

/// Errors that can occur at the persistence edge.
#[derive(Debug, Error)]
pub enum ArtboardError {
    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error while reading or writing a document file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A document that parsed but can't be applied.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

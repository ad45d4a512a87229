//! Error taxonomy for index operations.
//!
//! Every variant is an ordinary, recoverable outcome reported to the
//! caller. Structural conditions (overflow, underflow) are resolved
//! internally and never surface as errors; a search miss is likewise not
//! an error but a normal `None`.

use thiserror::Error;

/// Error type for index operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The key argument was empty.
    #[error("key must be non-empty")]
    InvalidKey,
    /// Insert of a key that is already present; the index is unchanged.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
    /// Update or delete of a key that is not present.
    #[error("key not found: {0}")]
    NotFound(String),
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;

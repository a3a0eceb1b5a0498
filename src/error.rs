//! Error types for collection operations.

use crate::key::Key;
use thiserror::Error;

/// Result type alias for collection operations
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Main error type for all collection operations
#[derive(Error, Debug)]
pub enum CollectionError {
    /// Explicit indexed read of a key that is not present
    #[error("Undefined key: {0}")]
    MissingKey(Key),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Comparison operator text not understood by `where_op`
    #[error("Unknown comparison operator '{0}'")]
    UnknownOperator(String),

    /// Every integer key up to `i64::MAX` is taken, so nothing can be appended
    #[error("Cannot append: the next integer key is already occupied")]
    KeysExhausted,

    /// A value that cannot be joined as text
    #[error("Value at key {0} cannot be converted to a string")]
    NotStringable(Key),
}

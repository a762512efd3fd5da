/// Errors from ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored value could not be decoded as the expected document.
    #[error("corrupt document at '{key}': {reason}")]
    CorruptDocument { key: String, reason: String },

    /// Serialization failure while encoding a value for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Keys must be non-empty.
    #[error("cannot store a value under an empty key")]
    EmptyKey,

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused or failed the operation.
    #[error("ledger backend unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid date '{value}': expected format {format}")]
    InvalidDate { value: String, format: &'static str },

    #[error("serialization error: {0}")]
    Serialization(String),
}

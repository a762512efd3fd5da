use std::fmt;

use arl_gate::GateError;
use arl_store::StoreError;
use arl_types::{DocKind, TypeError};

/// Failure class of a registry operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Unauthorized,
    LedgerFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "InvalidArgument"),
            Self::NotFound => write!(f, "NotFound"),
            Self::AlreadyExists => write!(f, "AlreadyExists"),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::LedgerFailure => write!(f, "LedgerFailure"),
        }
    }
}

/// Errors returned by registry operations. Every error is terminal for the
/// invocation that raised it.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: DocKind, id: String },

    #[error("key '{0}' not found")]
    KeyNotFound(String),

    #[error("{kind} '{id}' already exists")]
    AlreadyExists { kind: DocKind, id: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("ledger failure: {0}")]
    Ledger(#[from] StoreError),

    #[error("ledger failure: roster '{roster}' is missing")]
    RosterMissing { roster: &'static str },

    #[error("ledger failure: roster '{roster}' lists '{id}' which does not resolve")]
    RosterInconsistent { roster: &'static str, id: String },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } | Self::KeyNotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::Ledger(_) | Self::RosterMissing { .. } | Self::RosterInconsistent { .. } => {
                ErrorKind::LedgerFailure
            }
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn not_found(kind: DocKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

impl From<GateError> for RegistryError {
    fn from(err: GateError) -> Self {
        if err.is_unauthorized() {
            Self::Unauthorized(err.to_string())
        } else {
            Self::InvalidArgument(err.to_string())
        }
    }
}

impl From<TypeError> for RegistryError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidDate { .. } => Self::InvalidArgument(err.to_string()),
            TypeError::Serialization(message) => Self::Ledger(StoreError::Serialization(message)),
        }
    }
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

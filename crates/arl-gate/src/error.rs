use crate::authority::Action;

/// Errors raised while gating an invocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// The argument array has the wrong length.
    #[error("incorrect number of arguments. expecting {expected}")]
    ArgumentCount { expected: usize, actual: usize },

    /// A required argument is empty.
    #[error("argument {index} ({name}) must be a non-empty string")]
    EmptyArgument { index: usize, name: &'static str },

    /// An argument exceeds its class's length limit.
    #[error("argument {index} ({name}) must be at most {max} characters, got {len}")]
    ArgumentTooLong {
        index: usize,
        name: &'static str,
        max: usize,
        len: usize,
    },

    /// An argument contains a character outside the allow-list.
    #[error("argument {index} ({name}) contains forbidden character {ch:?}")]
    ForbiddenCharacter {
        index: usize,
        name: &'static str,
        ch: char,
    },

    /// The claimed company does not match the authorizing entity's company.
    #[error("the company '{claimed}' cannot authorize {action} for '{anchor}'")]
    Unauthorized {
        claimed: String,
        action: Action,
        anchor: String,
    },

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GateError {
    /// Whether this error is an authorization refusal rather than a
    /// malformed argument.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

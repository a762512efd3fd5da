use tracing::debug;

use crate::config::GateConfig;
use crate::error::GateError;

/// Whether an argument may be empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Empty is meaningful (e.g. "no parts"); non-empty values are still
    /// sanitized.
    Optional,
}

/// Length class of an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgClass {
    /// Identifiers, usernames, companies, colors, sizes.
    Short,
    /// Descriptive vehicle and part fields, dates, contact data.
    Text,
}

impl ArgClass {
    fn max_len(self, config: &GateConfig) -> usize {
        match self {
            Self::Short => config.max_short_len,
            Self::Text => config.max_text_len,
        }
    }
}

/// Declared shape of one positional argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub presence: Presence,
    pub class: ArgClass,
}

impl ArgSpec {
    /// A required short argument.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
            class: ArgClass::Short,
        }
    }

    /// A required free-text argument.
    pub const fn required_text(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
            class: ArgClass::Text,
        }
    }

    /// An optional free-text argument.
    pub const fn optional_text(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            class: ArgClass::Text,
        }
    }
}

/// Check an argument array against its declared shape.
///
/// The count is checked first; then each argument in order. The first
/// violation is returned.
pub fn check_args(specs: &[ArgSpec], args: &[String], config: &GateConfig) -> Result<(), GateError> {
    if args.len() != specs.len() {
        debug!(expected = specs.len(), actual = args.len(), "argument count mismatch");
        return Err(GateError::ArgumentCount {
            expected: specs.len(),
            actual: args.len(),
        });
    }
    for (index, (spec, value)) in specs.iter().zip(args).enumerate() {
        sanitize(index, spec, value, config)?;
    }
    Ok(())
}

/// Sanitize a single argument.
pub fn sanitize(
    index: usize,
    spec: &ArgSpec,
    value: &str,
    config: &GateConfig,
) -> Result<(), GateError> {
    if value.trim().is_empty() {
        return match spec.presence {
            Presence::Optional if value.is_empty() => Ok(()),
            _ => Err(GateError::EmptyArgument {
                index,
                name: spec.name,
            }),
        };
    }

    let max = spec.class.max_len(config);
    let len = value.chars().count();
    if len > max {
        return Err(GateError::ArgumentTooLong {
            index,
            name: spec.name,
            max,
            len,
        });
    }

    if let Some(ch) = value.chars().find(|&c| !config.allows(c)) {
        return Err(GateError::ForbiddenCharacter {
            index,
            name: spec.name,
            ch,
        });
    }
    Ok(())
}

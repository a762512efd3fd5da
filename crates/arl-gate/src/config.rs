use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Characters rejected regardless of configuration.
pub const ALWAYS_FORBIDDEN: &[char] = &['"', '\\', '{', '}', '[', ']', '<', '>', ';', '$', '`'];

/// Limits applied to every externally supplied argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Maximum length, in characters, of identifiers, usernames, companies,
    /// colors and sizes.
    pub max_short_len: usize,
    /// Maximum length, in characters, of descriptive vehicle and part fields.
    pub max_text_len: usize,
    /// Punctuation accepted in addition to alphanumerics.
    pub allowed_punctuation: String,
    /// Store owner usernames lowercased.
    pub lowercase_usernames: bool,
    /// Store marble colors lowercased.
    pub lowercase_colors: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_short_len: 32,
            max_text_len: 256,
            allowed_punctuation: " -_.,:@/#+&()'=?%".into(),
            lowercase_usernames: true,
            lowercase_colors: true,
        }
    }
}

impl GateConfig {
    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), GateError> {
        if self.max_short_len == 0 {
            return Err(GateError::Config("max_short_len must be positive".into()));
        }
        if self.max_text_len < self.max_short_len {
            return Err(GateError::Config(format!(
                "max_text_len ({}) must be at least max_short_len ({})",
                self.max_text_len, self.max_short_len
            )));
        }
        if let Some(ch) = self
            .allowed_punctuation
            .chars()
            .find(|c| ALWAYS_FORBIDDEN.contains(c) || c.is_control() || c.is_alphanumeric())
        {
            return Err(GateError::Config(format!(
                "allowed_punctuation may not contain {ch:?}"
            )));
        }
        Ok(())
    }

    /// Whether `ch` passes the character allow-list.
    pub fn allows(&self, ch: char) -> bool {
        if ALWAYS_FORBIDDEN.contains(&ch) || ch.is_control() {
            return false;
        }
        ch.is_alphanumeric() || self.allowed_punctuation.contains(ch)
    }
}

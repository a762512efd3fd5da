use serde::{Deserialize, Serialize};

use crate::marble::MarbleOwner;

/// An account-like entity affiliated with exactly one company.
///
/// The company is the authorization anchor for every marble the owner holds.
/// `enabled` is the only mutable field and only ever moves from `true` to
/// `false`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub username: String,
    pub company: String,
    pub enabled: bool,
}

impl Owner {
    /// Create an enabled owner.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            company: company.into(),
            enabled: true,
        }
    }

    /// Disable the owner. Returns `true` if the state changed.
    pub fn disable(&mut self) -> bool {
        let was_enabled = self.enabled;
        self.enabled = false;
        was_enabled
    }

    /// Denormalized snapshot embedded in a marble at creation or transfer.
    pub fn snapshot(&self) -> MarbleOwner {
        MarbleOwner {
            id: self.id.clone(),
            username: self.username.clone(),
            company: self.company.clone(),
        }
    }
}

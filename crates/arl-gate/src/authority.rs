use std::fmt;

use tracing::warn;

use crate::error::GateError;

/// A company-gated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    CreateMarble,
    TransferMarble,
    DeleteMarble,
    DisableOwner,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateMarble => write!(f, "creation"),
            Self::TransferMarble => write!(f, "transfers"),
            Self::DeleteMarble => write!(f, "deletion"),
            Self::DisableOwner => write!(f, "changes"),
        }
    }
}

/// Decides whether a claimed company may perform an action on an entity
/// anchored to another company.
///
/// The claim is a plain caller-supplied string. An implementation backed by
/// a verified identity can replace [`CompanyMatch`] without changing any
/// registry operation.
pub trait Authority: Send + Sync {
    /// Name of this authority (for logging).
    fn name(&self) -> &str;

    /// `Ok(())` if `claimed` may perform `action` on an entity whose
    /// authorization anchor is `anchor`.
    fn authorize(&self, action: Action, claimed: &str, anchor: &str) -> Result<(), GateError>;
}

/// Exact, case-sensitive company match.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompanyMatch;

impl Authority for CompanyMatch {
    fn name(&self) -> &str {
        "company-match"
    }

    fn authorize(&self, action: Action, claimed: &str, anchor: &str) -> Result<(), GateError> {
        if claimed == anchor {
            return Ok(());
        }
        warn!(%action, claimed, anchor, "authorization refused");
        Err(GateError::Unauthorized {
            claimed: claimed.to_string(),
            action,
            anchor: anchor.to_string(),
        })
    }
}

/// Authorizes everything. For tests and single-tenant local ledgers.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Authority for AllowAll {
    fn name(&self) -> &str {
        "allow-all"
    }

    fn authorize(&self, _action: Action, _claimed: &str, _anchor: &str) -> Result<(), GateError> {
        Ok(())
    }
}

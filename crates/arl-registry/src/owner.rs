//! Owner Registry: account-like owners whose company anchors authorization.

use arl_gate::{Action, ArgSpec};
use arl_types::{DocKind, Owner};
use tracing::{debug, info};

use crate::context::Env;
use crate::error::RegistryResult;

const CREATE_OWNER: &[ArgSpec] = &[
    ArgSpec::required("id"),
    ArgSpec::required("username"),
    ArgSpec::required("company"),
];

const DISABLE_OWNER: &[ArgSpec] = &[
    ArgSpec::required("ownerId"),
    ArgSpec::required("authedByCompany"),
];

const GET_OWNER: &[ArgSpec] = &[ArgSpec::required_text("id")];

/// `[id, username, company]`
pub fn create_owner(env: &Env<'_>, args: &[String]) -> RegistryResult<Owner> {
    env.check(CREATE_OWNER, args)?;
    let (id, username, company) = (&args[0], &args[1], &args[2]);
    env.check_entity_id(id)?;
    debug!(id = %id, "create owner");

    env.ensure_vacant(DocKind::Owner, id)?;
    let username = if env.gate.lowercase_usernames {
        username.to_lowercase()
    } else {
        username.clone()
    };
    let owner = Owner::new(id.as_str(), username, company.as_str());
    env.save(owner.clone())?;
    info!(id = %owner.id, company = %owner.company, "owner created");
    Ok(owner)
}

/// `[ownerId, authedByCompany]`
///
/// Disabling an already disabled owner succeeds without a write.
pub fn disable_owner(env: &Env<'_>, args: &[String]) -> RegistryResult<Owner> {
    env.check(DISABLE_OWNER, args)?;
    let (id, claimed) = (&args[0], &args[1]);
    debug!(id = %id, "disable owner");

    let mut owner: Owner = env.load(id)?;
    env.authorize(Action::DisableOwner, claimed, &owner.company)?;
    if owner.disable() {
        env.save(owner.clone())?;
        info!(id = %owner.id, "owner disabled");
    } else {
        debug!(id = %owner.id, "owner already disabled");
    }
    Ok(owner)
}

/// `[id]`
pub fn get_owner(env: &Env<'_>, args: &[String]) -> RegistryResult<Owner> {
    env.check(GET_OWNER, args)?;
    env.load(&args[0])
}

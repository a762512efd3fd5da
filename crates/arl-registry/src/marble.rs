//! Marble Registry: single-owner collectibles, every mutation gated by the
//! owning company.

use arl_gate::{Action, ArgSpec};
use arl_types::{DocKind, Marble, Owner};
use tracing::{debug, info};

use crate::context::Env;
use crate::error::{RegistryError, RegistryResult};

const CREATE_MARBLE: &[ArgSpec] = &[
    ArgSpec::required("id"),
    ArgSpec::required("color"),
    ArgSpec::required("size"),
    ArgSpec::required("ownerId"),
    ArgSpec::required("authedByCompany"),
];

const TRANSFER_MARBLE: &[ArgSpec] = &[
    ArgSpec::required("marbleId"),
    ArgSpec::required("newOwnerId"),
    ArgSpec::required("authedByCompany"),
];

const DELETE_MARBLE: &[ArgSpec] = &[
    ArgSpec::required("id"),
    ArgSpec::required("authedByCompany"),
];

const GET_MARBLE: &[ArgSpec] = &[ArgSpec::required_text("id")];

/// `[id, color, size, ownerId, authedByCompany]`
///
/// Checks run in order: size parses, owner resolves, company authorizes,
/// id is free.
pub fn create_marble(env: &Env<'_>, args: &[String]) -> RegistryResult<Marble> {
    env.check(CREATE_MARBLE, args)?;
    let (id, color, size, owner_id, claimed) = (&args[0], &args[1], &args[2], &args[3], &args[4]);
    env.check_entity_id(id)?;
    debug!(id = %id, owner = %owner_id, "create marble");

    let size: i64 = size
        .parse()
        .map_err(|_| RegistryError::invalid(format!("size must be an integer, got '{size}'")))?;
    let owner: Owner = env.load(owner_id)?;
    env.authorize(Action::CreateMarble, claimed, &owner.company)?;
    env.ensure_vacant(DocKind::Marble, id)?;

    let color = if env.gate.lowercase_colors {
        color.to_lowercase()
    } else {
        color.clone()
    };
    let marble = Marble::new(id.as_str(), color, size, &owner);
    env.save(marble.clone())?;
    info!(id = %marble.id, owner = %owner.id, "marble created");
    Ok(marble)
}

/// `[marbleId, newOwnerId, authedByCompany]`
///
/// Authorized by the outgoing owner's company; the incoming owner has no say.
pub fn transfer_marble(env: &Env<'_>, args: &[String]) -> RegistryResult<Marble> {
    env.check(TRANSFER_MARBLE, args)?;
    let (id, new_owner_id, claimed) = (&args[0], &args[1], &args[2]);
    debug!(id = %id, to = %new_owner_id, "transfer marble");

    let new_owner: Owner = env.load(new_owner_id)?;
    let mut marble: Marble = env.load(id)?;
    env.authorize(Action::TransferMarble, claimed, &marble.owner.company)?;

    let from = marble.owner.id.clone();
    marble.transfer_to(&new_owner);
    env.save(marble.clone())?;
    info!(id = %marble.id, from = %from, to = %new_owner.id, "marble transferred");
    Ok(marble)
}

/// `[id, authedByCompany]`
pub fn delete_marble(env: &Env<'_>, args: &[String]) -> RegistryResult<()> {
    env.check(DELETE_MARBLE, args)?;
    let (id, claimed) = (&args[0], &args[1]);
    debug!(id = %id, "delete marble");

    let marble: Marble = env.load(id)?;
    env.authorize(Action::DeleteMarble, claimed, &marble.owner.company)?;
    env.delete(id)?;
    info!(id = %id, "marble deleted");
    Ok(())
}

/// `[id]`
pub fn get_marble(env: &Env<'_>, args: &[String]) -> RegistryResult<Marble> {
    env.check(GET_MARBLE, args)?;
    env.load(&args[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::{create_owner, disable_owner};
    use crate::testing::{args, Fixture};
    use crate::ErrorKind;
    use arl_gate::AllowAll;
    use arl_store::KvStore;
    use arl_types::MarbleOwner;

    fn with_owners() -> Fixture {
        let fx = Fixture::new();
        fx.run(|env| create_owner(env, &args(&["o1", "bob", "acme"])))
            .unwrap();
        fx.run(|env| create_owner(env, &args(&["o2", "eve", "globex"])))
            .unwrap();
        fx
    }

    // -----------------------------------------------------------------------
    // create_marble
    // -----------------------------------------------------------------------

    #[test]
    fn create_snapshots_owner() {
        let fx = with_owners();
        let marble = fx
            .run(|env| create_marble(env, &args(&["m1", "Blue", "35", "o1", "acme"])))
            .unwrap();
        assert_eq!(marble.color, "blue");
        assert_eq!(marble.size, 35);
        assert_eq!(
            marble.owner,
            MarbleOwner {
                id: "o1".into(),
                username: "bob".into(),
                company: "acme".into()
            }
        );
        let stored = fx.run(|env| get_marble(env, &args(&["m1"]))).unwrap();
        assert_eq!(stored, marble);
    }

    #[test]
    fn create_rejects_non_numeric_size() {
        let fx = with_owners();
        let err = fx
            .run(|env| create_marble(env, &args(&["m1", "blue", "big", "o1", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_rejects_padded_size() {
        let fx = with_owners();
        for size in [" 35", "35 "] {
            let err = fx
                .run(|env| create_marble(env, &args(&["m1", "blue", size, "o1", "acme"])))
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(!fx.store().contains("m1").unwrap());
    }

    #[test]
    fn create_size_checked_before_owner() {
        let fx = Fixture::new();
        let err = fx
            .run(|env| create_marble(env, &args(&["m1", "blue", "big", "ghost", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn create_requires_owner() {
        let fx = Fixture::new();
        let err = fx
            .run(|env| create_marble(env, &args(&["m1", "blue", "3", "ghost", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn create_requires_owner_company() {
        let fx = with_owners();
        let err = fx
            .run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "globex"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(fx.run(|env| get_marble(env, &args(&["m1"]))).is_err());
    }

    #[test]
    fn create_twice_fails() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        let err = fx
            .run(|env| create_marble(env, &args(&["m1", "red", "4", "o1", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn create_over_owner_key_fails() {
        let fx = with_owners();
        let err = fx
            .run(|env| create_marble(env, &args(&["o2", "red", "4", "o1", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    }

    #[test]
    fn disabled_owner_can_still_receive_marbles() {
        let fx = with_owners();
        fx.run(|env| disable_owner(env, &args(&["o1", "acme"])))
            .unwrap();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
    }

    // -----------------------------------------------------------------------
    // transfer_marble
    // -----------------------------------------------------------------------

    #[test]
    fn transfer_by_outgoing_company() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        let marble = fx
            .run(|env| transfer_marble(env, &args(&["m1", "o2", "acme"])))
            .unwrap();
        assert_eq!(marble.owner.id, "o2");
        assert_eq!(marble.owner.username, "eve");
        assert_eq!(marble.owner.company, "globex");
    }

    #[test]
    fn transfer_by_incoming_company_is_refused() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        let err = fx
            .run(|env| transfer_marble(env, &args(&["m1", "o2", "globex"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        let marble = fx.run(|env| get_marble(env, &args(&["m1"]))).unwrap();
        assert_eq!(marble.owner.id, "o1");
    }

    #[test]
    fn transfer_to_unknown_owner() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        let err = fx
            .run(|env| transfer_marble(env, &args(&["m1", "ghost", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn transfer_unknown_marble() {
        let fx = with_owners();
        let err = fx
            .run(|env| transfer_marble(env, &args(&["m9", "o2", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // -----------------------------------------------------------------------
    // delete_marble
    // -----------------------------------------------------------------------

    #[test]
    fn delete_then_lookup_fails() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        fx.run(|env| delete_marble(env, &args(&["m1", "acme"])))
            .unwrap();
        let err = fx.run(|env| get_marble(env, &args(&["m1"]))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn delete_requires_owning_company() {
        let fx = with_owners();
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "acme"])))
            .unwrap();
        let err = fx
            .run(|env| delete_marble(env, &args(&["m1", "globex"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(fx.run(|env| get_marble(env, &args(&["m1"]))).is_ok());
    }

    #[test]
    fn delete_refuses_owner_documents() {
        let fx = with_owners();
        let err = fx
            .run(|env| delete_marble(env, &args(&["o1", "acme"])))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn allow_all_authority_skips_company_checks() {
        let fx = with_owners().with_authority(AllowAll);
        fx.run(|env| create_marble(env, &args(&["m1", "blue", "3", "o1", "anyone"])))
            .unwrap();
        fx.run(|env| delete_marble(env, &args(&["m1", "someone-else"])))
            .unwrap();
    }
}

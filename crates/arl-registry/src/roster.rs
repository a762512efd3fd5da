//! Roster maintenance: the `allVehicles` / `allParts` id indexes.
//!
//! Appends are plain read-modify-write with no version check. They are only
//! safe because every invocation runs inside one atomic ledger transaction;
//! over a store without that guarantee the append needs compare-and-swap.

use arl_store::{DocumentStore, KvStore};
use arl_types::{PartRoster, Record, Roster, VehicleRoster};
use tracing::{debug, info};

use crate::context::Env;
use crate::error::{RegistryError, RegistryResult};

/// Read a roster. A missing roster is a ledger failure; rosters are seeded
/// outside the create operations.
pub fn load<R: Roster>(store: &dyn KvStore) -> RegistryResult<R> {
    store
        .load_json::<R>(R::KEY)?
        .ok_or(RegistryError::RosterMissing { roster: R::KEY })
}

/// Append `id` to the roster `R`.
pub fn append<R: Roster>(store: &dyn KvStore, id: &str) -> RegistryResult<()> {
    let mut roster: R = load(store)?;
    roster.push(id.to_string());
    store.save_json(R::KEY, &roster)?;
    debug!(roster = R::KEY, id, size = roster.ids().len(), "roster appended");
    Ok(())
}

/// Load every record listed in roster `R`, in roster order.
///
/// An id that does not resolve to a `T` means the ledger is inconsistent.
pub fn resolve_all<R: Roster, T: Record>(env: &Env<'_>) -> RegistryResult<Vec<T>> {
    let roster: R = load(env.store)?;
    roster
        .ids()
        .iter()
        .map(|id| {
            env.load::<T>(id).map_err(|err| match err {
                RegistryError::NotFound { .. } => RegistryError::RosterInconsistent {
                    roster: R::KEY,
                    id: id.clone(),
                },
                other => other,
            })
        })
        .collect()
}

/// Write empty rosters where none exist. Returns the keys that were written.
pub fn seed(store: &dyn KvStore) -> RegistryResult<Vec<&'static str>> {
    let mut seeded = Vec::new();
    if seed_one::<VehicleRoster>(store)? {
        seeded.push(VehicleRoster::KEY);
    }
    if seed_one::<PartRoster>(store)? {
        seeded.push(PartRoster::KEY);
    }
    if !seeded.is_empty() {
        info!(rosters = ?seeded, "rosters seeded");
    }
    Ok(seeded)
}

fn seed_one<R: Roster>(store: &dyn KvStore) -> RegistryResult<bool> {
    if store.contains(R::KEY)? {
        return Ok(false);
    }
    store.save_json(R::KEY, &R::default())?;
    Ok(true)
}

//! Record mutation and authorization engine for the Asset Registry Ledger.
//!
//! Four stateless components run over an injected [`KvStore`]:
//!
//! - **Owner Registry** -- create, disable, and read owners
//! - **Marble Registry** -- create, transfer, and delete company-gated marbles
//! - **Vehicle Ledger** -- vehicles with change-tracked updates and service history
//! - **Part Ledger** -- parts with installation and warranty history
//!
//! Every operation takes the flat string array of one invocation, validates
//! and sanitizes it through `arl-gate`, reads what it needs, checks domain
//! invariants, and writes back whole documents.
//!
//! # Quick Start
//!
//! ```rust
//! use arl_registry::Registry;
//! use arl_store::InMemoryKvStore;
//!
//! let registry = Registry::new(InMemoryKvStore::new());
//! let args = |a: &[&str]| a.iter().map(|s| s.to_string()).collect::<Vec<_>>();
//!
//! registry.create_owner(&args(&["o1", "Bob", "acme"])).unwrap();
//! registry.create_owner(&args(&["o2", "Eve", "globex"])).unwrap();
//! registry.create_marble(&args(&["m1", "Blue", "35", "o1", "acme"])).unwrap();
//!
//! let marble = registry.transfer_marble(&args(&["m1", "o2", "acme"])).unwrap();
//! assert_eq!(marble.owner.company, "globex");
//! ```
//!
//! # Design Rules
//!
//! 1. Argument checks run before any store access.
//! 2. Every error is terminal for its invocation; nothing is retried.
//! 3. An invocation's writes commit together or not at all.
//! 4. Vehicle and part histories only grow.
//! 5. Authorization goes through [`arl_gate::Authority`], never inline.

pub mod clock;
pub mod context;
pub mod error;
pub mod marble;
pub mod owner;
pub mod part;
pub mod registry;
pub mod roster;
pub mod summary;
pub mod vehicle;

pub use arl_store::KvStore;
pub use clock::{Clock, FixedClock, SystemClock};
pub use context::Env;
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use registry::Registry;
pub use summary::{ChangeSummary, PartChange};


#[cfg(test)]
mod tests {
    use super::testing::{args, Fixture};
    use super::*;
    use arl_store::InMemoryKvStore;
    use arl_types::{Owner, PartRef, Roster, VehicleRoster, CREATE_TRANSACTION};
    use proptest::prelude::*;

    // -----------------------------------------------------------------------
    // Owners
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn created_owner_reads_back_enabled(
            id in "[a-z][a-z0-9]{0,15}",
            username in "[A-Za-z]{1,16}",
            company in "[A-Za-z0-9 ]{0,15}[A-Za-z0-9]",
        ) {
            prop_assume!(!arl_types::is_reserved_key(&id));
            let registry = Registry::new(InMemoryKvStore::new());
            registry.create_owner(&args(&[id.as_str(), username.as_str(), company.as_str()])).unwrap();
            let owner = registry.get_owner(&args(&[id.as_str()])).unwrap();
            prop_assert_eq!(owner, Owner::new(id.as_str(), username.to_lowercase(), company.as_str()));
        }
    }

    #[test]
    fn duplicate_owner_leaves_first_in_place() {
        let fx = Fixture::new();
        let first = fx.registry.create_owner(&args(&["o1", "bob", "acme"])).unwrap();
        let err = fx
            .registry
            .create_owner(&args(&["o1", "eve", "globex"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fx.registry.get_owner(&args(&["o1"])).unwrap(), first);
    }

    #[test]
    fn disable_twice_succeeds() {
        let fx = Fixture::new();
        fx.registry.create_owner(&args(&["o1", "bob", "acme"])).unwrap();
        assert!(!fx.registry.disable_owner(&args(&["o1", "acme"])).unwrap().enabled);
        assert!(!fx.registry.disable_owner(&args(&["o1", "acme"])).unwrap().enabled);
    }

    // -----------------------------------------------------------------------
    // Marbles
    // -----------------------------------------------------------------------

    fn marble_fixture() -> Fixture {
        let fx = Fixture::new();
        fx.registry.create_owner(&args(&["o1", "bob", "acme"])).unwrap();
        fx.registry.create_owner(&args(&["o2", "eve", "globex"])).unwrap();
        fx.registry
            .create_marble(&args(&["m1", "blue", "35", "o1", "acme"]))
            .unwrap();
        fx
    }

    #[test]
    fn transfer_authorized_by_current_company() {
        let fx = marble_fixture();
        let marble = fx
            .registry
            .transfer_marble(&args(&["m1", "o2", "acme"]))
            .unwrap();
        assert_eq!(marble.owner.id, "o2");
        assert_eq!(marble.owner.username, "eve");
        assert_eq!(marble.owner.company, "globex");
        assert_eq!(fx.registry.get_marble(&args(&["m1"])).unwrap(), marble);
    }

    proptest! {
        #[test]
        fn transfer_by_any_other_company_is_refused(company in "[A-Za-z0-9]{1,20}") {
            prop_assume!(company != "acme");
            let fx = marble_fixture();
            let before = fx.registry.get_marble(&args(&["m1"])).unwrap();
            let err = fx
                .registry
                .transfer_marble(&args(&["m1", "o2", company.as_str()]))
                .unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Unauthorized);
            prop_assert_eq!(fx.registry.get_marble(&args(&["m1"])).unwrap(), before);
        }
    }

    #[test]
    fn deleted_marble_is_gone() {
        let fx = marble_fixture();
        fx.registry.delete_marble(&args(&["m1", "acme"])).unwrap();
        let err = fx.registry.get_marble(&args(&["m1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = fx
            .registry
            .transfer_marble(&args(&["m1", "o2", "acme"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // -----------------------------------------------------------------------
    // Vehicles
    // -----------------------------------------------------------------------

    fn toyota(fx: &Fixture) -> String {
        fx.registry
            .create_vehicle(&args(&[
                "Toyota", "CH001", "VIN001", "alice", "LX", "V6", "Auto", "Red", "img.png",
            ]))
            .unwrap()
            .vehicle_id
    }

    fn vehicle_update(vehicle_id: &str, warranty_start: &str, warranty_end: &str, parts: &str) -> Vec<String> {
        args(&[
            vehicle_id,
            "UPDATE",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            warranty_start,
            warranty_end,
            "dealer1",
            parts,
            "",
            "",
        ])
    }

    #[test]
    fn create_vehicle_example() {
        let fx = Fixture::seeded();
        let id = toyota(&fx);
        let vehicle = fx.registry.get_vehicle(&args(&[id.as_str()])).unwrap();
        assert_eq!(vehicle.vehicle_transactions.len(), 1);
        assert_eq!(vehicle.vehicle_transactions[0].ttype, CREATE_TRANSACTION);

        let raw = fx.registry.read(&args(&[VehicleRoster::KEY])).unwrap();
        let roster: VehicleRoster = serde_json::from_str(&raw).unwrap();
        assert!(roster.contains(&id));
    }

    #[test]
    fn warranty_start_overrides_supplied_end() {
        let fx = Fixture::seeded();
        let id = toyota(&fx);
        let vehicle = fx
            .registry
            .update_vehicle(&vehicle_update(&id, "2020-Jan-01", "1999-Jan-01", ""))
            .unwrap();
        assert_eq!(vehicle.warranty_end_date, "2021-Jan-01");
    }

    #[test]
    fn repeated_part_is_added_then_replaced() {
        let fx = Fixture::seeded();
        let id = toyota(&fx);

        let first = fx
            .registry
            .update_vehicle(&vehicle_update(&id, "", "", "p7-BRK100"))
            .unwrap();
        assert!(first
            .last_transaction()
            .unwrap()
            .tvalue
            .contains("Added Part #p7"));
        assert_eq!(first.parts.len(), 1);

        let second = fx
            .registry
            .update_vehicle(&vehicle_update(&id, "", "", "p7-BRK100"))
            .unwrap();
        assert!(second
            .last_transaction()
            .unwrap()
            .tvalue
            .contains("Replaced Part #p7"));
        assert_eq!(second.parts.len(), 2);
        assert_eq!(second.parts[0], PartRef::new("p7", "BRK100"));
        assert_eq!(second.parts[1], PartRef::new("p7", "BRK100"));
    }

    // -----------------------------------------------------------------------
    // Parts
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn part_history_only_grows(ttypes in prop::collection::vec("[A-Z]{1,10}", 1..8)) {
            let fx = Fixture::seeded();
            fx.registry
                .create_part(&args(&["p1", "BRK100", "2020-Jan-01", "skf"]))
                .unwrap();
            let mut previous = fx.registry.get_part(&args(&["p1"])).unwrap().transactions;
            for ttype in &ttypes {
                let part = fx
                    .registry
                    .update_part(&args(&["p1", "v1", "", "", "dealer1", "", "", ttype.as_str()]))
                    .unwrap();
                prop_assert_eq!(part.transactions.len(), previous.len() + 1);
                prop_assert_eq!(&part.transactions[..previous.len()], &previous[..]);
                prop_assert_eq!(&part.transactions[previous.len()].ttype, ttype);
                previous = part.transactions;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Cross-type keyspace
    // -----------------------------------------------------------------------

    #[test]
    fn ids_are_shared_across_kinds() {
        let fx = Fixture::seeded();
        fx.registry.create_owner(&args(&["x1", "bob", "acme"])).unwrap();
        let err = fx
            .registry
            .create_part(&args(&["x1", "BRK100", "2020-Jan-01", "skf"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        let err = fx.registry.get_part(&args(&["x1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    // -----------------------------------------------------------------------
    // Ledger failures
    // -----------------------------------------------------------------------

    const VEHICLE: [&str; 9] = ["Toyota", "CH001", "VIN001", "alice", "LX", "V6", "Auto", "Red", ""];

    #[test]
    fn read_failure_is_not_reported_as_missing() {
        let registry = super::testing::failing_registry();
        registry.create_owner(&args(&["o1", "bob", "acme"])).unwrap();
        registry.store().fail_reads(true);

        let err = registry.get_owner(&args(&["o1"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);
        assert!(matches!(
            err,
            RegistryError::Ledger(arl_store::StoreError::Unavailable(_))
        ));
        let err = registry.get_owner(&args(&["nobody"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);
    }

    #[test]
    fn create_vehicle_surfaces_backend_failures() {
        let registry = super::testing::failing_registry();
        let roster_before = registry.store().inner().get(VehicleRoster::KEY).unwrap();

        registry.store().fail_reads(true);
        let err = registry.create_vehicle(&args(&VEHICLE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);

        registry.store().fail_reads(false);
        registry.store().fail_writes(true);
        let err = registry.create_vehicle(&args(&VEHICLE)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);

        assert_eq!(registry.store().inner().len(), 2);
        assert_eq!(
            registry.store().inner().get(VehicleRoster::KEY).unwrap(),
            roster_before
        );
    }

    #[test]
    fn update_part_surfaces_backend_failures() {
        let registry = super::testing::failing_registry();
        registry
            .create_part(&args(&["p1", "BRK100", "2020-Jan-01", "skf"]))
            .unwrap();
        let install = args(&["p1", "v1", "", "", "dealer1", "", "", "INSTALLED"]);

        registry.store().fail_reads(true);
        let err = registry.update_part(&install).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);

        registry.store().fail_reads(false);
        registry.store().fail_writes(true);
        let err = registry.update_part(&install).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerFailure);

        registry.store().fail_writes(false);
        let part = registry.get_part(&args(&["p1"])).unwrap();
        assert_eq!(part.transactions.len(), 1);
    }
}

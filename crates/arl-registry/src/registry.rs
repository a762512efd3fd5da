use arl_gate::{ArgSpec, Authority, CompanyMatch, GateConfig};
use arl_store::{KvStore, StagedStore};
use arl_types::{Marble, Owner, Part, Vehicle};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::context::Env;
use crate::error::{RegistryError, RegistryResult};
use crate::{marble, owner, part, roster, vehicle};

const READ: &[ArgSpec] = &[ArgSpec::required_text("key")];

/// The registry engine over one ledger.
///
/// Each operation takes the flat argument array of one invocation and runs
/// against a [`StagedStore`] overlay: its writes reach `S` only if the
/// operation returns `Ok`.
pub struct Registry<S: KvStore> {
    store: S,
    gate: GateConfig,
    authority: Box<dyn Authority>,
    clock: Box<dyn Clock>,
}

impl<S: KvStore> Registry<S> {
    /// Default gate limits, company-match authorization, wall-clock time.
    pub fn new(store: S) -> Self {
        Self {
            store,
            gate: GateConfig::default(),
            authority: Box::new(CompanyMatch),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_config(mut self, gate: GateConfig) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_authority(mut self, authority: impl Authority + 'static) -> Self {
        self.authority = Box::new(authority);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one invocation. Staged writes are committed on `Ok` and dropped
    /// on `Err`.
    pub(crate) fn invoke<T>(
        &self,
        op: &'static str,
        body: impl FnOnce(&Env<'_>) -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let staged = StagedStore::new(&self.store);
        let env = Env {
            store: &staged,
            gate: &self.gate,
            authority: self.authority.as_ref(),
            clock: self.clock.as_ref(),
        };
        match body(&env) {
            Ok(value) => {
                let mutations = staged.commit()?;
                debug!(op, mutations, "invocation committed");
                Ok(value)
            }
            Err(err) => {
                debug!(op, kind = %err.kind(), error = %err, "invocation failed");
                Err(err)
            }
        }
    }

    // ---- Bootstrap ----

    /// Write the empty `allVehicles` / `allParts` rosters where missing.
    pub fn seed_rosters(&self) -> RegistryResult<Vec<&'static str>> {
        self.invoke("seedRosters", |env| roster::seed(env.store))
    }

    // ---- Owner Registry ----

    pub fn create_owner(&self, args: &[String]) -> RegistryResult<Owner> {
        self.invoke("createOwner", |env| owner::create_owner(env, args))
    }

    pub fn disable_owner(&self, args: &[String]) -> RegistryResult<Owner> {
        self.invoke("disableOwner", |env| owner::disable_owner(env, args))
    }

    pub fn get_owner(&self, args: &[String]) -> RegistryResult<Owner> {
        self.invoke("getOwner", |env| owner::get_owner(env, args))
    }

    // ---- Marble Registry ----

    pub fn create_marble(&self, args: &[String]) -> RegistryResult<Marble> {
        self.invoke("createMarble", |env| marble::create_marble(env, args))
    }

    pub fn transfer_marble(&self, args: &[String]) -> RegistryResult<Marble> {
        self.invoke("transferMarble", |env| marble::transfer_marble(env, args))
    }

    pub fn delete_marble(&self, args: &[String]) -> RegistryResult<()> {
        self.invoke("deleteMarble", |env| marble::delete_marble(env, args))
    }

    pub fn get_marble(&self, args: &[String]) -> RegistryResult<Marble> {
        self.invoke("getMarble", |env| marble::get_marble(env, args))
    }

    // ---- Vehicle Ledger ----

    pub fn create_vehicle(&self, args: &[String]) -> RegistryResult<Vehicle> {
        self.invoke("createVehicle", |env| vehicle::create_vehicle(env, args))
    }

    pub fn update_vehicle(&self, args: &[String]) -> RegistryResult<Vehicle> {
        self.invoke("updateVehicle", |env| vehicle::update_vehicle(env, args))
    }

    pub fn get_vehicle(&self, args: &[String]) -> RegistryResult<Vehicle> {
        self.invoke("getVehicle", |env| vehicle::get_vehicle(env, args))
    }

    pub fn get_all_vehicles(&self, args: &[String]) -> RegistryResult<Vec<Vehicle>> {
        self.invoke("getAllVehicles", |env| vehicle::get_all_vehicles(env, args))
    }

    pub fn get_vehicle_by_vin(&self, args: &[String]) -> RegistryResult<Vehicle> {
        self.invoke("getVehicleByVIN", |env| vehicle::get_vehicle_by_vin(env, args))
    }

    pub fn get_vehicle_by_chassis_number(&self, args: &[String]) -> RegistryResult<Vehicle> {
        self.invoke("getVehicleByChassisNumber", |env| {
            vehicle::get_vehicle_by_chassis_number(env, args)
        })
    }

    // ---- Part Ledger ----

    pub fn create_part(&self, args: &[String]) -> RegistryResult<Part> {
        self.invoke("createPart", |env| part::create_part(env, args))
    }

    pub fn update_part(&self, args: &[String]) -> RegistryResult<Part> {
        self.invoke("updatePart", |env| part::update_part(env, args))
    }

    pub fn get_part(&self, args: &[String]) -> RegistryResult<Part> {
        self.invoke("getPart", |env| part::get_part(env, args))
    }

    pub fn get_all_parts(&self, args: &[String]) -> RegistryResult<Vec<Part>> {
        self.invoke("getAllParts", |env| part::get_all_parts(env, args))
    }

    // ---- Raw access ----

    /// `[key]`: the stored JSON text under `key`, whatever it holds.
    pub fn read(&self, args: &[String]) -> RegistryResult<String> {
        self.invoke("read", |env| {
            env.check(READ, args)?;
            let bytes = env
                .store
                .get(&args[0])?
                .ok_or_else(|| RegistryError::KeyNotFound(args[0].clone()))?;
            String::from_utf8(bytes).map_err(|e| {
                RegistryError::Ledger(arl_store::StoreError::CorruptDocument {
                    key: args[0].clone(),
                    reason: e.to_string(),
                })
            })
        })
    }
}

impl<S: KvStore + std::fmt::Debug> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("store", &self.store)
            .field("gate", &self.gate)
            .field("authority", &self.authority.name())
            .finish()
    }
}

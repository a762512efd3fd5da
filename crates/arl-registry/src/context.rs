//! Per-invocation environment shared by every component.

use arl_gate::{check_args, Action, ArgSpec, Authority, GateConfig};
use arl_store::{DocumentStore, KvStore, StoreError};
use arl_types::{format_timestamp, is_reserved_key, DocKind, Record};
use tracing::debug;

use crate::clock::Clock;
use crate::error::{RegistryError, RegistryResult};

/// Everything one operation may touch.
///
/// Components are stateless functions over an `Env`; the store it carries is
/// already scoped to the invocation (see [`crate::Registry`]).
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub store: &'a dyn KvStore,
    pub gate: &'a GateConfig,
    pub authority: &'a dyn Authority,
    pub clock: &'a dyn Clock,
}

impl<'a> Env<'a> {
    /// Validate the argument array against its declared shape.
    pub fn check(&self, specs: &[ArgSpec], args: &[String]) -> RegistryResult<()> {
        check_args(specs, args, self.gate)?;
        Ok(())
    }

    /// Reject ids that collide with a roster key.
    pub fn check_entity_id(&self, id: &str) -> RegistryResult<()> {
        if is_reserved_key(id) {
            return Err(RegistryError::invalid(format!(
                "'{id}' is a reserved key and cannot be used as an id"
            )));
        }
        Ok(())
    }

    pub fn authorize(&self, action: Action, claimed: &str, anchor: &str) -> RegistryResult<()> {
        self.authority.authorize(action, claimed, anchor)?;
        Ok(())
    }

    /// Current time as an audit timestamp.
    pub fn now(&self) -> String {
        format_timestamp(self.clock.now())
    }

    /// Load a typed record.
    ///
    /// Absent keys, undecodable payloads, and documents of another kind all
    /// resolve to `NotFound`. Backend failures stay `LedgerFailure`.
    pub fn load<T: Record>(&self, id: &str) -> RegistryResult<T> {
        match self.store.load_document(id) {
            Ok(Some(doc)) => T::from_document(doc).ok_or_else(|| {
                let expected = T::KIND;
                debug!(id, %expected, "key holds another document kind");
                RegistryError::not_found(T::KIND, id)
            }),
            Ok(None) => Err(RegistryError::not_found(T::KIND, id)),
            Err(StoreError::CorruptDocument { reason, .. }) => {
                debug!(id, %reason, "stored payload did not decode");
                Err(RegistryError::not_found(T::KIND, id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fail with `AlreadyExists` if anything is stored under `id`.
    pub fn ensure_vacant(&self, kind: DocKind, id: &str) -> RegistryResult<()> {
        if self.store.contains(id)? {
            return Err(RegistryError::AlreadyExists {
                kind,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Write a record under its own key.
    pub fn save<T: Record>(&self, record: T) -> RegistryResult<()> {
        let kind = T::KIND;
        debug!(key = record.key(), %kind, "document staged");
        self.store.save_document(&record.into())?;
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RegistryResult<()> {
        self.store.delete(id)?;
        Ok(())
    }
}

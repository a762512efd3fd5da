use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvStore, Mutation};

/// Write overlay for a single invocation.
///
/// Reads fall through to the underlying store unless the key was written or
/// deleted earlier in the same invocation. Nothing reaches the underlying
/// store until [`StagedStore::commit`]; dropping the overlay discards every
/// staged change. This gives local backends the all-or-nothing invocation
/// boundary the external ledger provides in production. It is not a
/// concurrency control: two overlays over the same store do not detect each
/// other's writes.
pub struct StagedStore<'a> {
    inner: &'a dyn KvStore,
    writes: RwLock<BTreeMap<String, Option<Vec<u8>>>>,
}

impl<'a> StagedStore<'a> {
    pub fn new(inner: &'a dyn KvStore) -> Self {
        Self {
            inner,
            writes: RwLock::new(BTreeMap::new()),
        }
    }

    /// Staged changes in key order, without consuming the overlay.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.writes
            .read()
            .expect("lock poisoned")
            .iter()
            .map(|(key, value)| match value {
                Some(value) => Mutation::Put {
                    key: key.clone(),
                    value: value.clone(),
                },
                None => Mutation::Delete { key: key.clone() },
            })
            .collect()
    }

    /// Apply every staged change to the underlying store as one batch.
    ///
    /// Returns the number of keys written or deleted.
    pub fn commit(self) -> StoreResult<usize> {
        let batch = self.mutations();
        if batch.is_empty() {
            return Ok(0);
        }
        self.inner.apply(&batch)?;
        tracing::debug!(mutations = batch.len(), "staged writes committed");
        Ok(batch.len())
    }
}

impl KvStore for StagedStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(staged) = self.writes.read().expect("lock poisoned").get(key) {
            return Ok(staged.clone());
        }
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        self.writes
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.writes
            .write()
            .expect("lock poisoned")
            .insert(key.to_string(), None);
        Ok(())
    }
}

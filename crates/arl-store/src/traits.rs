use crate::error::StoreResult;

/// A single staged change to the keyspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

impl Mutation {
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Delete { key } => key,
        }
    }
}

/// The external ledger's key-value surface.
///
/// Implementations must satisfy these invariants:
/// - One flat keyspace; the store never inspects values.
/// - `get` returns `Ok(None)` for absent keys and `Err` only on backend
///   failure.
/// - `put` overwrites unconditionally. `delete` of an absent key is a no-op.
/// - Every read and write of one invocation runs inside a single atomic,
///   isolated transaction provided by the caller's execution environment.
///   The trait itself performs no version checks.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove `key` from the keyspace.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Whether any value is stored under `key`.
    ///
    /// Default implementation calls `get()`. Backends may override to avoid
    /// copying the value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Apply a batch of mutations in order.
    ///
    /// Default implementation calls `put()`/`delete()` for each mutation and
    /// stops at the first error. Backends that can make the batch durable in
    /// one step (e.g., a single file replace) should override.
    fn apply(&self, batch: &[Mutation]) -> StoreResult<()> {
        for mutation in batch {
            match mutation {
                Mutation::Put { key, value } => self.put(key, value)?,
                Mutation::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvStore, Mutation};

type Entries = BTreeMap<String, Value>;

/// File-backed ledger store.
///
/// The whole keyspace is kept in memory and persisted as one pretty-printed
/// JSON object (`{"key": <document>, ...}`). Every successful write replaces
/// the file atomically: the new contents go to a temporary file in the same
/// directory, which is then renamed over the old one. A failed write leaves
/// both the file and the in-memory view unchanged.
///
/// Values must be JSON; `put` of anything else fails with
/// [`StoreError::Serialization`].
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Entries>,
}

impl JsonFileStore {
    /// Open the ledger at `path`. A missing file yields an empty ledger; the
    /// file is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read(&path)?;
            if raw.iter().all(u8::is_ascii_whitespace) {
                Entries::new()
            } else {
                serde_json::from_slice(&raw).map_err(|e| StoreError::CorruptDocument {
                    key: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
        } else {
            Entries::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened ledger file");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the ledger holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// All keys in lexical order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Apply `change` to a copy of the keyspace, persist the copy, then
    /// swap it in.
    fn mutate<F>(&self, change: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Entries) -> StoreResult<bool>,
    {
        let mut entries = self.entries.write().expect("lock poisoned");
        let mut next = entries.clone();
        if !change(&mut next)? {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &Entries) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(&mut writer, entries)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %self.path.display(), keys = entries.len(), "ledger file written");
        Ok(())
    }
}

fn parse_value(key: &str, value: &[u8]) -> StoreResult<Value> {
    if key.is_empty() {
        return Err(StoreError::EmptyKey);
    }
    serde_json::from_slice(value)
        .map_err(|e| StoreError::Serialization(format!("value for '{key}' is not JSON: {e}")))
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.read().expect("lock poisoned");
        entries
            .get(key)
            .map(|value| {
                serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
            })
            .transpose()
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let value = parse_value(key, value)?;
        self.mutate(|entries| {
            entries.insert(key.to_string(), value);
            Ok(true)
        })
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.mutate(|entries| Ok(entries.remove(key).is_some()))
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.read().expect("lock poisoned").contains_key(key))
    }

    /// The whole batch lands in one file replace.
    fn apply(&self, batch: &[Mutation]) -> StoreResult<()> {
        self.mutate(|entries| {
            for mutation in batch {
                match mutation {
                    Mutation::Put { key, value } => {
                        entries.insert(key.clone(), parse_value(key, value)?);
                    }
                    Mutation::Delete { key } => {
                        entries.remove(key);
                    }
                }
            }
            Ok(!batch.is_empty())
        })
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("key_count", &self.len())
            .finish()
    }
}

use arl_types::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::traits::KvStore;

/// Typed JSON access on top of any [`KvStore`].
///
/// Decoding failures surface as [`StoreError::CorruptDocument`] so callers
/// can tell "absent" (`Ok(None)`) from "present but unreadable".
pub trait DocumentStore: KvStore {
    /// Read and decode a tagged entity document.
    fn load_document(&self, key: &str) -> StoreResult<Option<Document>> {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => Document::from_bytes(&bytes)
                .map(Some)
                .map_err(|e| StoreError::CorruptDocument {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Encode and write a tagged entity document under its own key.
    fn save_document(&self, document: &Document) -> StoreResult<()> {
        let bytes = document
            .to_bytes()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(document.key(), &bytes)
    }

    /// Read and decode an untagged JSON document.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get(key)? {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::CorruptDocument {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
        }
    }

    /// Encode and write an untagged JSON document.
    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.put(key, &bytes)
    }
}

impl<S: KvStore + ?Sized> DocumentStore for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryKvStore;
    use arl_types::{Owner, PartRoster, Roster};

    #[test]
    fn document_round_trip_through_store() {
        let store = InMemoryKvStore::new();
        let doc = Document::from(Owner::new("o1", "bob", "acme"));
        store.save_document(&doc).unwrap();
        assert_eq!(store.load_document("o1").unwrap(), Some(doc));
    }

    #[test]
    fn absent_document_is_none() {
        let store = InMemoryKvStore::new();
        assert!(store.load_document("o1").unwrap().is_none());
    }

    #[test]
    fn garbage_is_corrupt_not_absent() {
        let store = InMemoryKvStore::with_entries([("o1", "not json")]);
        let err = store.load_document("o1").unwrap_err();
        assert!(matches!(err, StoreError::CorruptDocument { ref key, .. } if key == "o1"));
    }

    #[test]
    fn works_through_trait_objects() {
        let store = InMemoryKvStore::new();
        let dyn_store: &dyn KvStore = &store;
        dyn_store.save_json(PartRoster::KEY, &PartRoster::default()).unwrap();
        let roster: PartRoster = dyn_store.load_json(PartRoster::KEY).unwrap().unwrap();
        assert!(roster.ids().is_empty());
    }
}

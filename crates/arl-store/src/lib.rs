//! Key-value ledger boundary for the Asset Registry Ledger.
//!
//! The registry never persists anything itself. All state lives in an
//! external append-only ledger that exposes three primitives on a flat
//! keyspace: `get`, `put`, and `delete`. This crate models that boundary as
//! the [`KvStore`] trait and ships local backends for tests and the CLI.
//!
//! # Storage Backends
//!
//! - [`InMemoryKvStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`JsonFileStore`] -- whole keyspace persisted as one JSON object
//! - [`StagedStore`] -- per-invocation write overlay, committed all-or-nothing
//!
//! # Design Rules
//!
//! 1. The store never interprets values; typed access goes through
//!    [`DocumentStore`], which is implemented for every backend.
//! 2. Values are UTF-8 JSON documents.
//! 3. All backend errors are propagated, never silently ignored.
//! 4. Nothing is retried. A failed read or write ends the invocation.

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod staged;
pub mod traits;

pub use document::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryKvStore;
pub use staged::StagedStore;
pub use traits::{KvStore, Mutation};

//! Document model for the Asset Registry Ledger (ARL).
//!
//! Every entity the registry manages is a JSON document stored under a unique
//! key in one flat keyspace. This crate defines those documents as typed
//! records and the discriminated [`Document`] envelope that tags each payload
//! with its kind, so an owner can never be mistaken for a marble on read.
//! Every other ARL crate depends on `arl-types`.
//!
//! # Key Types
//!
//! - [`Owner`] / [`Marble`]: collectible custody records
//! - [`Vehicle`] / [`Part`]: lifecycle assets with append-only histories
//! - [`Document`]: `docType`-tagged envelope over the four entity kinds
//! - [`VehicleRoster`] / [`PartRoster`]: singleton id indexes
//! - [`warranty_end_date`]: one-year warranty arithmetic on `%Y-%b-%d` dates

pub mod document;
pub mod error;
pub mod marble;
pub mod owner;
pub mod part;
pub mod roster;
pub mod temporal;
pub mod vehicle;

pub use document::{DocKind, Document, Record};
pub use error::TypeError;
pub use marble::{Marble, MarbleOwner};
pub use owner::Owner;
pub use part::{Part, PartTransaction};
pub use roster::{is_reserved_key, PartRoster, Roster, VehicleRoster, RESERVED_KEYS};
pub use temporal::{format_timestamp, warranty_end_date, WARRANTY_DATE_FORMAT};
pub use vehicle::{Contact, PartRef, Vehicle, VehicleService, VehicleTransaction};

/// Transaction type recorded for the first history entry of every vehicle and part.
pub const CREATE_TRANSACTION: &str = "CREATE";

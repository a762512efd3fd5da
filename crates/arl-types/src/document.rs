use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::marble::Marble;
use crate::owner::Owner;
use crate::part::Part;
use crate::vehicle::Vehicle;

/// The kind of entity a document holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocKind {
    Owner,
    Marble,
    Vehicle,
    Part,
}

impl DocKind {
    /// The `docType` tag written into the stored JSON.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Owner => "marble_owner",
            Self::Marble => "marble",
            Self::Vehicle => "vehicle",
            Self::Part => "part",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Marble => write!(f, "marble"),
            Self::Vehicle => write!(f, "vehicle"),
            Self::Part => write!(f, "part"),
        }
    }
}

/// A stored entity, discriminated by its `docType` field.
///
/// Decoding validates the payload against the shape of the tagged kind, so a
/// document can only ever be read back as the kind it was written as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "docType")]
pub enum Document {
    #[serde(rename = "marble_owner")]
    Owner(Owner),
    #[serde(rename = "marble")]
    Marble(Marble),
    #[serde(rename = "vehicle")]
    Vehicle(Vehicle),
    #[serde(rename = "part")]
    Part(Part),
}

impl Document {
    pub fn kind(&self) -> DocKind {
        match self {
            Self::Owner(_) => DocKind::Owner,
            Self::Marble(_) => DocKind::Marble,
            Self::Vehicle(_) => DocKind::Vehicle,
            Self::Part(_) => DocKind::Part,
        }
    }

    /// The key this document is stored under.
    pub fn key(&self) -> &str {
        match self {
            Self::Owner(o) => &o.id,
            Self::Marble(m) => &m.id,
            Self::Vehicle(v) => &v.vehicle_id,
            Self::Part(p) => &p.part_id,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        serde_json::to_vec(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

/// A typed entity that can be wrapped in, and recovered from, a [`Document`].
pub trait Record: Clone + Into<Document> {
    const KIND: DocKind;

    /// The key this record is stored under.
    fn key(&self) -> &str;

    /// Unwrap the document if it holds this kind, `None` otherwise.
    fn from_document(doc: Document) -> Option<Self>;
}

impl From<Owner> for Document {
    fn from(owner: Owner) -> Self {
        Self::Owner(owner)
    }
}

impl From<Marble> for Document {
    fn from(marble: Marble) -> Self {
        Self::Marble(marble)
    }
}

impl From<Vehicle> for Document {
    fn from(vehicle: Vehicle) -> Self {
        Self::Vehicle(vehicle)
    }
}

impl From<Part> for Document {
    fn from(part: Part) -> Self {
        Self::Part(part)
    }
}

impl Record for Owner {
    const KIND: DocKind = DocKind::Owner;

    fn key(&self) -> &str {
        &self.id
    }

    fn from_document(doc: Document) -> Option<Self> {
        match doc {
            Document::Owner(owner) => Some(owner),
            _ => None,
        }
    }
}

impl Record for Marble {
    const KIND: DocKind = DocKind::Marble;

    fn key(&self) -> &str {
        &self.id
    }

    fn from_document(doc: Document) -> Option<Self> {
        match doc {
            Document::Marble(marble) => Some(marble),
            _ => None,
        }
    }
}

impl Record for Vehicle {
    const KIND: DocKind = DocKind::Vehicle;

    fn key(&self) -> &str {
        &self.vehicle_id
    }

    fn from_document(doc: Document) -> Option<Self> {
        match doc {
            Document::Vehicle(vehicle) => Some(vehicle),
            _ => None,
        }
    }
}

impl Record for Part {
    const KIND: DocKind = DocKind::Part;

    fn key(&self) -> &str {
        &self.part_id
    }

    fn from_document(doc: Document) -> Option<Self> {
        match doc {
            Document::Part(part) => Some(part),
            _ => None,
        }
    }
}

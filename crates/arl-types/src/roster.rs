//! Singleton documents indexing every id of one asset type.
//!
//! Rosters keep the bare shape the ledger was seeded with
//! (`{"vehicles":[]}`, `{"parts":[]}`) and carry no `docType` tag. They live
//! at fixed keys that entity ids may not claim.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Keys reserved for roster documents.
pub const RESERVED_KEYS: [&str; 2] = [VehicleRoster::KEY, PartRoster::KEY];

/// Returns `true` if `key` names a roster document.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// An ordered, append-only list of ids stored under a fixed key.
pub trait Roster: Default + Serialize + DeserializeOwned {
    /// Key the roster document lives under.
    const KEY: &'static str;

    fn ids(&self) -> &[String];

    fn push(&mut self, id: String);

    fn contains(&self, id: &str) -> bool {
        self.ids().iter().any(|existing| existing == id)
    }
}

/// `allVehicles`: every vehicle id in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoster {
    pub vehicles: Vec<String>,
}

impl Roster for VehicleRoster {
    const KEY: &'static str = "allVehicles";

    fn ids(&self) -> &[String] {
        &self.vehicles
    }

    fn push(&mut self, id: String) {
        self.vehicles.push(id);
    }
}

/// `allParts`: every part id in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRoster {
    pub parts: Vec<String>,
}

impl Roster for PartRoster {
    const KEY: &'static str = "allParts";

    fn ids(&self) -> &[String] {
        &self.parts
    }

    fn push(&mut self, id: String) {
        self.parts.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rosters_match_seed_shape() {
        assert_eq!(
            serde_json::to_string(&VehicleRoster::default()).unwrap(),
            r#"{"vehicles":[]}"#
        );
        assert_eq!(
            serde_json::to_string(&PartRoster::default()).unwrap(),
            r#"{"parts":[]}"#
        );
    }

    #[test]
    fn push_preserves_order() {
        let mut roster = PartRoster::default();
        roster.push("p2".into());
        roster.push("p1".into());
        assert_eq!(roster.ids(), ["p2".to_string(), "p1".to_string()]);
        assert!(roster.contains("p1"));
        assert!(!roster.contains("p3"));
    }

    #[test]
    fn reserved_keys() {
        assert!(is_reserved_key("allVehicles"));
        assert!(is_reserved_key("allParts"));
        assert!(!is_reserved_key("allMarbles"));
    }

    #[test]
    fn roster_without_list_field_is_rejected() {
        assert!(serde_json::from_str::<VehicleRoster>("{}").is_err());
        assert!(serde_json::from_str::<PartRoster>(r#"{"parts":"p1"}"#).is_err());
    }
}

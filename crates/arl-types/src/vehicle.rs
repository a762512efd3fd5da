use serde::{Deserialize, Serialize};

use crate::CREATE_TRANSACTION;

/// Contact details for a vehicle's owner or dealer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(alias = "phoneNumber")]
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Reference from a vehicle (or a service record) to an installed part.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRef {
    pub part_id: String,
    pub product_code: String,
}

impl PartRef {
    pub fn new(part_id: impl Into<String>, product_code: impl Into<String>) -> Self {
        Self {
            part_id: part_id.into(),
            product_code: product_code.into(),
        }
    }
}

/// One entry of a vehicle's append-only history.
///
/// `tvalue` is the human-readable change summary for updates; it is empty
/// for the creation entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleTransaction {
    #[serde(alias = "TType")]
    pub ttype: String,
    #[serde(alias = "TValue", default)]
    pub tvalue: String,
    #[serde(alias = "UpdatedBy")]
    pub updated_by: String,
    #[serde(alias = "UpdatedOn")]
    pub updated_on: String,
    #[serde(default)]
    pub warranty_start_date: String,
    #[serde(default)]
    pub warranty_end_date: String,
}

impl VehicleTransaction {
    /// The `CREATE` entry written when a vehicle is first registered.
    pub fn created(actor: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            ttype: CREATE_TRANSACTION.into(),
            tvalue: String::new(),
            updated_by: actor.into(),
            updated_on: at.into(),
            warranty_start_date: String::new(),
            warranty_end_date: String::new(),
        }
    }
}

/// A service visit recorded against a vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleService {
    pub service_description: String,
    pub service_done_by: String,
    pub service_done_on: String,
    #[serde(default)]
    pub parts: Vec<PartRef>,
}

/// A vehicle asset.
///
/// `vehicle_transactions` and `parts` only ever grow. Owner fields are
/// change-tracked on update; dealer fields are overwritten wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub vehicle_id: String,
    pub make: String,
    pub chassis_number: String,
    pub vin: String,
    pub date_of_manufacture: String,
    pub variant: String,
    pub engine: String,
    pub gear_box: String,
    pub color: String,
    pub image: String,
    pub license_plate_number: String,
    #[serde(alias = "dateofDelivery")]
    pub date_of_delivery: String,
    pub warranty_start_date: String,
    pub warranty_end_date: String,
    pub owner: Contact,
    pub dealer: Contact,
    #[serde(default)]
    pub parts: Vec<PartRef>,
    #[serde(default)]
    pub vehicle_transactions: Vec<VehicleTransaction>,
    #[serde(default)]
    pub vehicle_service: Vec<VehicleService>,
}

impl Vehicle {
    /// Whether any entry in the parts list carries `part_id`.
    pub fn has_part(&self, part_id: &str) -> bool {
        self.parts.iter().any(|p| p.part_id == part_id)
    }

    /// The most recent history entry.
    pub fn last_transaction(&self) -> Option<&VehicleTransaction> {
        self.vehicle_transactions.last()
    }
}

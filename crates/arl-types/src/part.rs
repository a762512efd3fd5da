use serde::{Deserialize, Serialize};

use crate::CREATE_TRANSACTION;

/// One entry of a part's append-only history.
///
/// Which context fields are populated depends on the event: the creation
/// entry carries the manufacture date, later entries carry vehicle linkage,
/// delivery, installation, and warranty dates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartTransaction {
    #[serde(alias = "TType")]
    pub ttype: String,
    pub user: String,
    pub date_of_manufacture: String,
    pub vehicle_id: String,
    pub date_of_delivery: String,
    pub date_of_installation: String,
    pub warranty_start_date: String,
    pub warranty_end_date: String,
}

impl PartTransaction {
    /// The `CREATE` entry written when a part is first registered.
    pub fn created(date_of_manufacture: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            ttype: CREATE_TRANSACTION.into(),
            user: user.into(),
            date_of_manufacture: date_of_manufacture.into(),
            ..Default::default()
        }
    }
}

/// A part asset with its installation/warranty history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub part_id: String,
    pub product_code: String,
    #[serde(default)]
    pub transactions: Vec<PartTransaction>,
}

impl Part {
    /// A freshly manufactured part with its single `CREATE` entry.
    pub fn manufactured(
        part_id: impl Into<String>,
        product_code: impl Into<String>,
        date_of_manufacture: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            product_code: product_code.into(),
            transactions: vec![PartTransaction::created(date_of_manufacture, user)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manufactured_part_has_create_entry() {
        let part = Part::manufactured("p1", "BRK-100", "2020-Jan-01", "skf");
        assert_eq!(part.transactions.len(), 1);
        let tx = &part.transactions[0];
        assert_eq!(tx.ttype, "CREATE");
        assert_eq!(tx.user, "skf");
        assert_eq!(tx.date_of_manufacture, "2020-Jan-01");
        assert!(tx.vehicle_id.is_empty());
    }

    #[test]
    fn transaction_wire_names() {
        let tx = PartTransaction {
            ttype: "INSTALLED".into(),
            vehicle_id: "v1".into(),
            date_of_installation: "2020-Mar-03".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["ttype"], "INSTALLED");
        assert_eq!(json["vehicleId"], "v1");
        assert_eq!(json["dateOfInstallation"], "2020-Mar-03");
    }
}

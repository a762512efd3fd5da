//! Human-readable change summaries recorded on vehicle updates.
//!
//! A summary is a run of fragments, each starting with a comma:
//! `,Owner Name to alice,License Plate Number to KA01,Parts: ~Added Part #p1`.

use std::fmt;

/// Whether a part id was already on the vehicle when it was listed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartChange {
    Added,
    /// The id was already present. The earlier reference is kept; the list
    /// only ever grows.
    Replaced,
}

impl fmt::Display for PartChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Replaced => write!(f, "Replaced"),
        }
    }
}

/// Accumulates change fragments for one update call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    text: String,
}

impl ChangeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value` and record `,<label> to <value>` if they differ.
    /// Returns whether the field changed.
    pub fn track(&mut self, label: &str, field: &mut String, value: &str) -> bool {
        if field == value {
            return false;
        }
        *field = value.to_string();
        self.text.push_str(&format!(",{label} to {value}"));
        true
    }

    /// Open the parts section.
    pub fn begin_parts(&mut self) {
        self.text.push_str(",Parts: ");
    }

    pub fn part(&mut self, change: PartChange, part_id: &str) {
        self.text.push_str(&format!("~{change} Part #{part_id}"));
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_fields_contribute_nothing() {
        let mut summary = ChangeSummary::new();
        let mut name = "alice".to_string();
        assert!(!summary.track("Owner Name", &mut name, "alice"));
        assert_eq!(summary, ChangeSummary::new());
    }

    #[test]
    fn changed_fields_are_updated_and_recorded() {
        let mut summary = ChangeSummary::new();
        let mut name = String::new();
        let mut plate = "OLD".to_string();
        assert!(summary.track("Owner Name", &mut name, "alice"));
        assert!(summary.track("License Plate Number", &mut plate, "KA01"));
        assert_eq!(name, "alice");
        assert_eq!(plate, "KA01");
        assert_eq!(
            summary.into_string(),
            ",Owner Name to alice,License Plate Number to KA01"
        );
    }

    #[test]
    fn clearing_a_field_is_a_change() {
        let mut summary = ChangeSummary::new();
        let mut email = "a@b.c".to_string();
        assert!(summary.track("Owner Email", &mut email, ""));
        assert_eq!(summary.into_string(), ",Owner Email to ");
        assert!(email.is_empty());
    }

    #[test]
    fn parts_section() {
        let mut summary = ChangeSummary::new();
        summary.begin_parts();
        summary.part(PartChange::Added, "p1");
        summary.part(PartChange::Replaced, "p2");
        assert_eq!(summary.into_string(), ",Parts: ~Added Part #p1~Replaced Part #p2");
    }
}

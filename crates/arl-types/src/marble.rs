use serde::{Deserialize, Serialize};

use crate::owner::Owner;

/// Owner snapshot embedded in a marble.
///
/// This is a copy taken when the marble was created or last transferred, not
/// a live reference; it may drift from the owner's current record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarbleOwner {
    pub id: String,
    pub username: String,
    pub company: String,
}

/// A collectible asset with a single current owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marble {
    pub id: String,
    pub color: String,
    pub size: i64,
    pub owner: MarbleOwner,
}

impl Marble {
    pub fn new(id: impl Into<String>, color: impl Into<String>, size: i64, owner: &Owner) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            size,
            owner: owner.snapshot(),
        }
    }

    /// Re-point custody at `new_owner`, refreshing the snapshot.
    pub fn transfer_to(&mut self, new_owner: &Owner) {
        self.owner = new_owner.snapshot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_replaces_whole_snapshot() {
        let alice = Owner::new("o1", "alice", "acme");
        let bob = Owner::new("o2", "bob", "globex");
        let mut marble = Marble::new("m1", "blue", 35, &alice);
        assert_eq!(marble.owner.company, "acme");

        marble.transfer_to(&bob);
        assert_eq!(marble.owner, bob.snapshot());
        assert_eq!(marble.color, "blue");
        assert_eq!(marble.size, 35);
    }

    #[test]
    fn snapshot_does_not_follow_owner_edits() {
        let mut alice = Owner::new("o1", "alice", "acme");
        let marble = Marble::new("m1", "red", 10, &alice);
        alice.username = "alicia".into();
        assert_eq!(marble.owner.username, "alice");
    }
}

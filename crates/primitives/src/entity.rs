//! Entity identifiers.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Unique identifier for an entity (firm or security) in the panel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct EntityId(pub u64);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_roundtrips_through_u64() {
        let id: EntityId = 10_107.into();
        let raw: u64 = id.into();
        assert_eq!(raw, 10_107);
        assert_eq!(id.to_string(), "10107");
    }

    #[test]
    fn entity_ids_order_numerically() {
        assert!(EntityId::new(2) < EntityId::new(10));
    }
}

//! Error types for the panel data model.

use crate::{EntityId, Period};

/// Errors raised when constructing panel structures that violate their invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    /// The same entity appears twice within one period.
    #[error("duplicate observation for entity {entity} in period {period}")]
    DuplicateObservation {
        /// Offending entity.
        entity: EntityId,
        /// Period containing the duplicate.
        period: Period,
    },

    /// Periods are not in strictly increasing order.
    #[error("periods out of order: {next} follows {previous}")]
    UnorderedPeriods {
        /// Earlier position in the sequence.
        previous: Period,
        /// Period that should have been later.
        next: Period,
    },

    /// Column name that does not name a known characteristic.
    #[error("unknown characteristic: {0}")]
    UnknownCharacteristic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let period = Period::from_ymd_opt(2020, 1, 31).unwrap();
        let err = PanelError::DuplicateObservation { entity: EntityId::new(7), period };
        assert_eq!(err.to_string(), "duplicate observation for entity 7 in period 2020-01-31");
    }
}

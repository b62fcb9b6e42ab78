//! Error types for factor construction.

use factorcheck_math::MathError;
use factorcheck_primitives::{Characteristic, PanelError};

/// Errors that can occur while building a factor series.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The panel does not carry the characteristic at all.
    #[error("panel has no {0} column")]
    MissingCharacteristic(Characteristic),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Panel invariant violated while assembling output.
    #[error("panel error: {0}")]
    Panel(#[from] PanelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::MissingCharacteristic(Characteristic::OperatingProfitability);
        assert_eq!(err.to_string(), "panel has no ope_be column");

        let err: ModelError = MathError::InvalidBucketCount(1).into();
        assert!(err.to_string().contains("bucket count"));
    }
}

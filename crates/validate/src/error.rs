//! Validation error types.

use factorcheck_math::MathError;
use factorcheck_model::ModelError;
use factorcheck_traits::ProviderError;

/// Errors raised while validating a replicated factor.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The benchmark series has no observations.
    #[error("benchmark series {0} is empty")]
    EmptyBenchmark(String),

    /// The replicated series has no observations, e.g. every period was degenerate.
    #[error("replicated series {0} is empty")]
    EmptyReplicated(String),

    /// Too few common periods for a meaningful correlation.
    #[error("insufficient overlap: need {required} periods, got {actual}")]
    InsufficientOverlap {
        /// Minimum overlap required.
        required: usize,
        /// Overlap found.
        actual: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Statistic could not be computed.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Factor build failed.
    #[error("build failed: {0}")]
    Model(#[from] ModelError),

    /// Benchmark could not be loaded.
    #[error("benchmark unavailable: {0}")]
    Provider(#[from] ProviderError),
}

impl ValidationError {
    /// Returns whether the failure reflects the data rather than malformed input.
    ///
    /// Recoverable failures are reported as a failed validation for the
    /// factor; the rest indicate a configuration or input problem.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InsufficientOverlap { .. } | Self::EmptyReplicated(_) | Self::Math(_) => true,
            Self::Provider(e) => e.is_recoverable(),
            Self::EmptyBenchmark(_) | Self::InvalidConfig(_) | Self::Model(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use factorcheck_primitives::{Characteristic, Weighting};

    use super::*;

    #[test]
    fn recoverability() {
        assert!(ValidationError::InsufficientOverlap { required: 24, actual: 10 }.is_recoverable());
        assert!(ValidationError::from(MathError::ZeroVariance).is_recoverable());
        assert!(
            ValidationError::from(ProviderError::MissingBenchmark {
                name: "be_me".to_string(),
                weighting: Weighting::Equal,
            })
            .is_recoverable()
        );
        assert!(ValidationError::EmptyReplicated("value_ew".to_string()).is_recoverable());
        assert!(!ValidationError::EmptyBenchmark("be_me".to_string()).is_recoverable());
        assert!(
            !ValidationError::from(ModelError::MissingCharacteristic(Characteristic::AssetGrowth))
                .is_recoverable()
        );
    }

    #[test]
    fn error_display() {
        let err = ValidationError::InsufficientOverlap { required: 24, actual: 10 };
        assert_eq!(err.to_string(), "insufficient overlap: need 24 periods, got 10");
    }
}

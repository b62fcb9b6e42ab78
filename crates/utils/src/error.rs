//! Error types for data ingestion.

use factorcheck_primitives::PanelError;
use factorcheck_traits::ProviderError;

/// Errors that can occur while ingesting frames.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A required column is absent.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Identifier column holds nulls.
    #[error("column {column} has {count} null identifiers")]
    NullIdentifiers {
        /// Column name.
        column: String,
        /// Number of nulls.
        count: usize,
    },

    /// Rows violate a panel invariant.
    #[error("invalid panel: {0}")]
    Panel(#[from] PanelError),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<UtilsError> for ProviderError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::Panel(e) => Self::Panel(e),
            other => Self::Source(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UtilsError::NullIdentifiers { column: "permno".to_string(), count: 3 };
        assert_eq!(err.to_string(), "column permno has 3 null identifiers");
    }

    #[test]
    fn converts_to_provider_error() {
        let err: ProviderError = UtilsError::MissingColumn("eom".to_string()).into();
        assert!(matches!(err, ProviderError::Source(ref msg) if msg.contains("eom")));

        let panel = PanelError::UnknownCharacteristic("xyz".to_string());
        let err: ProviderError = UtilsError::Panel(panel.clone()).into();
        assert!(matches!(err, ProviderError::Panel(e) if e == panel));
    }
}

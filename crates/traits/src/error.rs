//! Provider error types.

use factorcheck_primitives::{PanelError, Weighting};

/// Errors raised by panel and benchmark providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No benchmark series for the requested factor and scheme.
    #[error("no benchmark series named {name} for scheme {weighting}")]
    MissingBenchmark {
        /// Benchmark series name.
        name: String,
        /// Weighting scheme.
        weighting: Weighting,
    },

    /// Source data violated a panel invariant.
    #[error("invalid panel data: {0}")]
    Panel(#[from] PanelError),

    /// Any other source failure (I/O, parsing).
    #[error("provider failure: {0}")]
    Source(String),
}

impl ProviderError {
    /// Returns whether the caller may continue with other factors.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingBenchmark { .. })
    }
}

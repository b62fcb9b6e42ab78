//! Collaborator interfaces at the ingestion boundary.

use factorcheck_primitives::{BenchmarkSeries, CharacteristicPanel, Weighting};

use crate::ProviderError;

/// Source of the characteristic panel.
///
/// Implementations perform all I/O before the engine runs; the returned
/// panel is immutable and shared read-only across factor builds.
pub trait PanelProvider {
    /// Load the panel.
    ///
    /// # Errors
    /// Returns `ProviderError` if the source cannot be read or violates panel invariants.
    fn panel(&self) -> Result<CharacteristicPanel, ProviderError>;
}

/// Source of published benchmark factor series.
pub trait BenchmarkProvider: Send + Sync {
    /// Benchmark series `name` for the given weighting scheme, dated by
    /// realization month-end.
    ///
    /// # Errors
    /// Returns `ProviderError::MissingBenchmark` if no such series exists.
    fn benchmark(&self, name: &str, weighting: Weighting)
    -> Result<BenchmarkSeries, ProviderError>;
}

impl<T: BenchmarkProvider + ?Sized> BenchmarkProvider for &T {
    fn benchmark(
        &self,
        name: &str,
        weighting: Weighting,
    ) -> Result<BenchmarkSeries, ProviderError> {
        (**self).benchmark(name, weighting)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use factorcheck_primitives::Period;

    use super::*;

    struct Fixed(HashMap<(String, Weighting), BenchmarkSeries>);

    impl BenchmarkProvider for Fixed {
        fn benchmark(
            &self,
            name: &str,
            weighting: Weighting,
        ) -> Result<BenchmarkSeries, ProviderError> {
            self.0.get(&(name.to_string(), weighting)).cloned().ok_or_else(|| {
                ProviderError::MissingBenchmark { name: name.to_string(), weighting }
            })
        }
    }

    #[test]
    fn provider_by_reference() {
        let period = Period::from_ymd_opt(2020, 1, 31).unwrap();
        let series = BenchmarkSeries::new("be_me", vec![(period, 0.01)]).unwrap();
        let provider = Fixed(HashMap::from([(("be_me".to_string(), Weighting::Equal), series)]));

        let by_ref = &provider;
        assert_eq!(by_ref.benchmark("be_me", Weighting::Equal).unwrap().len(), 1);
        assert!(by_ref.benchmark("be_me", Weighting::Value).is_err());
    }
}

//! In-memory providers backed by polars frames.

use std::collections::HashMap;

use factorcheck_primitives::{BenchmarkSeries, CharacteristicPanel, Weighting};
use factorcheck_traits::{BenchmarkProvider, PanelProvider, ProviderError};
use polars::prelude::DataFrame;

use crate::{
    BenchmarkSchema, PanelSchema, UtilsError, benchmark_from_frame, benchmark_names,
    panel_from_frame,
};

/// Panel provider over an already-loaded firm-month frame.
#[derive(Debug, Clone)]
pub struct FramePanelProvider {
    frame: DataFrame,
    schema: PanelSchema,
}

impl FramePanelProvider {
    /// Create a provider for `frame` laid out as `schema`.
    #[must_use]
    pub const fn new(frame: DataFrame, schema: PanelSchema) -> Self {
        Self { frame, schema }
    }
}

impl PanelProvider for FramePanelProvider {
    fn panel(&self) -> Result<CharacteristicPanel, ProviderError> {
        Ok(panel_from_frame(&self.frame, &self.schema)?)
    }
}

/// Benchmark series held in memory, keyed by name and weighting scheme.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBenchmarks {
    series: HashMap<(String, Weighting), BenchmarkSeries>,
}

impl InMemoryBenchmarks {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series under its own name, replacing any previous one.
    pub fn insert(&mut self, weighting: Weighting, series: BenchmarkSeries) {
        self.series.insert((series.name().to_string(), weighting), series);
    }

    /// Load every series of a long-format frame published for `weighting`.
    ///
    /// Returns the number of series loaded.
    ///
    /// # Errors
    /// Returns `UtilsError` if the frame does not match `schema`.
    pub fn load_frame(
        &mut self,
        df: &DataFrame,
        weighting: Weighting,
        schema: &BenchmarkSchema,
    ) -> Result<usize, UtilsError> {
        let names = benchmark_names(df, schema)?;
        for name in &names {
            self.insert(weighting, benchmark_from_frame(df, name, schema)?);
        }
        Ok(names.len())
    }

    /// Number of stored series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

impl BenchmarkProvider for InMemoryBenchmarks {
    fn benchmark(
        &self,
        name: &str,
        weighting: Weighting,
    ) -> Result<BenchmarkSeries, ProviderError> {
        self.series
            .get(&(name.to_string(), weighting))
            .cloned()
            .ok_or_else(|| ProviderError::MissingBenchmark { name: name.to_string(), weighting })
    }
}

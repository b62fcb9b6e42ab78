//! Factor time-series builder.

use factorcheck_primitives::{
    Characteristic, CharacteristicPanel, FactorDefinition, FactorReturnSeries, Period, Weighting,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{BuildConfig, ModelError, PortfolioAggregator, sort_with_config};

/// One portfolio sort: what to rank on, how many buckets, which legs, how to weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSpec {
    /// Characteristic to sort on.
    pub characteristic: Characteristic,
    /// Number of buckets.
    pub num_buckets: usize,
    /// Bucket held long.
    pub long_bucket: usize,
    /// Bucket held short.
    pub short_bucket: usize,
    /// Weighting scheme within each leg.
    pub weighting: Weighting,
}

impl PortfolioSpec {
    /// Spec for a factor definition, with legs fixed by its polarity.
    #[must_use]
    pub const fn from_definition(
        definition: &FactorDefinition,
        num_buckets: usize,
        weighting: Weighting,
    ) -> Self {
        let (long_bucket, short_bucket) = definition.polarity.legs(num_buckets);
        Self {
            characteristic: definition.characteristic,
            num_buckets,
            long_bucket,
            short_bucket,
            weighting,
        }
    }

    /// Check bucket indices against the bucket count.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidConfig` for fewer than two buckets, an
    /// out-of-range leg, or identical long and short buckets.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.num_buckets < 2 {
            return Err(ModelError::InvalidConfig(format!(
                "need at least 2 buckets, got {}",
                self.num_buckets
            )));
        }
        if self.long_bucket >= self.num_buckets || self.short_bucket >= self.num_buckets {
            return Err(ModelError::InvalidConfig(format!(
                "legs ({}, {}) out of range for {} buckets",
                self.long_bucket, self.short_bucket, self.num_buckets
            )));
        }
        if self.long_bucket == self.short_bucket {
            return Err(ModelError::InvalidConfig("long and short bucket coincide".to_string()));
        }
        Ok(())
    }
}

/// Period accounting for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Periods that have a following period.
    pub eligible_periods: usize,
    /// Eligible periods skipped because too few entities could be sorted.
    pub degenerate_periods: usize,
    /// Eligible periods skipped because a leg had no member with a forward return.
    pub missing_return_periods: usize,
}

/// A built factor series together with its period accounting.
#[derive(Debug, Clone)]
pub struct FactorBuild {
    /// Long-short returns keyed by formation period.
    pub series: FactorReturnSeries,
    /// The same returns keyed by the panel period they were realized in.
    pub realized: FactorReturnSeries,
    /// Period accounting.
    pub stats: BuildStats,
}

impl FactorBuild {
    /// Returns dated `months` month-ends after formation.
    ///
    /// For `months >= 1` the count starts from the realization period actually
    /// used, so a month missing from the panel never shifts a return onto
    /// the wrong date.
    #[must_use]
    pub fn dated(&self, months: i32) -> FactorReturnSeries {
        if months >= 1 {
            self.realized.shift_month_ends(months - 1)
        } else {
            self.series.shift_month_ends(months)
        }
    }
}

enum PeriodOutcome {
    Spread { formation: Period, realization: Period, spread: f64 },
    Degenerate,
    MissingReturns,
}

/// Builds long-short factor return series from a characteristic panel.
///
/// For each period `t` with a following period `t + 1`, entities are sorted
/// on their period-`t` characteristic, legs are weighted by period-`t` market
/// weight, and the spread of period-`t + 1` realized returns is recorded
/// under the formation period `t`. Degenerate periods and periods with an
/// empty leg are skipped, never zero-filled.
#[derive(Debug, Clone, Default)]
pub struct FactorBuilder {
    config: BuildConfig,
}

impl FactorBuilder {
    /// Create a builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    /// Create a builder with custom configuration.
    #[must_use]
    pub const fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the series for `definition` under `weighting`, using the configured bucket count.
    ///
    /// The series is named `<factor>_<scheme>`.
    ///
    /// # Errors
    /// See [`Self::build_with_stats`].
    pub fn build_factor(
        &self,
        panel: &CharacteristicPanel,
        definition: &FactorDefinition,
        weighting: Weighting,
    ) -> Result<FactorBuild, ModelError> {
        let spec = PortfolioSpec::from_definition(definition, self.config.num_buckets, weighting);
        let name = format!("{}_{}", definition.name, weighting.code());
        self.build_with_stats(panel, &name, &spec)
    }

    /// Build a factor return series.
    ///
    /// # Errors
    /// See [`Self::build_with_stats`].
    pub fn build(
        &self,
        panel: &CharacteristicPanel,
        name: &str,
        spec: &PortfolioSpec,
    ) -> Result<FactorReturnSeries, ModelError> {
        Ok(self.build_with_stats(panel, name, spec)?.series)
    }

    /// Build a factor return series and report skipped periods.
    ///
    /// # Errors
    /// Returns `ModelError::MissingCharacteristic` if the panel lacks the
    /// characteristic column, and `ModelError::InvalidConfig` for an invalid spec.
    pub fn build_with_stats(
        &self,
        panel: &CharacteristicPanel,
        name: &str,
        spec: &PortfolioSpec,
    ) -> Result<FactorBuild, ModelError> {
        spec.validate()?;
        if !panel.has_column(spec.characteristic) {
            return Err(ModelError::MissingCharacteristic(spec.characteristic));
        }

        let aggregator = PortfolioAggregator::new(spec.weighting, self.config.cap_quantile)?;
        let sort_config = BuildConfig { num_buckets: spec.num_buckets, ..self.config.clone() };

        let outcomes = panel
            .sections()
            .par_windows(2)
            .map(|pair| {
                let (formation, realization) = (&pair[0], &pair[1]);
                let assignment = sort_with_config(formation, spec.characteristic, &sort_config)?;
                if assignment.is_empty() {
                    return Ok(PeriodOutcome::Degenerate);
                }
                let next_returns = realization.returns();
                let spread = aggregator.aggregate(
                    formation,
                    &assignment,
                    spec.long_bucket,
                    spec.short_bucket,
                    &next_returns,
                )?;
                Ok(spread.map_or(PeriodOutcome::MissingReturns, |spread| PeriodOutcome::Spread {
                    formation: formation.period(),
                    realization: realization.period(),
                    spread,
                }))
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let mut stats = BuildStats { eligible_periods: outcomes.len(), ..BuildStats::default() };
        let mut points = Vec::with_capacity(outcomes.len());
        let mut realized = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                PeriodOutcome::Spread { formation, realization, spread } => {
                    points.push((formation, spread));
                    realized.push((realization, spread));
                }
                PeriodOutcome::Degenerate => stats.degenerate_periods += 1,
                PeriodOutcome::MissingReturns => stats.missing_return_periods += 1,
            }
        }

        if stats.degenerate_periods > 0 || stats.missing_return_periods > 0 {
            warn!(
                factor = name,
                degenerate = stats.degenerate_periods,
                missing_returns = stats.missing_return_periods,
                eligible = stats.eligible_periods,
                "skipped periods while building factor"
            );
        }
        debug!(factor = name, periods = points.len(), "built factor series");

        let series = FactorReturnSeries::new(name, points)?;
        let realized = FactorReturnSeries::new(name, realized)?;
        Ok(FactorBuild { series, realized, stats })
    }
}

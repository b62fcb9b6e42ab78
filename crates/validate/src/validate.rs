//! Correlation-based validation against a benchmark series.

use factorcheck_math::{annualized_volatility, mean, pearson_correlation};
use factorcheck_primitives::{BenchmarkSeries, FactorReturnSeries, Period};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AlignedPair, ValidationError, align};

/// Validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// A replication passes when its correlation strictly exceeds this.
    pub threshold: f64,
    /// Minimum number of common periods.
    pub min_overlap: usize,
    /// Periods per year, for annualizing volatilities.
    pub periods_per_year: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { threshold: 0.95, min_overlap: 24, periods_per_year: 12.0 }
    }
}

/// Descriptive statistics over the aligned window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitStatistics {
    /// Mean replicated return per period.
    pub replicated_mean: f64,
    /// Mean benchmark return per period.
    pub benchmark_mean: f64,
    /// Annualized volatility of the replicated series.
    pub replicated_volatility: f64,
    /// Annualized volatility of the benchmark series.
    pub benchmark_volatility: f64,
    /// Annualized volatility of the per-period difference.
    pub tracking_error: f64,
}

impl FitStatistics {
    fn compute(pair: &AlignedPair, periods_per_year: f64) -> Option<Self> {
        Some(Self {
            replicated_mean: mean(&pair.left)?,
            benchmark_mean: mean(&pair.right)?,
            replicated_volatility: annualized_volatility(&pair.left, periods_per_year)?,
            benchmark_volatility: annualized_volatility(&pair.right, periods_per_year)?,
            tracking_error: annualized_volatility(&pair.differences(), periods_per_year)?,
        })
    }
}

/// Outcome of validating one replicated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Replicated series name.
    pub replicated: String,
    /// Benchmark series name.
    pub benchmark: String,
    /// Aligned series; `left` is replicated, `right` is benchmark.
    pub aligned: AlignedPair,
    /// Pearson correlation over the aligned window.
    pub correlation: f64,
    /// Threshold applied.
    pub threshold: f64,
    /// Whether `correlation > threshold`.
    pub passed: bool,
    /// Descriptive statistics.
    pub statistics: FitStatistics,
}

impl ValidationResult {
    /// Number of common periods.
    #[must_use]
    pub fn overlap(&self) -> usize {
        self.aligned.len()
    }

    /// First and last common period.
    #[must_use]
    pub fn span(&self) -> Option<(Period, Period)> {
        self.aligned.span()
    }

    /// Print a formatted validation report to stdout.
    pub fn print_summary(&self) {
        println!(
            "\n================================================================================"
        );
        println!("FACTOR VALIDATION: {} vs {}", self.replicated, self.benchmark);
        println!(
            "================================================================================"
        );
        if let Some((start, end)) = self.span() {
            println!("Period: {} to {} ({} months)", start, end, self.overlap());
        }
        println!(
            "Correlation: {:>8.4}  (threshold {:.2})  {}",
            self.correlation,
            self.threshold,
            if self.passed { "PASS" } else { "FAIL" }
        );
        println!(
            "--------------------------------------------------------------------------------"
        );
        println!("{:<20} {:>14} {:>14}", "", "Replicated", "Benchmark");
        println!("{:-<20} {:-^14} {:-^14}", "", "", "");
        let s = &self.statistics;
        println!(
            "{:<20} {:>13.2}% {:>13.2}%",
            "Mean (monthly)",
            s.replicated_mean * 100.0,
            s.benchmark_mean * 100.0
        );
        println!(
            "{:<20} {:>13.2}% {:>13.2}%",
            "Volatility (ann.)",
            s.replicated_volatility * 100.0,
            s.benchmark_volatility * 100.0
        );
        println!("{:<20} {:>13.2}%", "Tracking error", s.tracking_error * 100.0);
    }
}

/// Validates replicated series against benchmarks under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    /// Create a validator with custom configuration.
    #[must_use]
    pub const fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Align `replicated` with `benchmark` and test their correlation.
    ///
    /// Both series must be dated under the same convention. The correlation
    /// is symmetric: swapping the arguments gives the same coefficient.
    ///
    /// # Errors
    /// - `ValidationError::EmptyReplicated` / `EmptyBenchmark` for an empty input
    /// - `ValidationError::InsufficientOverlap` below the minimum overlap
    /// - `ValidationError::Math` if either aligned series is constant
    /// - `ValidationError::InvalidConfig` for a threshold outside `[-1, 1]`
    pub fn validate(
        &self,
        replicated: &FactorReturnSeries,
        benchmark: &BenchmarkSeries,
    ) -> Result<ValidationResult, ValidationError> {
        let config = &self.config;
        if !(-1.0..=1.0).contains(&config.threshold) {
            return Err(ValidationError::InvalidConfig(format!(
                "threshold {} outside [-1, 1]",
                config.threshold
            )));
        }
        if replicated.is_empty() {
            return Err(ValidationError::EmptyReplicated(replicated.name().to_string()));
        }
        if benchmark.is_empty() {
            return Err(ValidationError::EmptyBenchmark(benchmark.name().to_string()));
        }

        let aligned = align(replicated, benchmark);
        let required = config.min_overlap.max(2);
        if aligned.len() < required {
            return Err(ValidationError::InsufficientOverlap { required, actual: aligned.len() });
        }

        let correlation = pearson_correlation(&aligned.left, &aligned.right)?;
        let statistics = FitStatistics::compute(&aligned, config.periods_per_year).ok_or(
            ValidationError::InsufficientOverlap { required, actual: aligned.len() },
        )?;
        let passed = correlation > config.threshold;
        debug!(
            replicated = replicated.name(),
            benchmark = benchmark.name(),
            overlap = aligned.len(),
            correlation,
            passed,
            "validated series"
        );

        Ok(ValidationResult {
            replicated: replicated.name().to_string(),
            benchmark: benchmark.name().to_string(),
            aligned,
            correlation,
            threshold: config.threshold,
            passed,
            statistics,
        })
    }
}

/// Validate with the default minimum overlap and a custom threshold.
///
/// # Errors
/// See [`Validator::validate`].
pub fn validate(
    replicated: &FactorReturnSeries,
    benchmark: &BenchmarkSeries,
    threshold: f64,
) -> Result<ValidationResult, ValidationError> {
    Validator::with_config(ValidationConfig { threshold, ..ValidationConfig::default() })
        .validate(replicated, benchmark)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use factorcheck_math::MathError;
    use factorcheck_primitives::offset_month_ends;
    use rstest::rstest;

    use super::*;

    /// Monthly series of `n` month-ends from `start`, value `f(i)`.
    fn monthly(
        name: &str,
        start: (i32, u32),
        n: usize,
        f: impl Fn(usize) -> f64,
    ) -> FactorReturnSeries {
        let first = Period::from_ymd_opt(start.0, start.1, 1).unwrap();
        let points = (0..n)
            .map(|i| (offset_month_ends(first, i as i32).unwrap(), f(i)))
            .collect();
        FactorReturnSeries::new(name, points).unwrap()
    }

    fn wave(i: usize) -> f64 {
        0.02 * (i as f64 * 0.7).sin()
    }

    #[test]
    fn overlap_restricted_to_common_window() {
        // Benchmark 2010-01..2020-12, replicated 2015-01..2022-12
        let benchmark = monthly("bench", (2010, 1), 132, wave);
        let replicated = monthly("rep", (2015, 1), 96, |i| wave(i + 60) + 0.001 * (i % 3) as f64);

        let result = validate(&replicated, &benchmark, 0.95).unwrap();
        assert_eq!(result.overlap(), 72);
        let (start, end) = result.span().unwrap();
        assert_eq!(start, Period::from_ymd_opt(2015, 1, 31).unwrap());
        assert_eq!(end, Period::from_ymd_opt(2020, 12, 31).unwrap());
        assert!(result.passed);
    }

    #[test]
    fn short_overlap_reports_insufficient_overlap() {
        let benchmark = monthly("bench", (2020, 1), 10, wave);
        let replicated = monthly("rep", (2019, 1), 40, wave);

        let err = validate(&replicated, &benchmark, 0.95).unwrap_err();
        assert!(matches!(err, ValidationError::InsufficientOverlap { required: 24, actual: 10 }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn correlation_is_symmetric() {
        let a = monthly("a", (2000, 1), 60, wave);
        let b = monthly("b", (2000, 1), 60, |i| wave(i) + 0.01 * ((i * 7) % 5) as f64);

        let ab = validate(&a, &b, 0.95).unwrap();
        let ba = validate(&b, &a, 0.95).unwrap();
        assert_eq!(ab.correlation.to_bits(), ba.correlation.to_bits());
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(-1.0, false)]
    fn pass_requires_correlation_above_threshold(#[case] sign: f64, #[case] passed: bool) {
        let a = monthly("a", (2000, 1), 36, wave);
        let b = monthly("b", (2000, 1), 36, |i| sign * 2.0 * wave(i));

        let result = validate(&a, &b, 0.95).unwrap();
        assert_relative_eq!(result.correlation, sign, epsilon = 1e-12);
        assert_eq!(result.passed, passed);
    }

    #[test]
    fn threshold_is_strict() {
        let a = monthly("a", (2000, 1), 36, wave);
        let result = validate(&a, &a, 1.0).unwrap();
        assert_relative_eq!(result.correlation, 1.0, epsilon = 1e-12);
        assert!(!result.passed);
    }

    #[test]
    fn fit_statistics() {
        let a = monthly("a", (2000, 1), 48, wave);
        let b = monthly("b", (2000, 1), 48, |i| wave(i) + 0.01);

        let stats = validate(&a, &b, 0.95).unwrap().statistics;
        assert_relative_eq!(stats.benchmark_mean - stats.replicated_mean, 0.01, epsilon = 1e-12);
        assert_relative_eq!(stats.replicated_volatility, stats.benchmark_volatility, epsilon = 1e-12);
        assert_relative_eq!(stats.tracking_error, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_benchmark_is_fatal_empty_build_is_not() {
        let a = monthly("a", (2000, 1), 36, wave);
        let empty = FactorReturnSeries::new("be_me", Vec::new()).unwrap();

        let err = validate(&a, &empty, 0.95).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyBenchmark(ref name) if name == "be_me"));
        assert!(!err.is_recoverable());

        let err = validate(&empty, &a, 0.95).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyReplicated(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn constant_series_has_no_correlation() {
        let a = monthly("a", (2000, 1), 36, wave);
        let flat = monthly("flat", (2000, 1), 36, |_| 0.01);
        let err = validate(&a, &flat, 0.95).unwrap_err();
        assert!(matches!(err, ValidationError::Math(MathError::ZeroVariance)));
    }

    #[test]
    fn invalid_threshold() {
        let a = monthly("a", (2000, 1), 36, wave);
        assert!(matches!(validate(&a, &a, 1.5), Err(ValidationError::InvalidConfig(_))));
    }
}

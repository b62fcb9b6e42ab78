//! Replication report.

use std::fmt::{self, Write as _};

use factorcheck_model::BuildStats;
use factorcheck_primitives::Weighting;

use crate::{ValidationError, ValidationResult};

/// Outcome of building and validating one (factor, scheme) pair.
#[derive(Debug)]
pub struct FactorOutcome {
    /// Factor name.
    pub factor: String,
    /// Weighting scheme.
    pub weighting: Weighting,
    /// Benchmark series name.
    pub benchmark: String,
    /// Build accounting, absent if the build itself failed.
    pub build: Option<BuildStats>,
    /// Validation result or the reason it could not be produced.
    pub result: Result<ValidationResult, ValidationError>,
}

impl FactorOutcome {
    /// Whether validation ran and passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.as_ref().is_ok_and(|r| r.passed)
    }

    /// Correlation, if validation ran.
    #[must_use]
    pub fn correlation(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.correlation)
    }
}

/// Outcomes of a replication run, in (factor, scheme) order.
#[derive(Debug, Default)]
pub struct ReplicationReport {
    outcomes: Vec<FactorOutcome>,
}

impl ReplicationReport {
    /// Create a report from outcomes.
    #[must_use]
    pub const fn new(outcomes: Vec<FactorOutcome>) -> Self {
        Self { outcomes }
    }

    /// All outcomes.
    #[must_use]
    pub fn outcomes(&self) -> &[FactorOutcome] {
        &self.outcomes
    }

    /// Outcome for one factor and scheme.
    #[must_use]
    pub fn get(&self, factor: &str, weighting: Weighting) -> Option<&FactorOutcome> {
        self.outcomes.iter().find(|o| o.factor == factor && o.weighting == weighting)
    }

    /// Number of passing outcomes.
    #[must_use]
    pub fn n_passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Whether every outcome passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.outcomes.is_empty() && self.n_passed() == self.outcomes.len()
    }

    /// Outcomes whose validation could not be produced.
    pub fn errors(&self) -> impl Iterator<Item = (&FactorOutcome, &ValidationError)> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    /// Correlation table with one row per factor and one column per scheme.
    ///
    /// Passing cells are marked `*`; cells without a result show `n/a`.
    #[must_use]
    pub fn summary_table(&self) -> String {
        let mut factors: Vec<&str> = Vec::new();
        let mut schemes: Vec<Weighting> = Vec::new();
        for o in &self.outcomes {
            if !factors.contains(&o.factor.as_str()) {
                factors.push(&o.factor);
            }
            if !schemes.contains(&o.weighting) {
                schemes.push(o.weighting);
            }
        }

        let mut out = String::new();
        let _ = write!(out, "{:<22}", "Factor");
        for scheme in &schemes {
            let _ = write!(out, " {:>10}", scheme.code());
        }
        out.push('\n');
        let _ = write!(out, "{:-<22}", "");
        for _ in &schemes {
            let _ = write!(out, " {:-^10}", "");
        }
        out.push('\n');

        for factor in factors {
            let _ = write!(out, "{factor:<22}");
            for &scheme in &schemes {
                let cell = match self.get(factor, scheme) {
                    Some(o) => match o.correlation() {
                        Some(r) => format!("{r:.3}{}", if o.passed() { "*" } else { " " }),
                        None => "n/a ".to_string(),
                    },
                    None => String::new(),
                };
                let _ = write!(out, " {cell:>10}");
            }
            out.push('\n');
        }
        let _ = write!(out, "Passed: {} / {}", self.n_passed(), self.outcomes.len());
        out
    }

    /// Print every validation report followed by the summary table.
    pub fn print_summary(&self) {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(result) => result.print_summary(),
                Err(e) => {
                    println!(
                        "\n{} ({}) vs {}: not validated: {}",
                        outcome.factor, outcome.weighting, outcome.benchmark, e
                    );
                }
            }
        }
        println!("\nCORRELATION SUMMARY (* = passed):");
        println!("{}", self.summary_table());
    }
}

impl fmt::Display for ReplicationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary_table())
    }
}

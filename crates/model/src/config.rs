//! Factor construction configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by every factor build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Number of buckets per sort.
    pub num_buckets: usize,
    /// Minimum sortable entities for a non-degenerate period (None: `num_buckets`).
    pub min_entities: Option<usize>,
    /// Cross-sectional quantile of market weight used as the cap in capped value weighting.
    pub cap_quantile: f64,
    /// When set, breakpoints come only from entities whose market weight exceeds
    /// this quantile (0.2 excludes micro caps); otherwise buckets split by rank.
    pub breakpoint_weight_quantile: Option<f64>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            num_buckets: 5,
            min_entities: None,
            cap_quantile: 0.8,
            breakpoint_weight_quantile: None,
        }
    }
}

impl BuildConfig {
    /// Effective minimum number of sortable entities.
    #[must_use]
    pub fn min_entities(&self) -> usize {
        self.min_entities.map_or(self.num_buckets, |m| m.max(self.num_buckets))
    }
}

//! Bucket composition diagnostics.

use factorcheck_primitives::{Characteristic, CharacteristicPanel, Period};
use serde::{Deserialize, Serialize};

use crate::{BuildConfig, ModelError, sort_with_config};

/// Summary of one bucket in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketComposition {
    /// Formation period.
    pub period: Period,
    /// Bucket index, 0 is the lowest characteristic.
    pub bucket: usize,
    /// Number of members.
    pub n_entities: usize,
    /// Mean market weight of the members.
    pub mean_market_weight: f64,
    /// Mean characteristic value of the members.
    pub mean_characteristic: f64,
}

/// Describe every non-empty bucket of a sort on `characteristic`, period by period.
///
/// The sort uses the bucket count and breakpoint method of `config`, so the
/// rows describe the buckets a build with the same config trades.
/// Degenerate periods contribute no rows. Useful to sanity-check that
/// buckets are monotone in the characteristic and roughly balanced.
///
/// # Errors
/// Returns `ModelError::MissingCharacteristic` if the panel lacks the column,
/// or `ModelError::Math` if `num_buckets < 2`.
pub fn bucket_composition(
    panel: &CharacteristicPanel,
    characteristic: Characteristic,
    config: &BuildConfig,
) -> Result<Vec<BucketComposition>, ModelError> {
    if !panel.has_column(characteristic) {
        return Err(ModelError::MissingCharacteristic(characteristic));
    }

    let mut rows = Vec::new();
    for section in panel.sections() {
        let assignment = sort_with_config(section, characteristic, config)?;
        for (bucket, members) in assignment.buckets().iter().enumerate() {
            if members.is_empty() {
                continue;
            }
            let (weight_sum, char_sum) = members
                .iter()
                .filter_map(|&entity| section.get(entity))
                .fold((0.0, 0.0), |(w, c), obs| {
                    (
                        w + obs.market_weight.unwrap_or(0.0),
                        c + obs.characteristic(characteristic).unwrap_or(0.0),
                    )
                });
            let n = members.len() as f64;
            rows.push(BucketComposition {
                period: section.period(),
                bucket,
                n_entities: members.len(),
                mean_market_weight: weight_sum / n,
                mean_characteristic: char_sum / n,
            });
        }
    }
    Ok(rows)
}

//! Cross-sectional sorter.

use factorcheck_math::{MathError, bucket_for_rank, quantile, stable_ranks};
use factorcheck_primitives::{BucketAssignment, Characteristic, CrossSection, EntityId};

use crate::{BuildConfig, ModelError};

/// Sort one period's observations into `num_buckets` buckets by `characteristic`.
///
/// Equivalent to [`sort_with_minimum`] with a minimum of `num_buckets` entities.
///
/// # Errors
/// Returns `ModelError::Math` if `num_buckets < 2`.
pub fn sort(
    section: &CrossSection,
    characteristic: Characteristic,
    num_buckets: usize,
) -> Result<BucketAssignment, ModelError> {
    sort_with_minimum(section, characteristic, num_buckets, num_buckets)
}

/// Sort one period's observations into `num_buckets` buckets by `characteristic`.
///
/// Observations missing the characteristic, or lacking a strictly positive
/// market weight, are excluded from every bucket. The weight screen applies
/// under every weighting scheme so that bucket membership is identical
/// across schemes. Survivors are ranked ascending (ties keep panel order)
/// and split into rank-contiguous buckets at the `j / num_buckets` quantiles.
///
/// If fewer than `max(min_entities, num_buckets)` observations survive, the
/// period is degenerate and every bucket is empty.
///
/// # Errors
/// Returns `ModelError::Math` if `num_buckets < 2`.
pub fn sort_with_minimum(
    section: &CrossSection,
    characteristic: Characteristic,
    num_buckets: usize,
    min_entities: usize,
) -> Result<BucketAssignment, ModelError> {
    if num_buckets < 2 {
        return Err(MathError::InvalidBucketCount(num_buckets).into());
    }

    let (entities, values): (Vec<EntityId>, Vec<f64>) = section
        .observations()
        .iter()
        .filter(|obs| obs.positive_weight().is_some())
        .filter_map(|obs| obs.characteristic(characteristic).map(|v| (obs.entity, v)))
        .unzip();

    let n = entities.len();
    if n < min_entities.max(num_buckets) {
        return Ok(BucketAssignment::empty(section.period(), num_buckets));
    }

    let mut members = vec![Vec::new(); num_buckets];
    for (rank, idx) in stable_ranks(&values).into_iter().enumerate() {
        members[bucket_for_rank(rank, n, num_buckets)].push(entities[idx]);
    }

    Ok(BucketAssignment::new(section.period(), members))
}

/// Sort one period with the bucket count, minimum and breakpoint method of `config`.
///
/// # Errors
/// See [`sort_with_minimum`] and [`sort_by_weighted_breakpoints`].
pub fn sort_with_config(
    section: &CrossSection,
    characteristic: Characteristic,
    config: &BuildConfig,
) -> Result<BucketAssignment, ModelError> {
    match config.breakpoint_weight_quantile {
        Some(q) => sort_by_weighted_breakpoints(
            section,
            characteristic,
            config.num_buckets,
            config.min_entities(),
            q,
        ),
        None => {
            sort_with_minimum(section, characteristic, config.num_buckets, config.min_entities())
        }
    }
}

/// Sort one period against breakpoints drawn from its larger entities only.
///
/// Eligibility and the degenerate rule match [`sort_with_minimum`]. The
/// breakpoint universe is the eligible entities whose market weight exceeds
/// the `weight_quantile` quantile of eligible weights; the `j / num_buckets`
/// quantiles of their characteristic are the breakpoints. Every eligible
/// entity then goes to the first bucket whose upper breakpoint it does not
/// exceed, the top bucket taking the rest. Buckets may be unequal or empty.
/// A period whose breakpoint universe has fewer than `num_buckets` entities
/// is degenerate.
///
/// # Errors
/// Returns `ModelError::Math` if `num_buckets < 2` and
/// `ModelError::InvalidConfig` if `weight_quantile` is outside `[0, 1)`.
pub fn sort_by_weighted_breakpoints(
    section: &CrossSection,
    characteristic: Characteristic,
    num_buckets: usize,
    min_entities: usize,
    weight_quantile: f64,
) -> Result<BucketAssignment, ModelError> {
    if num_buckets < 2 {
        return Err(MathError::InvalidBucketCount(num_buckets).into());
    }
    if !(0.0..1.0).contains(&weight_quantile) {
        return Err(ModelError::InvalidConfig(format!(
            "breakpoint weight quantile must lie in [0, 1), got {weight_quantile}"
        )));
    }

    let eligible: Vec<(EntityId, f64, f64)> = section
        .observations()
        .iter()
        .filter_map(|obs| {
            let weight = obs.positive_weight()?;
            obs.characteristic(characteristic).map(|v| (obs.entity, v, weight))
        })
        .collect();

    let empty = BucketAssignment::empty(section.period(), num_buckets);
    if eligible.len() < min_entities.max(num_buckets) {
        return Ok(empty);
    }

    let weights: Vec<f64> = eligible.iter().map(|(_, _, w)| *w).collect();
    let cutoff = quantile(&weights, weight_quantile)?;
    let universe: Vec<f64> =
        eligible.iter().filter(|(_, _, w)| *w > cutoff).map(|(_, v, _)| *v).collect();
    if universe.len() < num_buckets {
        return Ok(empty);
    }

    let breakpoints = (1..num_buckets)
        .map(|j| quantile(&universe, j as f64 / num_buckets as f64))
        .collect::<Result<Vec<_>, _>>()?;

    let values: Vec<f64> = eligible.iter().map(|(_, v, _)| *v).collect();
    let mut members = vec![Vec::new(); num_buckets];
    for idx in stable_ranks(&values) {
        let value = values[idx];
        let bucket = breakpoints.iter().position(|bp| value <= *bp).unwrap_or(num_buckets - 1);
        members[bucket].push(eligible[idx].0);
    }

    Ok(BucketAssignment::new(section.period(), members))
}

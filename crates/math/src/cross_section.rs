//! Cross-sectional ranking and bucket assignment.

use std::cmp::Ordering;

use crate::MathError;

/// Indices of `values` in ascending value order.
///
/// The sort is stable: equal values keep their input order, so the entity
/// listed first ranks lower.
#[must_use]
pub fn stable_ranks(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));
    order
}

/// Bucket of the entity at 0-based `rank` among `n` ranked entities.
///
/// Bucket `j` covers ranks in `[ceil(j * n / k), ceil((j + 1) * n / k))`, i.e.
/// the breakpoints are the `j / k` empirical quantiles of the ranking. When
/// `n >= k` every bucket is non-empty and sizes differ by at most one.
#[must_use]
pub const fn bucket_for_rank(rank: usize, n: usize, num_buckets: usize) -> usize {
    rank * num_buckets / n
}

/// Assign each value to one of `num_buckets` rank-contiguous buckets.
///
/// Returns the bucket index of every input position. Values must be finite;
/// missing observations are expected to have been filtered out upstream.
///
/// # Errors
/// Returns `MathError::InvalidBucketCount` if `num_buckets < 2`, or
/// `MathError::NumericalInstability` if any value is not finite.
pub fn rank_buckets(values: &[f64], num_buckets: usize) -> Result<Vec<usize>, MathError> {
    if num_buckets < 2 {
        return Err(MathError::InvalidBucketCount(num_buckets));
    }
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability(format!("non-finite sort key {bad}")));
    }

    let n = values.len();
    let mut buckets = vec![0; n];
    for (rank, idx) in stable_ranks(values).into_iter().enumerate() {
        buckets[idx] = bucket_for_rank(rank, n, num_buckets);
    }
    Ok(buckets)
}

//! Portfolio leg weights.

use ndarray::Array1;

/// Equal weights `1 / n`.
#[must_use]
pub fn equal_weights(n: usize) -> Array1<f64> {
    if n == 0 {
        return Array1::zeros(0);
    }
    Array1::from_elem(n, 1.0 / n as f64)
}

/// Normalize non-negative raw weights to sum to 1.
///
/// Returns `None` when the total is not strictly positive.
#[must_use]
pub fn normalize_weights(raw: &Array1<f64>) -> Option<Array1<f64>> {
    let total: f64 = raw.sum();
    if total > 0.0 && total.is_finite() { Some(raw / total) } else { None }
}

/// Clip every raw weight at `cap`.
#[must_use]
pub fn cap_weights(raw: &Array1<f64>, cap: f64) -> Array1<f64> {
    raw.mapv(|w| w.min(cap))
}

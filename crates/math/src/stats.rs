//! Descriptive statistics over return series.

use std::cmp::Ordering;

use crate::MathError;

/// Arithmetic mean, `None` for empty input.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator), `None` below two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Sample standard deviation scaled by `sqrt(periods_per_year)`.
#[must_use]
pub fn annualized_volatility(values: &[f64], periods_per_year: f64) -> Option<f64> {
    sample_std(values).map(|s| s * periods_per_year.sqrt())
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// # Errors
/// Returns `MathError::InvalidQuantile` if `q` is outside `[0, 1]` and
/// `MathError::InsufficientData` for empty input.
pub fn quantile(values: &[f64], q: f64) -> Result<f64, MathError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::InvalidQuantile(q));
    }
    if values.is_empty() {
        return Err(MathError::InsufficientData { required: 1, actual: 0 });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// The computation is symmetric in its arguments: swapping `x` and `y`
/// yields a bit-identical result.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` for unequal lengths,
/// `MathError::InsufficientData` below two points and
/// `MathError::ZeroVariance` if either sequence is constant.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    if x.len() != y.len() {
        return Err(MathError::DimensionMismatch { expected: x.len(), actual: y.len() });
    }
    let n = x.len();
    if n < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: n });
    }

    let mx = x.iter().sum::<f64>() / n as f64;
    let my = y.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    // Rounding in the mean leaves tiny nonzero deviations for constant input.
    if sxx == 0.0 || syy == 0.0 || is_constant(x) || is_constant(y) {
        return Err(MathError::ZeroVariance);
    }
    let r = sxy / (sxx * syy).sqrt();
    if !r.is_finite() {
        return Err(MathError::NumericalInstability(format!("correlation evaluated to {r}")));
    }
    Ok(r.clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.first().is_some_and(|first| values.iter().all(|v| v == first))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn perfect_correlations() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson_correlation(&x, &z).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn correlation_is_symmetric() {
        let x = [0.013, -0.021, 0.004, 0.037, -0.009, 0.018];
        let y = [0.011, -0.017, 0.009, 0.029, -0.015, 0.012];
        let xy = pearson_correlation(&x, &y).unwrap();
        let yx = pearson_correlation(&y, &x).unwrap();
        assert_eq!(xy.to_bits(), yx.to_bits());
        assert!(xy > 0.9);
    }

    #[test]
    fn correlation_errors() {
        assert_eq!(
            pearson_correlation(&[1.0, 2.0], &[1.0]),
            Err(MathError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            pearson_correlation(&[1.0], &[1.0]),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        );
        assert_eq!(pearson_correlation(&[1.0, 1.0], &[1.0, 2.0]), Err(MathError::ZeroVariance));
    }

    #[rstest]
    #[case(0.01)]
    #[case(0.1)]
    #[case(1e-4)]
    fn constant_series_has_zero_variance(#[case] level: f64) {
        let flat = [level; 36];
        let moving: Vec<f64> = (0..36).map(|i| (i as f64 * 0.7).sin() * 0.02).collect();
        assert_eq!(pearson_correlation(&flat, &moving), Err(MathError::ZeroVariance));
        assert_eq!(pearson_correlation(&moving, &flat), Err(MathError::ZeroVariance));
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.0, 5.0)]
    #[case(0.5, 3.0)]
    #[case(0.8, 4.2)]
    fn quantile_linear(#[case] q: f64, #[case] expected: f64) {
        let values = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_relative_eq!(quantile(&values, q).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn quantile_rejects_bad_input() {
        assert_eq!(quantile(&[1.0], 1.5), Err(MathError::InvalidQuantile(1.5)));
        assert!(quantile(&[], 0.5).is_err());
    }

    #[test]
    fn moments() {
        let values = [0.01, 0.03, -0.01, 0.05];
        assert_relative_eq!(mean(&values).unwrap(), 0.02, epsilon = 1e-12);
        let sd = sample_std(&values).unwrap();
        assert_relative_eq!(
            annualized_volatility(&values, 12.0).unwrap(),
            sd * 12f64.sqrt(),
            epsilon = 1e-12
        );
        assert!(mean(&[]).is_none());
        assert!(sample_std(&[1.0]).is_none());
    }
}

//! Alignment of a replicated series with its benchmark.

use factorcheck_primitives::{FactorReturnSeries, Period};
use serde::{Deserialize, Serialize};

/// Two series restricted to their common periods, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// Common periods.
    pub periods: Vec<Period>,
    /// Left-hand values, aligned with `periods`.
    pub left: Vec<f64>,
    /// Right-hand values, aligned with `periods`.
    pub right: Vec<f64>,
}

impl AlignedPair {
    /// Number of common periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Check if there is no overlap.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// First and last common period.
    #[must_use]
    pub fn span(&self) -> Option<(Period, Period)> {
        Some((*self.periods.first()?, *self.periods.last()?))
    }

    /// Per-period differences `left - right`.
    #[must_use]
    pub fn differences(&self) -> Vec<f64> {
        self.left.iter().zip(&self.right).map(|(a, b)| a - b).collect()
    }
}

/// Inner join of two series on period.
///
/// Periods present in only one series are dropped. No shifting happens
/// here; both series must already be dated under the same convention.
#[must_use]
pub fn align(left: &FactorReturnSeries, right: &FactorReturnSeries) -> AlignedPair {
    let (a, b) = (left.points(), right.points());
    let mut pair = AlignedPair::default();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                pair.periods.push(a[i].0);
                pair.left.push(a[i].1);
                pair.right.push(b[j].1);
                i += 1;
                j += 1;
            }
        }
    }
    pair
}

#[cfg(test)]
mod tests {
    use factorcheck_primitives::month_end;

    use super::*;

    fn eom(y: i32, m: u32) -> Period {
        month_end(Period::from_ymd_opt(y, m, 1).unwrap()).unwrap()
    }

    #[test]
    fn inner_join_on_period() {
        let left = FactorReturnSeries::new(
            "rep",
            vec![(eom(2020, 1), 0.1), (eom(2020, 2), 0.2), (eom(2020, 4), 0.4)],
        )
        .unwrap();
        let right = FactorReturnSeries::new(
            "bench",
            vec![(eom(2020, 2), -0.2), (eom(2020, 3), -0.3), (eom(2020, 4), -0.4)],
        )
        .unwrap();

        let pair = align(&left, &right);
        assert_eq!(pair.periods, vec![eom(2020, 2), eom(2020, 4)]);
        assert_eq!(pair.left, vec![0.2, 0.4]);
        assert_eq!(pair.right, vec![-0.2, -0.4]);
        assert_eq!(pair.span(), Some((eom(2020, 2), eom(2020, 4))));
    }

    #[test]
    fn disjoint_series() {
        let left = FactorReturnSeries::new("a", vec![(eom(2020, 1), 0.1)]).unwrap();
        let right = FactorReturnSeries::new("b", vec![(eom(2021, 1), 0.1)]).unwrap();
        let pair = align(&left, &right);
        assert!(pair.is_empty());
        assert_eq!(pair.span(), None);
    }
}

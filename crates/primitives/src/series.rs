//! Factor return series.

use serde::{Deserialize, Serialize};

use crate::{PanelError, Period, offset_month_ends};

/// Ordered `(period, return)` pairs for one factor.
///
/// Periods strictly increase. Built once, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorReturnSeries {
    name: String,
    points: Vec<(Period, f64)>,
}

/// Externally supplied reference series; same shape as a replicated series.
pub type BenchmarkSeries = FactorReturnSeries;

impl FactorReturnSeries {
    /// Create a series from points in strictly increasing period order.
    ///
    /// # Errors
    /// Returns `PanelError::UnorderedPeriods` if periods do not strictly increase.
    pub fn new(name: impl Into<String>, points: Vec<(Period, f64)>) -> Result<Self, PanelError> {
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(PanelError::UnorderedPeriods { previous: pair[0].0, next: pair[1].0 });
            }
        }
        Ok(Self { name: name.into(), points })
    }

    /// Create a series from points in any order.
    ///
    /// # Errors
    /// Returns `PanelError::UnorderedPeriods` if a period repeats.
    pub fn from_unsorted(
        name: impl Into<String>,
        mut points: Vec<(Period, f64)>,
    ) -> Result<Self, PanelError> {
        points.sort_by_key(|(period, _)| *period);
        Self::new(name, points)
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `(period, return)` pairs in chronological order.
    #[must_use]
    pub fn points(&self) -> &[(Period, f64)] {
        &self.points
    }

    /// Periods in chronological order.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.points.iter().map(|(p, _)| *p)
    }

    /// Returns in chronological order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, r)| *r)
    }

    /// Return for `period`, if present.
    #[must_use]
    pub fn get(&self, period: Period) -> Option<f64> {
        self.points.binary_search_by_key(&period, |(p, _)| *p).ok().map(|i| self.points[i].1)
    }

    /// First and last period, if non-empty.
    #[must_use]
    pub fn span(&self) -> Option<(Period, Period)> {
        Some((self.points.first()?.0, self.points.last()?.0))
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Re-index every point `months` month-ends later.
    ///
    /// Used to move a series keyed by formation month-end onto the
    /// realization month-end. Points whose shifted date overflows are dropped,
    /// and only the first point of each target month is kept.
    #[must_use]
    pub fn shift_month_ends(&self, months: i32) -> Self {
        let mut points: Vec<(Period, f64)> = self
            .points
            .iter()
            .filter_map(|&(p, r)| offset_month_ends(p, months).map(|shifted| (shifted, r)))
            .collect();
        // Two dates inside one month collapse onto the same month-end.
        points.dedup_by_key(|(p, _)| *p);
        Self { name: self.name.clone(), points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eom(y: i32, m: u32) -> Period {
        crate::month_end(Period::from_ymd_opt(y, m, 1).unwrap()).unwrap()
    }

    #[test]
    fn rejects_unordered_points() {
        let err = FactorReturnSeries::new("hml", vec![(eom(2020, 2), 0.1), (eom(2020, 1), 0.2)]);
        assert!(err.is_err());

        let err = FactorReturnSeries::from_unsorted(
            "hml",
            vec![(eom(2020, 2), 0.1), (eom(2020, 2), 0.2)],
        );
        assert!(err.is_err());
    }

    #[test]
    fn from_unsorted_sorts() {
        let series = FactorReturnSeries::from_unsorted(
            "hml",
            vec![(eom(2020, 3), 0.3), (eom(2020, 1), 0.1), (eom(2020, 2), 0.2)],
        )
        .unwrap();
        assert_eq!(series.values().collect::<Vec<_>>(), vec![0.1, 0.2, 0.3]);
        assert_eq!(series.get(eom(2020, 2)), Some(0.2));
        assert_eq!(series.span(), Some((eom(2020, 1), eom(2020, 3))));
    }

    #[test]
    fn shift_moves_to_next_month_end() {
        let series =
            FactorReturnSeries::new("hml", vec![(eom(2020, 1), 0.1), (eom(2020, 12), 0.2)])
                .unwrap();
        let shifted = series.shift_month_ends(1);
        assert_eq!(shifted.periods().collect::<Vec<_>>(), vec![eom(2020, 2), eom(2021, 1)]);
        assert_eq!(shifted.name(), "hml");
    }
}

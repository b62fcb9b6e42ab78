//! Period arithmetic on month-end dates.

use chrono::{Datelike, Months};

/// A panel period, identified by its (month-end) calendar date.
pub type Period = chrono::NaiveDate;

/// Last calendar day of the month containing `date`.
#[must_use]
pub fn month_end(date: Period) -> Option<Period> {
    offset_month_ends(date, 0)
}

/// Month-end `months` months after (or before, if negative) the month of `date`.
///
/// The day of `date` is ignored: the result is always the last day of the
/// target month, so `offset_month_ends(2020-01-31, 1)` is `2020-02-29`.
#[must_use]
pub fn offset_month_ends(date: Period, months: i32) -> Option<Period> {
    let first = date.with_day(1)?;
    // First day of the month after the target month, then step back one day.
    let shift = months.checked_add(1)?;
    let next_first = if shift >= 0 {
        first.checked_add_months(Months::new(shift.unsigned_abs()))?
    } else {
        first.checked_sub_months(Months::new(shift.unsigned_abs()))?
    };
    next_first.pred_opt()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Period {
        Period::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2020, 1, 31), 1, date(2020, 2, 29))]
    #[case(date(2021, 1, 31), 1, date(2021, 2, 28))]
    #[case(date(2020, 12, 31), 1, date(2021, 1, 31))]
    #[case(date(2020, 3, 31), -1, date(2020, 2, 29))]
    #[case(date(2020, 1, 15), 0, date(2020, 1, 31))]
    #[case(date(2020, 1, 31), -13, date(2018, 12, 31))]
    fn offsets_land_on_month_end(#[case] from: Period, #[case] months: i32, #[case] to: Period) {
        assert_eq!(offset_month_ends(from, months), Some(to));
    }

    #[test]
    fn month_end_of_mid_month_date() {
        assert_eq!(month_end(date(2024, 4, 10)), Some(date(2024, 4, 30)));
    }
}

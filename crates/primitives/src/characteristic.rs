//! Typed characteristic field set.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PanelError;

/// A firm-level characteristic used to rank entities cross-sectionally.
///
/// Each variant maps to exactly one column of the characteristic data, so a
/// misspelled field is a compile error rather than an all-missing column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    /// Market equity (`me`).
    #[serde(rename = "me")]
    MarketEquity,
    /// Book-to-market equity (`be_me`).
    #[serde(rename = "be_me")]
    BookToMarket,
    /// Operating profits to book equity (`ope_be`).
    #[serde(rename = "ope_be")]
    OperatingProfitability,
    /// One-year asset growth (`at_gr1`).
    #[serde(rename = "at_gr1")]
    AssetGrowth,
    /// Twelve-month momentum skipping the most recent month (`ret_12_1`).
    #[serde(rename = "ret_12_1")]
    Momentum12m,
    /// One-month return, the short-term reversal signal (`ret_1_0`).
    #[serde(rename = "ret_1_0")]
    Reversal1m,
}

impl Characteristic {
    /// Number of characteristic fields.
    pub const COUNT: usize = 6;

    /// All characteristics, in field order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::MarketEquity,
        Self::BookToMarket,
        Self::OperatingProfitability,
        Self::AssetGrowth,
        Self::Momentum12m,
        Self::Reversal1m,
    ];

    /// Column name of this characteristic in the source data.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::MarketEquity => "me",
            Self::BookToMarket => "be_me",
            Self::OperatingProfitability => "ope_be",
            Self::AssetGrowth => "at_gr1",
            Self::Momentum12m => "ret_12_1",
            Self::Reversal1m => "ret_1_0",
        }
    }

    /// Position of this characteristic in a [`CharacteristicValues`] row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a characteristic by its column name.
    #[must_use]
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.column() == name)
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Characteristic {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_column(s).ok_or_else(|| PanelError::UnknownCharacteristic(s.to_string()))
    }
}

/// One observation's characteristic values, indexed by [`Characteristic`].
///
/// Non-finite inputs are stored as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicValues([Option<f64>; Characteristic::COUNT]);

impl CharacteristicValues {
    /// All values missing.
    #[must_use]
    pub const fn empty() -> Self {
        Self([None; Characteristic::COUNT])
    }

    /// Value of `characteristic`, if present.
    #[must_use]
    pub const fn get(&self, characteristic: Characteristic) -> Option<f64> {
        self.0[characteristic.index()]
    }

    /// Set the value of `characteristic`.
    pub fn set(&mut self, characteristic: Characteristic, value: Option<f64>) {
        self.0[characteristic.index()] = value.filter(|v| v.is_finite());
    }

    /// Builder-style variant of [`Self::set`].
    #[must_use]
    pub fn with(mut self, characteristic: Characteristic, value: f64) -> Self {
        self.set(characteristic, Some(value));
        self
    }

    /// Number of non-missing values.
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Characteristic::BookToMarket, "be_me")]
    #[case(Characteristic::OperatingProfitability, "ope_be")]
    #[case(Characteristic::AssetGrowth, "at_gr1")]
    #[case(Characteristic::Momentum12m, "ret_12_1")]
    #[case(Characteristic::Reversal1m, "ret_1_0")]
    fn column_names_roundtrip(#[case] characteristic: Characteristic, #[case] column: &str) {
        assert_eq!(characteristic.column(), column);
        assert_eq!(column.parse::<Characteristic>().unwrap(), characteristic);
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = "be_mee".parse::<Characteristic>().unwrap_err();
        assert!(err.to_string().contains("be_mee"));
    }

    #[test]
    fn indices_follow_field_order() {
        for (i, c) in Characteristic::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn non_finite_values_are_missing() {
        let mut values = CharacteristicValues::empty().with(Characteristic::BookToMarket, 0.7);
        values.set(Characteristic::AssetGrowth, Some(f64::NAN));
        values.set(Characteristic::Momentum12m, Some(f64::INFINITY));

        assert_eq!(values.get(Characteristic::BookToMarket), Some(0.7));
        assert_eq!(values.get(Characteristic::AssetGrowth), None);
        assert_eq!(values.get(Characteristic::Momentum12m), None);
        assert_eq!(values.count_present(), 1);
    }
}

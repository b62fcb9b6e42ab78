//! Factor definitions and weighting schemes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Characteristic;

/// Which end of the characteristic sort is held long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Long the top bucket, short the bottom bucket.
    #[serde(rename = "long")]
    HighMinusLow,
    /// Long the bottom bucket, short the top bucket.
    #[serde(rename = "short")]
    LowMinusHigh,
}

impl Polarity {
    /// `(long_bucket, short_bucket)` for a sort into `num_buckets` buckets.
    #[must_use]
    pub const fn legs(self, num_buckets: usize) -> (usize, usize) {
        let top = num_buckets.saturating_sub(1);
        match self {
            Self::HighMinusLow => (top, 0),
            Self::LowMinusHigh => (0, top),
        }
    }
}

/// Portfolio weighting scheme within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weighting {
    /// Each member weighs `1 / bucket size`.
    #[serde(rename = "ew", alias = "equal")]
    Equal,
    /// Members weighted by market weight.
    #[serde(rename = "vw", alias = "value")]
    Value,
    /// Members weighted by market weight capped at a cross-sectional quantile.
    #[serde(rename = "vw_cap", alias = "capped_value")]
    CappedValue,
}

impl Weighting {
    /// All schemes.
    pub const ALL: [Self; 3] = [Self::Equal, Self::Value, Self::CappedValue];

    /// Short code used in benchmark file names and reports.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Equal => "ew",
            Self::Value => "vw",
            Self::CappedValue => "vw_cap",
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Definition of a single-sort long-short factor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactorDefinition {
    /// Display name of the factor.
    pub name: String,
    /// Characteristic to sort on.
    pub characteristic: Characteristic,
    /// Name of the matching benchmark series.
    pub benchmark: String,
    /// Which end of the sort is held long.
    pub polarity: Polarity,
}

impl FactorDefinition {
    /// Create a new factor definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        characteristic: Characteristic,
        benchmark: impl Into<String>,
        polarity: Polarity,
    ) -> Self {
        Self { name: name.into(), characteristic, benchmark: benchmark.into(), polarity }
    }
}

/// The standard academic factors replicated by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardFactor {
    /// Size: small minus big on market equity.
    Size,
    /// Value: high minus low book-to-market.
    Value,
    /// Profitability: robust minus weak operating profitability.
    Profitability,
    /// Investment: conservative minus aggressive asset growth.
    Investment,
    /// Momentum: winners minus losers on 12-1 month returns.
    Momentum,
    /// Short-term reversal: losers minus winners on last month's return.
    ShortTermReversal,
}

impl StandardFactor {
    /// The five factors validated in a default run.
    pub const CORE: [Self; 5] = [
        Self::Value,
        Self::Profitability,
        Self::Investment,
        Self::Momentum,
        Self::ShortTermReversal,
    ];

    /// Every standard factor, size included.
    pub const ALL: [Self; 6] = [
        Self::Size,
        Self::Value,
        Self::Profitability,
        Self::Investment,
        Self::Momentum,
        Self::ShortTermReversal,
    ];

    /// Characteristic and long/short polarity of this factor.
    #[must_use]
    pub const fn components(self) -> (&'static str, Characteristic, Polarity) {
        match self {
            Self::Size => ("size", Characteristic::MarketEquity, Polarity::LowMinusHigh),
            Self::Value => ("value", Characteristic::BookToMarket, Polarity::HighMinusLow),
            Self::Profitability => {
                ("profitability", Characteristic::OperatingProfitability, Polarity::HighMinusLow)
            }
            Self::Investment => ("investment", Characteristic::AssetGrowth, Polarity::LowMinusHigh),
            Self::Momentum => ("momentum", Characteristic::Momentum12m, Polarity::HighMinusLow),
            Self::ShortTermReversal => {
                ("short_term_reversal", Characteristic::Reversal1m, Polarity::LowMinusHigh)
            }
        }
    }

    /// Full definition, with the benchmark named after the characteristic.
    #[must_use]
    pub fn definition(self) -> FactorDefinition {
        let (name, characteristic, polarity) = self.components();
        let benchmark = match self {
            Self::Size => "market_equity",
            _ => characteristic.column(),
        };
        FactorDefinition::new(name, characteristic, benchmark, polarity)
    }
}

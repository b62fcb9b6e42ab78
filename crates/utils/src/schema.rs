//! Column layouts of input frames.

use serde::{Deserialize, Serialize};

/// When the return column is realized relative to the row's date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnTiming {
    /// The return is realized over the month ending at the row's date.
    #[default]
    Realized,
    /// The return is realized over the following month.
    Lead,
}

/// Column layout of a firm-month characteristic frame.
///
/// Characteristic columns are recognized by their standard names
/// (`me`, `be_me`, `ope_be`, `at_gr1`, `ret_12_1`, `ret_1_0`); any that are
/// absent are simply not carried by the panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSchema {
    /// Entity identifier column.
    pub entity_col: String,
    /// Month-end date column.
    pub date_col: String,
    /// Market weight column.
    pub weight_col: String,
    /// Return column.
    pub return_col: String,
    /// Timing of the return column.
    pub return_timing: ReturnTiming,
}

impl Default for PanelSchema {
    fn default() -> Self {
        Self {
            entity_col: "permno".to_string(),
            date_col: "eom".to_string(),
            weight_col: "me".to_string(),
            return_col: "ret_exc_lead1m".to_string(),
            return_timing: ReturnTiming::Lead,
        }
    }
}

/// Column layout of a long-format benchmark frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkSchema {
    /// Series name column.
    pub name_col: String,
    /// Realization month-end column.
    pub date_col: String,
    /// Return column.
    pub return_col: String,
}

impl Default for BenchmarkSchema {
    fn default() -> Self {
        Self {
            name_col: "name".to_string(),
            date_col: "date".to_string(),
            return_col: "ret".to_string(),
        }
    }
}

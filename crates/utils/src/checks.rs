//! Raw data checks run before a frame becomes a panel.

use polars::prelude::*;
use tracing::{info, warn};

use crate::{PanelSchema, UtilsError};

/// Largest absolute monthly return considered plausible (1000%).
pub const MAX_PLAUSIBLE_RETURN: f64 = 10.0;

/// Findings of [`check_raw_frame`] that did not stop ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawDataReport {
    /// Rows in the frame.
    pub n_rows: usize,
    /// Rows with a null market weight.
    pub null_weights: usize,
    /// Rows with a null return.
    pub null_returns: usize,
    /// Largest absolute return, if any return is present.
    pub max_abs_return: Option<f64>,
}

impl RawDataReport {
    /// Whether any non-fatal issue was found.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.null_weights > 0
            || self.null_returns > 0
            || self.max_abs_return.is_some_and(|r| r > MAX_PLAUSIBLE_RETURN)
    }
}

/// Check a raw firm-month frame.
///
/// Null identifiers are fatal. Null market weights or returns and
/// implausibly large returns are logged as warnings and reported; those
/// rows are later excluded by the sorter and aggregator.
///
/// # Errors
/// Returns `UtilsError::MissingColumn` if a schema column is absent and
/// `UtilsError::NullIdentifiers` if the entity or date column has nulls.
pub fn check_raw_frame(
    df: &DataFrame,
    schema: &PanelSchema,
) -> Result<RawDataReport, UtilsError> {
    for name in [&schema.entity_col, &schema.date_col] {
        let count = column(df, name)?.null_count();
        if count > 0 {
            return Err(UtilsError::NullIdentifiers { column: name.clone(), count });
        }
    }

    let null_weights = column(df, &schema.weight_col)?.null_count();
    if null_weights > 0 {
        warn!(
            column = %schema.weight_col,
            nulls = null_weights,
            "null market weights will be excluded"
        );
    }

    let returns = column(df, &schema.return_col)?;
    let null_returns = returns.null_count();
    if null_returns > 0 {
        warn!(column = %schema.return_col, nulls = null_returns, "null returns will be excluded");
    }

    let returns = returns.as_materialized_series().cast(&DataType::Float64)?;
    let max_abs_return = returns.f64()?.into_iter().flatten().map(f64::abs).reduce(f64::max);
    if let Some(max) = max_abs_return.filter(|&r| r > MAX_PLAUSIBLE_RETURN) {
        warn!(
            max_abs_return = max,
            "maximum absolute monthly return {:.2}% is unusually high",
            max * 100.0
        );
    }

    let report = RawDataReport { n_rows: df.height(), null_weights, null_returns, max_abs_return };
    info!(rows = report.n_rows, warnings = report.has_warnings(), "raw data checks complete");
    Ok(report)
}

pub(crate) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, UtilsError> {
    df.column(name).map_err(|_| UtilsError::MissingColumn(name.to_string()))
}

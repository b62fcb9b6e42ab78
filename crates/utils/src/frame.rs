//! Conversion of polars frames into panels and benchmark series.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use factorcheck_primitives::{
    BenchmarkSeries, Characteristic, CharacteristicPanel, EntityId, Observation, PanelError,
    Period, month_end, offset_month_ends,
};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::{
    BenchmarkSchema, PanelSchema, ReturnTiming, UtilsError, check_raw_frame, checks::column,
};

/// Day number of 1970-01-01 counted from 0001-01-01 as day 1.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Build a characteristic panel from a firm-month frame.
///
/// Dates are normalized to month-end. Characteristic columns are picked up
/// by their standard names. Under [`ReturnTiming::Lead`] each return is moved
/// to the following month-end, creating a return-only observation where the
/// entity has no row in that month.
///
/// # Arguments
/// * `df` - Frame with one row per (entity, month)
/// * `schema` - Column layout
///
/// # Errors
/// Returns `UtilsError` if a required column is missing, identifiers are
/// null, or an (entity, month) pair repeats.
pub fn panel_from_frame(
    df: &DataFrame,
    schema: &PanelSchema,
) -> Result<CharacteristicPanel, UtilsError> {
    check_raw_frame(df, schema)?;

    let entities = entities(df, &schema.entity_col)?;
    let periods = dates(df, &schema.date_col)?;
    let weights = floats(df, &schema.weight_col)?;
    let returns = floats(df, &schema.return_col)?;
    let characteristics = Characteristic::ALL
        .into_iter()
        .filter(|c| df.column(c.column()).is_ok())
        .map(|c| Ok((c, floats(df, c.column())?)))
        .collect::<Result<Vec<_>, UtilsError>>()?;

    let mut rows: BTreeMap<(Period, EntityId), Observation> = BTreeMap::new();
    let mut lead_returns = Vec::new();
    for (i, (&entity, &period)) in entities.iter().zip(&periods).enumerate() {
        let mut obs = Observation::new(entity);
        obs.market_weight = weights[i];
        for (characteristic, values) in &characteristics {
            obs.characteristics.set(*characteristic, values[i]);
        }
        match schema.return_timing {
            ReturnTiming::Realized => obs.ret = returns[i],
            ReturnTiming::Lead => {
                if let Some(r) = returns[i] {
                    lead_returns.push((period, entity, r));
                }
            }
        }

        match rows.entry((period, entity)) {
            Entry::Occupied(_) => {
                return Err(PanelError::DuplicateObservation { entity, period }.into());
            }
            Entry::Vacant(slot) => {
                slot.insert(obs);
            }
        }
    }

    for (formation, entity, r) in lead_returns {
        let Some(realization) = offset_month_ends(formation, 1) else {
            continue;
        };
        rows.entry((realization, entity)).or_insert_with(|| Observation::new(entity)).ret =
            Some(r);
    }

    let columns: Vec<Characteristic> = characteristics.iter().map(|(c, _)| *c).collect();
    let panel = CharacteristicPanel::from_observations(
        rows.into_iter().map(|((period, _), obs)| (period, obs)),
        columns,
    )?;
    debug!(
        periods = panel.len(),
        observations = panel.n_observations(),
        columns = panel.columns().len(),
        "built panel from frame"
    );
    Ok(panel)
}

/// Extract benchmark series `name` from a long-format benchmark frame.
///
/// Dates are normalized to month-end; rows with a null return are dropped.
///
/// # Errors
/// Returns `UtilsError` if a column is missing or a month repeats.
pub fn benchmark_from_frame(
    df: &DataFrame,
    name: &str,
    schema: &BenchmarkSchema,
) -> Result<BenchmarkSeries, UtilsError> {
    for col_name in [&schema.name_col, &schema.date_col, &schema.return_col] {
        column(df, col_name)?;
    }

    let filtered = df
        .clone()
        .lazy()
        .filter(col(schema.name_col.as_str()).eq(lit(name)))
        .select([col(schema.date_col.as_str()), col(schema.return_col.as_str())])
        .collect()?;

    let periods = dates(&filtered, &schema.date_col)?;
    let returns = floats(&filtered, &schema.return_col)?;
    let points: Vec<(Period, f64)> =
        periods.into_iter().zip(returns).filter_map(|(p, r)| Some((p, r?))).collect();

    let dropped = filtered.height() - points.len();
    if dropped > 0 {
        warn!(benchmark = name, dropped, "dropped benchmark rows without a return");
    }
    Ok(BenchmarkSeries::from_unsorted(name, points)?)
}

/// Distinct series names in a long-format benchmark frame, sorted.
///
/// # Errors
/// Returns `UtilsError` if the name column is missing or not string-like.
pub fn benchmark_names(
    df: &DataFrame,
    schema: &BenchmarkSchema,
) -> Result<Vec<String>, UtilsError> {
    let names = column(df, &schema.name_col)?.as_materialized_series().cast(&DataType::String)?;
    let distinct: BTreeSet<String> =
        names.str()?.into_iter().flatten().map(str::to_string).collect();
    Ok(distinct.into_iter().collect())
}

fn entities(df: &DataFrame, name: &str) -> Result<Vec<EntityId>, UtilsError> {
    let series = column(df, name)?.as_materialized_series().cast(&DataType::UInt64)?;
    let ids: Option<Vec<EntityId>> =
        series.u64()?.into_iter().map(|v| v.map(EntityId::new)).collect();
    ids.ok_or_else(|| UtilsError::NullIdentifiers {
        column: name.to_string(),
        count: series.null_count(),
    })
}

fn dates(df: &DataFrame, name: &str) -> Result<Vec<Period>, UtilsError> {
    let series = column(df, name)?
        .as_materialized_series()
        .cast(&DataType::Date)?
        .cast(&DataType::Int32)?;
    let values: Vec<Option<Period>> = series
        .i32()?
        .into_iter()
        .map(|days| {
            let days = days?.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?;
            Period::from_num_days_from_ce_opt(days).and_then(month_end)
        })
        .collect();

    let invalid = values.iter().filter(|v| v.is_none()).count();
    if invalid > 0 {
        return Err(UtilsError::NullIdentifiers { column: name.to_string(), count: invalid });
    }
    Ok(values.into_iter().flatten().collect())
}

fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, UtilsError> {
    let series = column(df, name)?.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().map(|v| v.filter(|x| x.is_finite())).collect())
}

//! Boolean coercion for flag columns.
//!
//! Only two encodings are understood: numeric `0`/`1` and the text flags
//! `t`/`f` used by listings exports. Anything else is rejected instead of
//! guessed at.

use crate::error::{FeatureError, Result};
use crate::utils::{is_numeric_dtype, require_columns, series_of, string_values};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// How many offending values an error message lists.
const MAX_REPORTED_VALUES: usize = 5;

/// Convert a Series to Boolean, preserving order, length and nulls.
pub fn coerce_boolean(series: &Series) -> Result<Series> {
    let name = series.name().clone();

    let converted: Vec<Option<bool>> = match series.dtype() {
        DataType::Boolean => return Ok(series.clone()),
        dtype if is_numeric_dtype(dtype) => {
            let floats = series.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = floats.f64()?.into_iter().collect();
            let unsupported: BTreeSet<String> = values
                .iter()
                .flatten()
                .filter(|v| **v != 0.0 && **v != 1.0)
                .map(|v| v.to_string())
                .collect();
            reject_unsupported(series, unsupported)?;
            values.into_iter().map(|v| v.map(|x| x == 1.0)).collect()
        }
        DataType::String => {
            let values = string_values(series)?;
            let unsupported: BTreeSet<String> = values
                .iter()
                .flatten()
                .filter(|v| *v != "t" && *v != "f")
                .cloned()
                .collect();
            reject_unsupported(series, unsupported)?;
            values
                .into_iter()
                .map(|v| v.map(|s| s == "t"))
                .collect()
        }
        other => {
            return Err(FeatureError::UnsupportedValues {
                column: name.to_string(),
                conversion: "boolean".to_string(),
                values: vec![format!("<{}>", other)],
            });
        }
    };

    Ok(Series::new(name, converted))
}

fn reject_unsupported(series: &Series, unsupported: BTreeSet<String>) -> Result<()> {
    if unsupported.is_empty() {
        return Ok(());
    }
    Err(FeatureError::UnsupportedValues {
        column: series.name().to_string(),
        conversion: "boolean".to_string(),
        values: unsupported.into_iter().take(MAX_REPORTED_VALUES).collect(),
    })
}

/// Convert each listed column to Boolean.
///
/// Fails on the first column holding anything other than `{0, 1}` or
/// `{"t", "f"}`; no partial result is returned.
pub fn convert_columns_to_boolean<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<DataFrame> {
    require_columns(df, columns)?;

    let mut out = df.clone();
    for column in columns {
        let column = column.as_ref();
        let converted = coerce_boolean(series_of(&out, column)?)?;
        debug!("Converted '{}' to boolean", column);
        out.with_column(converted)?;
    }
    Ok(out)
}

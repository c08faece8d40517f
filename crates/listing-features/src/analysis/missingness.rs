//! How missing values co-occur across columns.

use crate::error::{FeatureError, Result};
use crate::transform::{Sentinel, sentinel_indicator};
use crate::utils::{require_columns, series_of, string_values};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Symmetric Pearson correlation matrix. Undefined entries are NaN.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlation between two labelled rows, if both exist.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.values[i][j])
    }
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    if n == 0.0 {
        return f64::NAN;
    }
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Correlate the missing-value masks of `missing_columns` with a flag that
/// is 1 where `indicator_column` equals 0.
///
/// Requested columns absent from the frame are skipped; if none remain the
/// call fails with [`FeatureError::NoValidColumns`]. The flag is the last
/// row/column of the matrix, named `{indicator_column}_0_vs_other`.
pub fn missing_correlation<S: AsRef<str>>(
    df: &DataFrame,
    missing_columns: &[S],
    indicator_column: &str,
) -> Result<CorrelationMatrix> {
    let present: Vec<&str> = missing_columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| df.column(c).is_ok())
        .collect();

    if present.is_empty() {
        let requested: Vec<&str> = missing_columns.iter().map(AsRef::as_ref).collect();
        return Err(FeatureError::NoValidColumns(requested.join(", ")));
    }
    if present.len() < missing_columns.len() {
        debug!(
            "Skipping {} requested columns not in the dataset",
            missing_columns.len() - present.len()
        );
    }

    let mut labels: Vec<String> = Vec::with_capacity(present.len() + 1);
    let mut masks: Vec<Vec<f64>> = Vec::with_capacity(present.len() + 1);

    for column in &present {
        let series = series_of(df, column)?;
        masks.push(
            series
                .is_null()
                .into_iter()
                .map(|v| if v.unwrap_or(false) { 1.0 } else { 0.0 })
                .collect(),
        );
        labels.push(column.to_string());
    }

    let flag = sentinel_indicator(series_of(df, indicator_column)?, &Sentinel::Number(0.0), true)?;
    masks.push(
        flag.i32()?
            .into_iter()
            .map(|v| f64::from(v.unwrap_or(0)))
            .collect(),
    );
    labels.push(format!("{}_0_vs_other", indicator_column));

    let values = masks
        .iter()
        .map(|a| masks.iter().map(|b| pearson(a, b)).collect())
        .collect();

    Ok(CorrelationMatrix { labels, values })
}

/// Rows where some, but not all, of a column group is missing.
#[derive(Debug, Clone)]
pub struct PartialMissing {
    /// Offending rows, restricted to the id, extra and group columns.
    pub frame: DataFrame,
    /// Id of each offending row, as text.
    pub ids: Vec<String>,
    /// Rows with at least one missing value in the group.
    pub any_missing: usize,
    /// Rows with every value of the group missing.
    pub all_missing: usize,
}

impl PartialMissing {
    pub fn partial(&self) -> usize {
        self.frame.height()
    }
}

/// Find rows with partially missing `group_columns` (e.g. review scores).
///
/// The input frame is not modified; the returned frame holds
/// `[id_column] + extra_columns + group_columns`.
pub fn partial_missing<S: AsRef<str>>(
    df: &DataFrame,
    group_columns: &[S],
    id_column: &str,
    extra_columns: &[S],
) -> Result<PartialMissing> {
    let mut selected: Vec<String> = vec![id_column.to_string()];
    selected.extend(extra_columns.iter().map(|c| c.as_ref().to_string()));
    selected.extend(group_columns.iter().map(|c| c.as_ref().to_string()));
    require_columns(df, &selected)?;

    let height = df.height();
    let mut any = BooleanChunked::full("any".into(), false, height);
    let mut all = BooleanChunked::full("all".into(), !group_columns.is_empty(), height);
    for column in group_columns {
        let nulls = series_of(df, column.as_ref())?.is_null();
        any = &any | &nulls;
        all = &all & &nulls;
    }
    let partial_mask = &any & &!&all;

    let any_missing = any.sum().unwrap_or(0) as usize;
    let all_missing = all.sum().unwrap_or(0) as usize;

    let frame = df.select(selected)?.filter(&partial_mask)?;
    let ids: Vec<String> = string_values(series_of(&frame, id_column)?)?
        .into_iter()
        .map(|v| v.unwrap_or_default())
        .collect();

    info!(
        "Listings with at least one missing value: {}, all missing: {}, some but not all: {}",
        any_missing,
        all_missing,
        frame.height()
    );

    Ok(PartialMissing {
        frame,
        ids,
        any_missing,
        all_missing,
    })
}

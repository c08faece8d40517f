//! Dataset-level recoding operations.
//!
//! Every operation borrows the input [`DataFrame`] and returns a new one;
//! the caller decides whether to replace its own reference. Missing columns
//! are checked before any work starts, so a failed call has no effect.
//!
//! - [`classify_column`] / [`categorize_reviews`]: numeric -> ordered labels
//! - [`recategorize_column`]: free text -> coarse labels
//! - [`convert_to_ordered_category`]: restrict a column to a label set
//! - [`dates`], [`indicators`], [`booleans`]: supporting derivations

pub mod booleans;
pub mod dates;
pub mod indicators;

pub use booleans::convert_columns_to_boolean;
pub use dates::days_since;
pub use indicators::{Sentinel, presence_indicator, sentinel_indicator, zero_count_flag};

use crate::categories::presets::review_rule;
use crate::categories::{IntervalRule, LookupTable, OrderedCategory};
use crate::error::Result;
use crate::utils::{
    numeric_values, parse_numeric_string, require_columns, series_of, string_values,
};
use polars::prelude::*;
use tracing::{debug, info};

/// Classify every value of a Series with `rule`, keeping the Series name.
///
/// In a String series a value that is already a label of the rule's
/// category is kept; every other value is parsed and classified on its own.
pub fn classify_series(series: &Series, rule: &IntervalRule) -> Result<Series> {
    let labels: Vec<&str> = if series.dtype() == &DataType::String {
        let category = rule.category();
        series
            .str()?
            .into_iter()
            .map(|v| match v {
                Some(raw) if category.contains(raw) => raw,
                other => rule.classify(other.and_then(parse_numeric_string)),
            })
            .collect()
    } else {
        numeric_values(series)?
            .into_iter()
            .map(|v| rule.classify(v))
            .collect()
    };
    Ok(Series::new(series.name().clone(), labels))
}

/// Replace a numeric column with its ordered labels under `rule`.
///
/// Labels already present are kept row by row (see [`classify_series`]),
/// so classifying twice gives the same column as classifying once.
pub fn classify_column(df: &DataFrame, column: &str, rule: &IntervalRule) -> Result<DataFrame> {
    let series = series_of(df, column)?;
    let category = rule.category();
    let recoded = classify_series(series, rule)?;

    let missing = count_label(&recoded, category.missing_label())?;
    info!(
        "Converted '{}' to '{}' categories ({} rows, {} {})",
        column,
        category.name(),
        recoded.len(),
        missing,
        category.missing_label()
    );

    let mut out = df.clone();
    out.with_column(recoded)?;
    Ok(out)
}

/// Recode review-score columns onto the ordered review scale.
///
/// `no_reviews` (missing) < `low_reviews` (< 4.0) < `medium_reviews`
/// ([4.0, 4.6)) < `high_reviews` ([4.6, 4.8]) < `top_reviews` (> 4.8).
pub fn categorize_reviews<S: AsRef<str>>(df: &DataFrame, review_columns: &[S]) -> Result<DataFrame> {
    require_columns(df, review_columns)?;

    let mut out = df.clone();
    for column in review_columns {
        out = classify_column(&out, column.as_ref(), review_rule())?;
    }
    Ok(out)
}

/// Map `source` through `table` and write the labels to `target`.
///
/// `target` may equal `source`, in which case the column is replaced. Every
/// value is looked up on its own by exact match; nulls and unknown values
/// take the table default.
pub fn recategorize_column(
    df: &DataFrame,
    source: &str,
    target: &str,
    table: &LookupTable,
) -> Result<DataFrame> {
    let series = series_of(df, source)?;
    let values = string_values(series)?;
    let mut defaulted = 0usize;
    let labels: Vec<&str> = values
        .iter()
        .map(|v| {
            let label = match v.as_deref() {
                Some(raw) => table.recategorize(raw),
                None => table.default_label(),
            };
            if label == table.default_label() {
                defaulted += 1;
            }
            label
        })
        .collect();

    info!(
        "Mapped '{}' -> '{}' with table '{}' ({} rows, {} to '{}')",
        source,
        target,
        table.name(),
        labels.len(),
        defaulted,
        table.default_label()
    );

    let mut out = df.clone();
    out.with_column(Series::new(target.into(), labels))?;
    Ok(out)
}

/// Restrict a column to the labels of `category`; anything else becomes null.
pub fn convert_to_ordered_category(
    df: &DataFrame,
    column: &str,
    category: &OrderedCategory,
) -> Result<DataFrame> {
    let series = series_of(df, column)?;
    let values = string_values(series)?;
    let before = values.iter().filter(|v| v.is_some()).count();

    let kept: Vec<Option<String>> = values
        .into_iter()
        .map(|v| v.filter(|s| category.contains(s)))
        .collect();

    let dropped = before - kept.iter().filter(|v| v.is_some()).count();
    if dropped > 0 {
        debug!(
            "{} values of '{}' are not '{}' labels and were set to null",
            dropped,
            column,
            category.name()
        );
    }

    let mut out = df.clone();
    out.with_column(Series::new(column.into(), kept))?;
    Ok(out)
}

fn count_label(series: &Series, label: &str) -> Result<usize> {
    Ok(series.str()?.into_iter().filter(|v| *v == Some(label)).count())
}

//! Date parsing and day-difference derivation.

use crate::error::Result;
use crate::utils::{is_datetime_dtype, require_columns, series_of, string_values};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::{debug, warn};

const SECONDS_PER_DAY: i64 = 86_400;

/// Datetime layouts tried in order; `%.f` also accepts a missing fraction.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Parse a date or datetime string. Returns `None` for anything unparsable.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Whole days from `date` to `reference`, rounded down.
pub fn days_between(date: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    (reference - date).num_seconds().div_euclid(SECONDS_PER_DAY)
}

fn parse_column(series: &Series) -> Result<Vec<Option<NaiveDateTime>>> {
    if is_datetime_dtype(series.dtype()) {
        let millis = series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
        let millis = millis.to_physical_repr();
        return Ok(millis
            .i64()?
            .into_iter()
            .map(|v| v.and_then(DateTime::from_timestamp_millis).map(|dt| dt.naive_utc()))
            .collect());
    }

    Ok(string_values(series)?
        .iter()
        .map(|v| v.as_deref().and_then(parse_datetime))
        .collect())
}

/// Replace `date_column` with `days_since_{date_column}`, the number of days
/// between each date and the same row's `reference_column`.
///
/// Unparsable or missing dates give null instead of failing. The reference
/// column is kept.
pub fn days_since(df: &DataFrame, date_column: &str, reference_column: &str) -> Result<DataFrame> {
    require_columns(df, &[date_column, reference_column])?;

    let dates = parse_column(series_of(df, date_column)?)?;
    let references = parse_column(series_of(df, reference_column)?)?;

    let days: Vec<Option<i64>> = dates
        .iter()
        .zip(references.iter())
        .map(|(date, reference)| match (date, reference) {
            (Some(d), Some(r)) => Some(days_between(*d, *r)),
            _ => None,
        })
        .collect();

    let source_nulls = series_of(df, date_column)?.null_count();
    let unparsed = days.iter().filter(|d| d.is_none()).count();
    if unparsed > source_nulls {
        warn!(
            "{} rows of '{}' have no day count (unparsable date or reference)",
            unparsed - source_nulls,
            date_column
        );
    }

    let new_name = format!("days_since_{}", date_column);
    debug!("Derived '{}' from '{}' and '{}'", new_name, date_column, reference_column);

    let mut out = df.drop(date_column)?;
    out.with_column(Series::new(new_name.as_str().into(), days))?;
    Ok(out)
}

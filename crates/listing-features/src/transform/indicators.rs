//! 0/1 indicators derived by comparing a column against a sentinel value.

use crate::error::Result;
use crate::utils::{numeric_values, series_of, string_values};
use polars::prelude::*;
use tracing::info;

/// Value a column is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentinel {
    /// Text placeholder. Missing values are imputed with it, so they match.
    Text(String),
    /// Numeric value. Missing values never match.
    Number(f64),
}

impl Sentinel {
    fn matches_each(&self, series: &Series) -> Result<Vec<bool>> {
        match self {
            Sentinel::Text(text) => Ok(string_values(series)?
                .into_iter()
                .map(|v| v.as_deref().is_none_or(|s| s == text))
                .collect()),
            Sentinel::Number(number) => Ok(numeric_values(series)?
                .into_iter()
                .map(|v| v == Some(*number))
                .collect()),
        }
    }
}

/// Int32 0/1 Series: 1 where the value equals `sentinel` if `when_equal`,
/// or where it differs from it otherwise.
pub fn sentinel_indicator(series: &Series, sentinel: &Sentinel, when_equal: bool) -> Result<Series> {
    let flags: Vec<i32> = sentinel
        .matches_each(series)?
        .into_iter()
        .map(|matched| i32::from(matched == when_equal))
        .collect();
    Ok(Series::new(series.name().clone(), flags))
}

/// Replace `column` with `{column}_present`: 1 where a real value was
/// given, 0 where it was missing or equal to `default_value`.
pub fn presence_indicator(df: &DataFrame, column: &str, default_value: &str) -> Result<DataFrame> {
    let series = series_of(df, column)?;
    let indicator = sentinel_indicator(series, &Sentinel::Text(default_value.to_string()), false)?
        .with_name(format!("{}_present", column).as_str().into());

    log_split(&indicator, "present", "missing");

    let mut out = df.drop(column)?;
    out.with_column(indicator)?;
    Ok(out)
}

/// Add `{column}_0_vs_other`: 1 where the numeric value is exactly 0.
pub fn zero_count_flag(df: &DataFrame, column: &str) -> Result<DataFrame> {
    let series = series_of(df, column)?;
    let flag = sentinel_indicator(series, &Sentinel::Number(0.0), true)?
        .with_name(format!("{}_0_vs_other", column).as_str().into());

    log_split(&flag, "zero", "other");

    let mut out = df.clone();
    out.with_column(flag)?;
    Ok(out)
}

fn log_split(indicator: &Series, one: &str, zero: &str) {
    let total = indicator.len();
    if total == 0 {
        return;
    }
    let ones = indicator
        .i32()
        .map(|ca| ca.into_iter().flatten().filter(|v| *v == 1).count())
        .unwrap_or(0);
    let pct = ones as f64 / total as f64 * 100.0;
    info!(
        "'{}': {:.1}% {}, {:.1}% {}",
        indicator.name(),
        pct,
        one,
        100.0 - pct,
        zero
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ints(df: &DataFrame, column: &str) -> Vec<i32> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn test_presence_indicator() {
        let df = df!(
            "description" => &[Some("Bright loft"), None, Some("No description provided")],
            "id" => &[1, 2, 3]
        )
        .unwrap();

        let out = presence_indicator(&df, "description", "No description provided").unwrap();

        assert!(out.column("description").is_err());
        assert_eq!(ints(&out, "description_present"), vec![1, 0, 0]);
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn test_zero_count_flag() {
        let df = df!("number_of_reviews" => &[Some(0), Some(12), None, Some(0)]).unwrap();

        let out = zero_count_flag(&df, "number_of_reviews").unwrap();

        assert!(out.column("number_of_reviews").is_ok());
        assert_eq!(ints(&out, "number_of_reviews_0_vs_other"), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_sentinel_indicator_differs() {
        let series = Series::new("n".into(), &[Some(5.0), Some(0.0), None]);
        let flags = sentinel_indicator(&series, &Sentinel::Number(0.0), false).unwrap();
        let values: Vec<i32> = flags.i32().unwrap().into_iter().flatten().collect();
        assert_eq!(values, vec![1, 0, 1]);
    }

    #[test]
    fn test_presence_missing_column() {
        let df = df!("id" => &[1]).unwrap();
        assert!(presence_indicator(&df, "host_about", "none").is_err());
    }
}

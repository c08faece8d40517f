//! Shared utilities for reading and checking dataset columns.
//!
//! Every recoding step goes through these helpers so numeric parsing and
//! missing-column checks behave the same everywhere.

use crate::error::{FeatureError, Result};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a date or datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Fail with [`FeatureError::ColumnNotFound`] on the first absent column.
///
/// Called before any transformation starts so a failing call never does
/// partial work.
pub fn require_columns<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<()> {
    for column in columns {
        let column = column.as_ref();
        if df.column(column).is_err() {
            return Err(FeatureError::ColumnNotFound(column.to_string()));
        }
    }
    Ok(())
}

/// Fetch a column as a materialized Series.
pub fn series_of<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Series> {
    df.column(column)
        .map(|c| c.as_materialized_series())
        .map_err(|_| FeatureError::ColumnNotFound(column.to_string()))
}

/// Read a Series as optional f64 values.
///
/// Numeric columns are widened, string columns are parsed with
/// [`parse_numeric_string`] (so `"85%"` reads as `85.0`), and NaN is
/// reported as absent.
///
/// Float32 values are widened through their shortest decimal form, so a
/// stored `4.6f32` reads as `4.6` and not `4.599999904632568`.
pub fn numeric_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let values: Vec<Option<f64>> = if series.dtype() == &DataType::String {
        series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_string))
            .collect()
    } else if series.dtype() == &DataType::Float32 {
        series
            .f32()?
            .into_iter()
            .map(|v| v.and_then(|x| x.to_string().parse::<f64>().ok()))
            .collect()
    } else {
        let floats = series.cast(&DataType::Float64)?;
        floats.f64()?.into_iter().collect()
    };

    Ok(values
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Read a Series as optional strings, casting non-string columns first.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    let strings = if series.dtype() == &DataType::String {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    Ok(strings
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// ```rust
/// use listing_features::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles currency symbols, percentages and thousands separators.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
        assert_eq!(clean_numeric_string("  42%  "), "42");
        assert_eq!(clean_numeric_string("€100"), "100");
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("85%"), Some(85.0));
        assert_eq!(parse_numeric_string("-100"), Some(-100.0));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("N/A"), None);
        assert_eq!(parse_numeric_string("NaN"), None);
    }

    #[test]
    fn test_require_columns() {
        let df = df!("a" => [1, 2], "b" => [3, 4]).unwrap();
        assert!(require_columns(&df, &["a", "b"]).is_ok());
        let err = require_columns(&df, &["a", "c"]).unwrap_err();
        assert!(matches!(err, FeatureError::ColumnNotFound(ref c) if c == "c"));
    }

    #[test]
    fn test_numeric_values_from_ints_and_strings() {
        let ints = Series::new("n".into(), &[Some(1i64), None, Some(3)]);
        assert_eq!(numeric_values(&ints).unwrap(), vec![Some(1.0), None, Some(3.0)]);

        let strings = Series::new("s".into(), &[Some("90%"), Some("n/a"), None]);
        assert_eq!(numeric_values(&strings).unwrap(), vec![Some(90.0), None, None]);

        let floats = Series::new("f".into(), &[f64::NAN, 4.5]);
        assert_eq!(numeric_values(&floats).unwrap(), vec![None, Some(4.5)]);
    }

    #[test]
    fn test_numeric_values_float32_keeps_decimal() {
        let floats = Series::new("f".into(), &[Some(4.6f32), Some(4.8f32), None, Some(f32::NAN)]);
        assert_eq!(
            numeric_values(&floats).unwrap(),
            vec![Some(4.6), Some(4.8), None, None]
        );
    }
}

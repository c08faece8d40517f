//! Per-category counts and percentages.

use crate::categories::OrderedCategory;
use crate::error::Result;
use crate::utils::{series_of, string_values};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Count of one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of all rows, 0-100.
    pub percentage: f64,
}

/// Distribution of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    pub column: String,
    pub counts: Vec<CategoryCount>,
    /// Rows whose value is not among `counts` (only for ordered summaries).
    pub unlisted: usize,
    pub total: usize,
}

impl CategoryDistribution {
    /// Count for `label`, zero when absent.
    pub fn count_of(&self, label: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.label == label)
            .map_or(0, |c| c.count)
    }

    fn from_counts(column: &str, ordered: Vec<(String, usize)>, unlisted: usize, total: usize) -> Self {
        let counts = ordered
            .into_iter()
            .map(|(label, count)| CategoryCount {
                percentage: percentage(count, total),
                label,
                count,
            })
            .collect();
        Self {
            column: column.to_string(),
            counts,
            unlisted,
            total,
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn tally(values: &[Option<String>], missing_label: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for value in values {
        let label = value.as_deref().unwrap_or(missing_label);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Counts for every label of `category`, in category order.
///
/// Nulls count toward the category's missing label. Labels with no rows are
/// listed with a zero count.
pub fn ordered_distribution(
    df: &DataFrame,
    column: &str,
    category: &OrderedCategory,
) -> Result<CategoryDistribution> {
    let values = string_values(series_of(df, column)?)?;
    let mut counts = tally(&values, category.missing_label());

    let ordered: Vec<(String, usize)> = category
        .labels()
        .iter()
        .map(|label| (label.clone(), counts.remove(label).unwrap_or(0)))
        .collect();

    let unlisted: usize = counts.values().sum();
    if unlisted > 0 {
        warn!(
            "{} values of '{}' are not '{}' labels",
            unlisted,
            column,
            category.name()
        );
    }

    Ok(CategoryDistribution::from_counts(column, ordered, unlisted, values.len()))
}

/// Counts of every distinct value, most frequent first (ties by label).
pub fn frequency_distribution(
    df: &DataFrame,
    column: &str,
    missing_label: &str,
) -> Result<CategoryDistribution> {
    let values = string_values(series_of(df, column)?)?;
    let mut ordered: Vec<(String, usize)> = tally(&values, missing_label).into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(CategoryDistribution::from_counts(column, ordered, 0, values.len()))
}

/// Fixed-width summary table.
impl fmt::Display for CategoryDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} distribution", self.column.replace('_', " ")).to_uppercase();
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(60))?;
        for count in &self.counts {
            writeln!(
                f,
                "{:<35} {:>8} {:>6.1}%",
                count.label, count.count, count.percentage
            )?;
        }
        if self.unlisted > 0 {
            writeln!(
                f,
                "{:<35} {:>8} {:>6.1}%",
                "(unlisted)",
                self.unlisted,
                percentage(self.unlisted, self.total)
            )?;
        }
        writeln!(f, "{}", "-".repeat(60))?;
        write!(f, "{:<35} {:>8} {:>7}", "Total", self.total, "100.0%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn scale() -> OrderedCategory {
        OrderedCategory::new("stars", ["none", "low", "high"], "none").unwrap()
    }

    #[test]
    fn test_ordered_distribution() {
        let df = df!("stars" => &[Some("high"), Some("low"), None, Some("high"), Some("weird")])
            .unwrap();

        let dist = ordered_distribution(&df, "stars", &scale()).unwrap();

        let labels: Vec<&str> = dist.counts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["none", "low", "high"]);
        assert_eq!(dist.count_of("none"), 1);
        assert_eq!(dist.count_of("low"), 1);
        assert_eq!(dist.count_of("high"), 2);
        assert_eq!(dist.unlisted, 1);
        assert_eq!(dist.total, 5);
        assert_eq!(dist.counts[2].percentage, 40.0);
    }

    #[test]
    fn test_zero_count_labels_are_listed() {
        let df = df!("stars" => &["low", "low"]).unwrap();
        let dist = ordered_distribution(&df, "stars", &scale()).unwrap();
        assert_eq!(dist.counts.len(), 3);
        assert_eq!(dist.count_of("high"), 0);
    }

    #[test]
    fn test_frequency_distribution_order() {
        let df = df!("room_type" => &[Some("b"), Some("a"), Some("b"), None]).unwrap();
        let dist = frequency_distribution(&df, "room_type", "Missing").unwrap();
        let labels: Vec<&str> = dist.counts.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "Missing", "a"]);
    }

    #[test]
    fn test_display_has_total() {
        let df = df!("stars" => &["low", "high"]).unwrap();
        let rendered = ordered_distribution(&df, "stars", &scale()).unwrap().to_string();
        assert!(rendered.contains("STARS DISTRIBUTION"));
        assert!(rendered.contains("Total"));
        assert!(rendered.contains("50.0%"));
    }

    #[test]
    fn test_missing_column() {
        let df = df!("stars" => &["low"]).unwrap();
        assert!(ordered_distribution(&df, "rating", &scale()).is_err());
    }
}

//! Ordered categories, interval rules and lookup tables.
//!
//! These are the building blocks every recoding step uses:
//! - [`OrderedCategory`]: a fixed, totally ordered label set with a
//!   designated "value absent" label
//! - [`IntervalRule`]: numeric value -> label via ascending bands
//! - [`LookupTable`]: raw text -> coarse label via exact match with a default
//!
//! The concrete scales and tables used for listings live in [`presets`] and
//! [`tables`].

mod intervals;
mod lookup;
pub mod presets;
pub mod tables;

pub use intervals::{Band, IntervalRule};
pub use lookup::LookupTable;

use crate::error::{FeatureError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

/// A finite, explicitly ordered set of labels.
///
/// Order is fixed at construction and is the ordinal order used for
/// comparisons and distribution summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedCategory {
    name: String,
    labels: Vec<String>,
    missing: usize,
}

impl OrderedCategory {
    /// Create a category, validating that labels are unique and that the
    /// missing label is one of them.
    pub fn new<I, S>(name: impl Into<String>, labels: I, missing_label: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();

        if labels.is_empty() {
            return Err(FeatureError::InvalidCategory(format!(
                "category '{}' has no labels",
                name
            )));
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(FeatureError::InvalidCategory(format!(
                    "category '{}' repeats label '{}'",
                    name, label
                )));
            }
        }

        let missing = labels
            .iter()
            .position(|l| l == missing_label)
            .ok_or_else(|| {
                FeatureError::InvalidCategory(format!(
                    "missing label '{}' is not a member of category '{}'",
                    missing_label, name
                ))
            })?;

        Ok(Self {
            name,
            labels,
            missing,
        })
    }

    /// Build one of the built-in categories. Validity of these is covered by
    /// the preset tests.
    pub(crate) fn from_static(name: &str, labels: &[&str], missing: usize) -> Self {
        Self {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            missing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The label standing for an absent value.
    pub fn missing_label(&self) -> &str {
        &self.labels[self.missing]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of `label` in the ordering.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index_of(label).is_some()
    }

    /// Compare two labels by their position. `None` if either is not a member.
    pub fn compare(&self, a: &str, b: &str) -> Option<Ordering> {
        Some(self.index_of(a)?.cmp(&self.index_of(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes() -> OrderedCategory {
        OrderedCategory::new("size", ["none", "small", "large"], "none").unwrap()
    }

    #[test]
    fn test_new_keeps_order() {
        let category = sizes();
        assert_eq!(category.labels(), &["none", "small", "large"]);
        assert_eq!(category.missing_label(), "none");
        assert_eq!(category.index_of("large"), Some(2));
        assert_eq!(category.len(), 3);
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = OrderedCategory::new("size", ["small", "small"], "small");
        assert!(matches!(result, Err(FeatureError::InvalidCategory(_))));
    }

    #[test]
    fn test_missing_label_must_be_member() {
        let result = OrderedCategory::new("size", ["small", "large"], "none");
        assert!(matches!(result, Err(FeatureError::InvalidCategory(_))));
    }

    #[test]
    fn test_empty_category_rejected() {
        let result = OrderedCategory::new("size", Vec::<String>::new(), "none");
        assert!(result.is_err());
    }

    #[test]
    fn test_compare() {
        let category = sizes();
        assert_eq!(category.compare("small", "large"), Some(Ordering::Less));
        assert_eq!(category.compare("large", "large"), Some(Ordering::Equal));
        assert_eq!(category.compare("small", "huge"), None);
    }
}

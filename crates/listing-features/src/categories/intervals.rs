//! Boundary classification of numeric values into ordered labels.

use super::OrderedCategory;
use crate::error::{FeatureError, Result};
use serde::Serialize;

const PERCENTAGE_MISSING: &str = "Missing";
const AUTO_PERCENTAGE_BINS: usize = 5;

/// Upper bound of one band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Band {
    /// Matches `value < bound`.
    Below(f64),
    /// Matches `value <= bound`.
    AtMost(f64),
}

impl Band {
    fn bound(&self) -> f64 {
        match *self {
            Band::Below(b) | Band::AtMost(b) => b,
        }
    }

    fn matches(&self, value: f64) -> bool {
        match *self {
            Band::Below(b) => value < b,
            Band::AtMost(b) => value <= b,
        }
    }
}

/// Ordered `(upper bound, label)` bands over a numeric domain.
///
/// Bands are tried in ascending order and the first match wins, so
/// cascading thresholds such as `<= 30 / <= 180 / <= 365` need no explicit
/// lower bounds. Absent and NaN values always take the category's missing
/// label, as do values below the floor. Values above the last band take the
/// overflow label, or the missing label when there is none.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalRule {
    category: OrderedCategory,
    floor: Option<f64>,
    bands: Vec<(Band, String)>,
    overflow: Option<String>,
}

impl IntervalRule {
    /// Create a rule, checking labels against the category and bound order.
    pub fn new(
        category: OrderedCategory,
        floor: Option<f64>,
        bands: Vec<(Band, String)>,
        overflow: Option<String>,
    ) -> Result<Self> {
        for label in bands.iter().map(|(_, l)| l).chain(overflow.iter()) {
            if !category.contains(label) {
                return Err(FeatureError::InvalidCategory(format!(
                    "label '{}' is not a member of category '{}'",
                    label,
                    category.name()
                )));
            }
        }

        for pair in bands.windows(2) {
            let (prev, next) = (pair[0].0, pair[1].0);
            let ascending = match (prev, next) {
                // `< b` followed by `<= b` is the one legal equal-bound pair.
                (Band::Below(a), Band::AtMost(b)) => a <= b,
                _ => prev.bound() < next.bound(),
            };
            if !ascending {
                return Err(FeatureError::InvalidCategory(format!(
                    "bands of '{}' are not in ascending order at {:?} -> {:?}",
                    category.name(),
                    prev,
                    next
                )));
            }
        }

        if let (Some(floor), Some((first, _))) = (floor, bands.first())
            && floor > first.bound()
        {
            return Err(FeatureError::InvalidCategory(format!(
                "floor {} of '{}' lies above its first band",
                floor,
                category.name()
            )));
        }

        Ok(Self {
            category,
            floor,
            bands,
            overflow,
        })
    }

    /// Percentage bands between consecutive `edges`, labelled `"{a}-{b}%"`.
    ///
    /// The first band includes its lower edge; every band includes its upper
    /// edge. Values outside `[edges[0], edges[last]]` and absent values take
    /// the `"Missing"` label.
    ///
    /// ```rust
    /// use listing_features::IntervalRule;
    ///
    /// let rule = IntervalRule::percentage_rule(&[0.0, 50.0, 100.0]).unwrap();
    /// assert_eq!(rule.classify(Some(0.0)), "0-50%");
    /// assert_eq!(rule.classify(Some(75.0)), "50-100%");
    /// assert_eq!(rule.classify(None), "Missing");
    /// ```
    pub fn percentage_rule(edges: &[f64]) -> Result<Self> {
        if edges.len() < 2 {
            return Err(FeatureError::InvalidCategory(format!(
                "percentage bins need at least two edges, got {}",
                edges.len()
            )));
        }
        if let Some(edge) = edges.iter().find(|e| !e.is_finite()) {
            return Err(FeatureError::InvalidCategory(format!(
                "percentage bin edge {} is not finite",
                edge
            )));
        }

        let bands: Vec<(Band, String)> = edges
            .windows(2)
            .map(|pair| (Band::AtMost(pair[1]), format!("{}-{}%", pair[0], pair[1])))
            .collect();
        let labels = bands
            .iter()
            .map(|(_, label)| label.clone())
            .chain(std::iter::once(PERCENTAGE_MISSING.to_string()));
        let category = OrderedCategory::new("percentage", labels, PERCENTAGE_MISSING)?;

        Self::new(category, Some(edges[0]), bands, None)
    }

    /// Five equal-width percentage bands spanning `[min, max]`.
    pub fn auto_percentage_rule(min: f64, max: f64) -> Result<Self> {
        if !(min < max) {
            return Err(FeatureError::InvalidCategory(format!(
                "automatic percentage bins need min < max, got {} and {}",
                min, max
            )));
        }
        let width = (max - min) / AUTO_PERCENTAGE_BINS as f64;
        let edges: Vec<f64> = (0..=AUTO_PERCENTAGE_BINS)
            .map(|i| if i == AUTO_PERCENTAGE_BINS { max } else { min + width * i as f64 })
            .collect();
        Self::percentage_rule(&edges)
    }

    pub(crate) fn from_static(
        category: OrderedCategory,
        floor: Option<f64>,
        bands: &[(Band, &str)],
        overflow: Option<&str>,
    ) -> Self {
        Self {
            category,
            floor,
            bands: bands.iter().map(|(b, l)| (*b, l.to_string())).collect(),
            overflow: overflow.map(str::to_string),
        }
    }

    /// The ordered label set this rule produces.
    pub fn category(&self) -> &OrderedCategory {
        &self.category
    }

    /// Classify a value. Always returns a member of [`Self::category`].
    pub fn classify(&self, value: Option<f64>) -> &str {
        let value = match value {
            Some(v) if !v.is_nan() => v,
            _ => return self.category.missing_label(),
        };

        if self.floor.is_some_and(|floor| value < floor) {
            return self.category.missing_label();
        }

        self.bands
            .iter()
            .find(|(band, _)| band.matches(value))
            .map(|(_, label)| label.as_str())
            .or(self.overflow.as_deref())
            .unwrap_or_else(|| self.category.missing_label())
    }
}

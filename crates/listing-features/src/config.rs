//! Configuration for the listings feature pipeline.
//!
//! Every field names the columns a step works on. The defaults match the
//! columns of an Inside Airbnb `listings.csv` export, so
//! `FeatureConfig::default()` is usually all that is needed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Columns and settings for [`FeaturePipeline`](crate::pipeline::FeaturePipeline).
///
/// # Example
///
/// ```rust,ignore
/// use listing_features::config::FeatureConfig;
///
/// let config = FeatureConfig::builder()
///     .date_columns(["first_review", "last_review"])
///     .location_column(None::<String>)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Flag columns coerced to Boolean.
    pub boolean_columns: Vec<String>,

    /// Column every date is measured against.
    /// Default: "last_scraped"
    pub reference_date_column: String,

    /// Date columns replaced by `days_since_{column}`.
    pub date_columns: Vec<String>,

    /// Review score columns recoded with the review scale.
    pub review_score_columns: Vec<String>,

    /// Day count binned into first-review age categories.
    /// Default: Some("days_since_first_review")
    pub first_review_age_column: Option<String>,

    /// Day count binned into last-review recency categories.
    /// Default: Some("days_since_last_review")
    pub last_review_recency_column: Option<String>,

    /// Percentage columns binned into host rate bands.
    pub rate_columns: Vec<String>,

    /// Raw location column mapped to the location hierarchy.
    pub location_column: Option<String>,
    pub location_output_column: String,

    /// Raw property type column mapped to property classes.
    pub property_type_column: Option<String>,
    pub property_output_column: String,

    /// Free-text columns replaced by `{column}_present`.
    pub presence_columns: Vec<String>,

    /// Placeholder that counts as "not provided".
    /// Default: "No description provided"
    pub presence_default: String,

    /// Count columns that get a `{column}_0_vs_other` flag.
    pub zero_flag_columns: Vec<String>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            boolean_columns: strings(&[
                "host_is_superhost",
                "host_has_profile_pic",
                "host_identity_verified",
                "has_availability",
                "instant_bookable",
            ]),
            reference_date_column: "last_scraped".to_string(),
            date_columns: strings(&["first_review", "last_review", "host_since"]),
            review_score_columns: strings(&[
                "review_scores_rating",
                "review_scores_accuracy",
                "review_scores_cleanliness",
                "review_scores_checkin",
                "review_scores_communication",
                "review_scores_location",
                "review_scores_value",
            ]),
            first_review_age_column: Some("days_since_first_review".to_string()),
            last_review_recency_column: Some("days_since_last_review".to_string()),
            rate_columns: strings(&["host_response_rate", "host_acceptance_rate"]),
            location_column: Some("location_category".to_string()),
            location_output_column: "location_hierarchy".to_string(),
            property_type_column: Some("property_type".to_string()),
            property_output_column: "property_category".to_string(),
            presence_columns: strings(&["description", "neighborhood_overview", "host_about"]),
            presence_default: "No description provided".to_string(),
            zero_flag_columns: strings(&["number_of_reviews"]),
        }
    }
}

impl FeatureConfig {
    /// Create a new configuration builder.
    pub fn builder() -> FeatureConfigBuilder {
        FeatureConfigBuilder::default()
    }

    /// A configuration that runs no step at all.
    pub fn empty() -> Self {
        Self {
            boolean_columns: Vec::new(),
            date_columns: Vec::new(),
            review_score_columns: Vec::new(),
            first_review_age_column: None,
            last_review_recency_column: None,
            rate_columns: Vec::new(),
            location_column: None,
            property_type_column: None,
            presence_columns: Vec::new(),
            zero_flag_columns: Vec::new(),
            ..Self::default()
        }
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.date_columns.is_empty() && self.reference_date_column.trim().is_empty() {
            return Err(ConfigValidationError::MissingReferenceColumn);
        }

        let named = [
            ("boolean_columns", &self.boolean_columns),
            ("date_columns", &self.date_columns),
            ("review_score_columns", &self.review_score_columns),
            ("rate_columns", &self.rate_columns),
            ("presence_columns", &self.presence_columns),
            ("zero_flag_columns", &self.zero_flag_columns),
        ];
        for (field, columns) in named {
            if columns.iter().any(|c| c.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
            let mut seen = HashSet::new();
            if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
                return Err(ConfigValidationError::DuplicateColumn {
                    field: field.to_string(),
                    column: dup.clone(),
                });
            }
        }

        let optional = [
            ("first_review_age_column", &self.first_review_age_column),
            ("last_review_recency_column", &self.last_review_recency_column),
            ("location_column", &self.location_column),
            ("property_type_column", &self.property_type_column),
        ];
        for (field, column) in optional {
            if column.as_deref().is_some_and(|c| c.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        if self.location_column.is_some() && self.location_output_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName(
                "location_output_column".to_string(),
            ));
        }
        if self.property_type_column.is_some() && self.property_output_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName(
                "property_output_column".to_string(),
            ));
        }

        if !self.presence_columns.is_empty() && self.presence_default.trim().is_empty() {
            return Err(ConfigValidationError::BlankPresenceDefault);
        }

        // Each days-since step drops its date column before the next one reads
        // the reference.
        if self.date_columns.contains(&self.reference_date_column) {
            return Err(ConfigValidationError::DroppedColumnReused {
                column: self.reference_date_column.clone(),
                dropped_by: "date_columns".to_string(),
            });
        }
        for column in &self.presence_columns {
            let reused = self.zero_flag_columns.contains(column)
                || self.location_column.as_ref() == Some(column)
                || self.property_type_column.as_ref() == Some(column);
            if reused {
                return Err(ConfigValidationError::DroppedColumnReused {
                    column: column.clone(),
                    dropped_by: "presence_columns".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("date_columns are set but reference_date_column is empty")]
    MissingReferenceColumn,

    #[error("Empty column name in '{0}'")]
    EmptyColumnName(String),

    #[error("Column '{column}' listed twice in '{field}'")]
    DuplicateColumn { field: String, column: String },

    #[error("presence_default must not be blank")]
    BlankPresenceDefault,

    #[error("Column '{column}' is dropped by {dropped_by} but used by another step")]
    DroppedColumnReused { column: String, dropped_by: String },
}

/// Builder for [`FeatureConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct FeatureConfigBuilder {
    boolean_columns: Option<Vec<String>>,
    reference_date_column: Option<String>,
    date_columns: Option<Vec<String>>,
    review_score_columns: Option<Vec<String>>,
    first_review_age_column: Option<Option<String>>,
    last_review_recency_column: Option<Option<String>>,
    rate_columns: Option<Vec<String>>,
    location_column: Option<Option<String>>,
    location_output_column: Option<String>,
    property_type_column: Option<Option<String>>,
    property_output_column: Option<String>,
    presence_columns: Option<Vec<String>>,
    presence_default: Option<String>,
    zero_flag_columns: Option<Vec<String>>,
}

fn collect<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

impl FeatureConfigBuilder {
    pub fn boolean_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_columns = Some(collect(columns));
        self
    }

    pub fn reference_date_column(mut self, column: impl Into<String>) -> Self {
        self.reference_date_column = Some(column.into());
        self
    }

    pub fn date_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_columns = Some(collect(columns));
        self
    }

    pub fn review_score_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.review_score_columns = Some(collect(columns));
        self
    }

    /// Set the day-count column for first-review age, or `None` to skip.
    pub fn first_review_age_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.first_review_age_column = Some(column.map(Into::into));
        self
    }

    /// Set the day-count column for last-review recency, or `None` to skip.
    pub fn last_review_recency_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.last_review_recency_column = Some(column.map(Into::into));
        self
    }

    pub fn rate_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rate_columns = Some(collect(columns));
        self
    }

    /// Set the raw location column, or `None` to skip the location step.
    pub fn location_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.location_column = Some(column.map(Into::into));
        self
    }

    pub fn location_output_column(mut self, column: impl Into<String>) -> Self {
        self.location_output_column = Some(column.into());
        self
    }

    /// Set the raw property type column, or `None` to skip the property step.
    pub fn property_type_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.property_type_column = Some(column.map(Into::into));
        self
    }

    pub fn property_output_column(mut self, column: impl Into<String>) -> Self {
        self.property_output_column = Some(column.into());
        self
    }

    pub fn presence_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.presence_columns = Some(collect(columns));
        self
    }

    pub fn presence_default(mut self, value: impl Into<String>) -> Self {
        self.presence_default = Some(value.into());
        self
    }

    pub fn zero_flag_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zero_flag_columns = Some(collect(columns));
        self
    }

    /// Build the configuration.
    ///
    /// Unset fields take their [`Default`] values. Returns an error if the
    /// result does not validate.
    pub fn build(self) -> Result<FeatureConfig, ConfigValidationError> {
        let defaults = FeatureConfig::default();
        let config = FeatureConfig {
            boolean_columns: self.boolean_columns.unwrap_or(defaults.boolean_columns),
            reference_date_column: self
                .reference_date_column
                .unwrap_or(defaults.reference_date_column),
            date_columns: self.date_columns.unwrap_or(defaults.date_columns),
            review_score_columns: self
                .review_score_columns
                .unwrap_or(defaults.review_score_columns),
            first_review_age_column: self
                .first_review_age_column
                .unwrap_or(defaults.first_review_age_column),
            last_review_recency_column: self
                .last_review_recency_column
                .unwrap_or(defaults.last_review_recency_column),
            rate_columns: self.rate_columns.unwrap_or(defaults.rate_columns),
            location_column: self.location_column.unwrap_or(defaults.location_column),
            location_output_column: self
                .location_output_column
                .unwrap_or(defaults.location_output_column),
            property_type_column: self
                .property_type_column
                .unwrap_or(defaults.property_type_column),
            property_output_column: self
                .property_output_column
                .unwrap_or(defaults.property_output_column),
            presence_columns: self.presence_columns.unwrap_or(defaults.presence_columns),
            presence_default: self.presence_default.unwrap_or(defaults.presence_default),
            zero_flag_columns: self.zero_flag_columns.unwrap_or(defaults.zero_flag_columns),
        };

        config.validate()?;
        Ok(config)
    }
}

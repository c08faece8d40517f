//! Categorical feature engineering for short-term rental listings.
//!
//! Turns the raw columns of an Inside Airbnb `listings.csv` into ordered
//! categories and indicator flags ready for exploratory analysis, built on
//! Polars.
//!
//! # Overview
//!
//! - **Boundary classification**: review scores, review age and recency, host
//!   response/acceptance rates binned into ordered labels ([`IntervalRule`])
//! - **Lookup recategorization**: free-text locations and property types
//!   mapped to coarse hierarchies ([`LookupTable`])
//! - **Indicators**: presence of free-text fields, zero review counts
//! - **Derivations**: boolean coercion of `t`/`f` flags, days since a date
//! - **Analysis**: category distributions, missing-value correlation, rows
//!   with partially missing review scores
//!
//! Every operation borrows a [`DataFrame`](polars::prelude::DataFrame) and
//! returns a new one.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use listing_features::{FeatureConfig, FeaturePipeline};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("listings.csv".into()))?
//!     .finish()?;
//!
//! let result = FeaturePipeline::new(FeatureConfig::default()).run(&df)?;
//! println!("{}", result.frame.head(Some(5)));
//! ```
//!
//! Single operations can be used on their own:
//!
//! ```rust,ignore
//! use listing_features::categories::tables::property_type_table;
//! use listing_features::transform::{categorize_reviews, recategorize_column};
//!
//! let df = categorize_reviews(&df, &["review_scores_rating"])?;
//! let df = recategorize_column(&df, "property_type", "property_category", property_type_table())?;
//! ```

pub mod analysis;
pub mod categories;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reporting;
pub mod transform;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{
    CategoryCount, CategoryDistribution, CorrelationMatrix, PartialMissing, frequency_distribution,
    missing_correlation, ordered_distribution, partial_missing,
};
pub use categories::presets::{
    first_review_age_rule, host_rate_rule, last_review_recency_rule, review_rule,
};
pub use categories::tables::{
    location_table, location_tiers, property_classes, property_type_table,
};
pub use categories::{Band, IntervalRule, LookupTable, OrderedCategory};
pub use config::{ConfigValidationError, FeatureConfig, FeatureConfigBuilder};
pub use error::{FeatureError, ResultExt};
pub use pipeline::{FeaturePipeline, FeatureResult};
pub use reporting::FeatureReport;
pub use transform::{
    Sentinel, categorize_reviews, classify_column, classify_series, convert_columns_to_boolean,
    convert_to_ordered_category, days_since, presence_indicator, recategorize_column,
    sentinel_indicator, zero_count_flag,
};
pub use utils::{clean_numeric_string, parse_numeric_string};

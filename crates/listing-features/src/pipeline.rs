//! The feature pipeline: every configured recoding, in a fixed order.
//!
//! ```rust,ignore
//! use listing_features::{FeatureConfig, FeaturePipeline};
//!
//! let result = FeaturePipeline::new(FeatureConfig::default()).run(&df)?;
//! for dist in &result.distributions {
//!     println!("{dist}");
//! }
//! ```

use crate::analysis::{CategoryDistribution, ordered_distribution};
use crate::categories::presets::{
    first_review_age_rule, host_rate_rule, last_review_recency_rule, review_rule,
};
use crate::categories::tables::{
    location_table, location_tiers, property_classes, property_type_table,
};
use crate::categories::{IntervalRule, LookupTable, OrderedCategory};
use crate::config::FeatureConfig;
use crate::error::{Result, ResultExt};
use crate::transform::{
    categorize_reviews, classify_column, convert_columns_to_boolean, days_since,
    presence_indicator, recategorize_column, zero_count_flag,
};
use polars::prelude::DataFrame;
use tracing::{debug, info};

/// Output of [`FeaturePipeline::run`].
#[derive(Debug, Clone)]
pub struct FeatureResult {
    /// The transformed frame.
    pub frame: DataFrame,
    /// Human-readable description of each step that ran.
    pub steps: Vec<String>,
    /// Distribution of every categorical column produced.
    pub distributions: Vec<CategoryDistribution>,
}

/// One unit of work derived from the configuration.
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Booleans(Vec<String>),
    DaysSince { column: String, reference: String },
    Reviews(Vec<String>),
    Bin { column: String, rule: BinRule },
    Lookup { source: String, target: String, table: TableKind },
    Presence { column: String, default: String },
    ZeroFlag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinRule {
    FirstReviewAge,
    LastReviewRecency,
    HostRate,
}

impl BinRule {
    fn rule(self) -> &'static IntervalRule {
        match self {
            BinRule::FirstReviewAge => first_review_age_rule(),
            BinRule::LastReviewRecency => last_review_recency_rule(),
            BinRule::HostRate => host_rate_rule(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Location,
    PropertyType,
}

impl TableKind {
    fn table(self) -> &'static LookupTable {
        match self {
            TableKind::Location => location_table(),
            TableKind::PropertyType => property_type_table(),
        }
    }

    fn category(self) -> &'static OrderedCategory {
        match self {
            TableKind::Location => location_tiers(),
            TableKind::PropertyType => property_classes(),
        }
    }
}

impl Step {
    fn describe(&self) -> String {
        match self {
            Step::Booleans(columns) => {
                format!("Converted {} columns to boolean: {}", columns.len(), columns.join(", "))
            }
            Step::DaysSince { column, reference } => {
                format!("Derived days_since_{} from '{}' and '{}'", column, column, reference)
            }
            Step::Reviews(columns) => {
                format!("Categorized {} review score columns", columns.len())
            }
            Step::Bin { column, rule } => format!(
                "Binned '{}' into '{}' categories",
                column,
                rule.rule().category().name()
            ),
            Step::Lookup { source, target, table } => format!(
                "Mapped '{}' to '{}' via '{}'",
                source,
                target,
                table.table().name()
            ),
            Step::Presence { column, .. } => {
                format!("Replaced '{}' with '{}_present'", column, column)
            }
            Step::ZeroFlag(column) => format!("Flagged zero '{}' as '{}_0_vs_other'", column, column),
        }
    }
}

/// Applies a [`FeatureConfig`] to listings frames.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    config: FeatureConfig,
}

impl FeaturePipeline {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    fn plan(&self) -> Vec<Step> {
        let config = &self.config;
        let mut steps = Vec::new();

        if !config.boolean_columns.is_empty() {
            steps.push(Step::Booleans(config.boolean_columns.clone()));
        }
        for column in &config.date_columns {
            steps.push(Step::DaysSince {
                column: column.clone(),
                reference: config.reference_date_column.clone(),
            });
        }
        if !config.review_score_columns.is_empty() {
            steps.push(Step::Reviews(config.review_score_columns.clone()));
        }
        if let Some(column) = &config.first_review_age_column {
            steps.push(Step::Bin {
                column: column.clone(),
                rule: BinRule::FirstReviewAge,
            });
        }
        if let Some(column) = &config.last_review_recency_column {
            steps.push(Step::Bin {
                column: column.clone(),
                rule: BinRule::LastReviewRecency,
            });
        }
        for column in &config.rate_columns {
            steps.push(Step::Bin {
                column: column.clone(),
                rule: BinRule::HostRate,
            });
        }
        if let Some(source) = &config.location_column {
            steps.push(Step::Lookup {
                source: source.clone(),
                target: config.location_output_column.clone(),
                table: TableKind::Location,
            });
        }
        if let Some(source) = &config.property_type_column {
            steps.push(Step::Lookup {
                source: source.clone(),
                target: config.property_output_column.clone(),
                table: TableKind::PropertyType,
            });
        }
        for column in &config.presence_columns {
            steps.push(Step::Presence {
                column: column.clone(),
                default: config.presence_default.clone(),
            });
        }
        for column in &config.zero_flag_columns {
            steps.push(Step::ZeroFlag(column.clone()));
        }

        steps
    }

    /// Descriptions of the steps [`run`](Self::run) would perform.
    pub fn dry_run_plan(&self) -> Vec<String> {
        self.plan().iter().map(Step::describe).collect()
    }

    /// Run every configured step on a copy of `df`.
    ///
    /// The first failing step aborts the run; `df` is never modified.
    pub fn run(&self, df: &DataFrame) -> Result<FeatureResult> {
        self.config.validate()?;

        let plan = self.plan();
        info!(
            "Starting feature pipeline: {} steps on {} rows x {} columns",
            plan.len(),
            df.height(),
            df.width()
        );

        let mut frame = df.clone();
        let mut steps = Vec::with_capacity(plan.len());
        let mut distributions = Vec::new();

        for (i, step) in plan.iter().enumerate() {
            let description = step.describe();
            info!("Step {}: {}", i + 1, description);
            frame = self
                .apply(&frame, step, &mut distributions)
                .context(format!("Step {} failed", i + 1))?;
            steps.push(description);
        }

        info!(
            "Feature pipeline completed: {} rows x {} columns",
            frame.height(),
            frame.width()
        );
        debug!("Recorded {} distributions", distributions.len());

        Ok(FeatureResult {
            frame,
            steps,
            distributions,
        })
    }

    fn apply(
        &self,
        frame: &DataFrame,
        step: &Step,
        distributions: &mut Vec<CategoryDistribution>,
    ) -> Result<DataFrame> {
        let out = match step {
            Step::Booleans(columns) => convert_columns_to_boolean(frame, columns)?,
            Step::DaysSince { column, reference } => days_since(frame, column, reference)?,
            Step::Reviews(columns) => {
                let out = categorize_reviews(frame, columns)?;
                for column in columns {
                    distributions.push(ordered_distribution(&out, column, review_rule().category())?);
                }
                out
            }
            Step::Bin { column, rule } => {
                let rule = rule.rule();
                let out = classify_column(frame, column, rule)?;
                distributions.push(ordered_distribution(&out, column, rule.category())?);
                out
            }
            Step::Lookup { source, target, table } => {
                let out = recategorize_column(frame, source, target, table.table())?;
                distributions.push(ordered_distribution(&out, target, table.category())?);
                out
            }
            Step::Presence { column, default } => presence_indicator(frame, column, default)?,
            Step::ZeroFlag(column) => zero_count_flag(frame, column)?,
        };
        Ok(out)
    }
}

//! Integration tests for the listings feature pipeline.
//!
//! These tests run the public API end to end over a small listings export.

use listing_features::categories::presets::REVIEW_LABELS;
use listing_features::{
    FeatureConfig, FeatureError, FeaturePipeline, FeatureReport, categorize_reviews,
    convert_columns_to_boolean, days_since, host_rate_rule, location_table, missing_correlation,
    partial_missing, property_type_table, recategorize_column, review_rule,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

// ============================================================================
// Helper Functions
// ============================================================================

const REVIEW_COLUMNS: [&str; 7] = [
    "review_scores_rating",
    "review_scores_accuracy",
    "review_scores_cleanliness",
    "review_scores_checkin",
    "review_scores_communication",
    "review_scores_location",
    "review_scores_value",
];

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn listings() -> DataFrame {
    load_csv("listings_sample.csv")
}

fn strings(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or("<null>").to_string())
        .collect()
}

fn ints(df: &DataFrame, column: &str) -> Vec<i32> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .i32()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or(-1))
        .collect()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_full_pipeline_default_config() {
    let df = listings();
    let result = FeaturePipeline::new(FeatureConfig::default())
        .run(&df)
        .expect("Pipeline should complete successfully");
    let out = &result.frame;

    assert_eq!(out.height(), 5);

    // dates replaced by day counts, free text replaced by indicators
    for dropped in ["first_review", "last_review", "host_since", "description", "host_about"] {
        assert!(out.column(dropped).is_err(), "{dropped} should be dropped");
    }
    assert!(out.column("last_scraped").is_ok());
    assert!(out.column("days_since_host_since").is_ok());

    assert_eq!(
        strings(out, "review_scores_rating"),
        owned(&["top_reviews", "no_reviews", "high_reviews", "medium_reviews", "low_reviews"])
    );
    assert_eq!(
        strings(out, "review_scores_checkin"),
        owned(&["top_reviews", "no_reviews", "top_reviews", "high_reviews", "medium_reviews"])
    );
    assert_eq!(
        strings(out, "days_since_first_review"),
        owned(&[
            "legacy (over 5 years)",
            "no_review_yet",
            "new (<= 6 months)",
            "legacy (over 5 years)",
            "very_new (<= 1 month)",
        ])
    );
    assert_eq!(
        strings(out, "days_since_last_review"),
        owned(&[
            "very_recent (<= 1 week)",
            "no_review",
            "somewhat_recent (<= 3 months)",
            "dormant (over a year)",
            "very_recent (<= 1 week)",
        ])
    );
    assert_eq!(
        strings(out, "host_response_rate"),
        owned(&["98%+", "Missing", "20-60%", "90-98%", "0-20%"])
    );
    assert_eq!(
        strings(out, "host_acceptance_rate"),
        owned(&["90-98%", "Missing", "98%+", "0-20%", "20-60%"])
    );
    assert_eq!(
        strings(out, "location_hierarchy"),
        owned(&["Milan", "Unknown", "Northern Italy", "Europe", "Lombardy"])
    );
    assert_eq!(
        strings(out, "property_category"),
        owned(&["Apartment/Condo", "Other", "Apartment/Condo", "House", "Unique"])
    );
    assert_eq!(ints(out, "description_present"), vec![1, 0, 1, 1, 1]);
    assert_eq!(ints(out, "neighborhood_overview_present"), vec![1, 0, 1, 0, 1]);
    assert_eq!(ints(out, "number_of_reviews_0_vs_other"), vec![0, 1, 0, 0, 0]);

    let superhost: Vec<Option<bool>> = out
        .column("host_is_superhost")
        .unwrap()
        .as_materialized_series()
        .bool()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(superhost, vec![Some(true), Some(false), Some(false), Some(true), None]);

    // 7 review columns, age, recency, 2 rates, location, property
    assert_eq!(result.distributions.len(), 13);
    for dist in &result.distributions {
        let listed: usize = dist.counts.iter().map(|c| c.count).sum();
        assert_eq!(listed + dist.unlisted, dist.total, "{}", dist.column);
        assert_eq!(dist.unlisted, 0, "{}", dist.column);
    }
}

#[test]
fn test_pipeline_report() {
    let df = listings();
    let result = FeaturePipeline::new(FeatureConfig::default()).run(&df).unwrap();

    let report = FeatureReport::from_result(
        &result,
        Path::new("listings_sample.csv"),
        None,
        df.width(),
    );

    assert_eq!(report.rows, 5);
    assert_eq!(report.columns_before, df.width());
    assert_eq!(report.columns_after, result.frame.width());
    assert_eq!(report.steps, result.steps);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["distributions"][0]["column"], "review_scores_rating");
    assert_eq!(json["distributions"][0]["counts"][0]["label"], "no_reviews");
}

#[test]
fn test_pipeline_missing_column_leaves_input_untouched() {
    let df = listings().drop("property_type").unwrap();
    let before = df.clone();

    let err = FeaturePipeline::new(FeatureConfig::default()).run(&df).unwrap_err();

    assert!(err.is_column_not_found());
    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(df.equals_missing(&before));
}

#[test]
fn test_pipeline_custom_config_from_json() {
    let config = FeatureConfig::from_json(
        r#"{
            "boolean_columns": ["instant_bookable"],
            "date_columns": ["last_review"],
            "review_score_columns": ["review_scores_rating"],
            "first_review_age_column": null,
            "rate_columns": [],
            "location_column": null,
            "property_type_column": "property_type",
            "property_output_column": "property_type",
            "presence_columns": [],
            "zero_flag_columns": []
        }"#,
    )
    .unwrap();

    let result = FeaturePipeline::new(config).run(&listings()).unwrap();
    let out = &result.frame;

    assert_eq!(result.steps.len(), 5);
    assert!(out.column("first_review").is_ok());
    assert!(out.column("description").is_ok());
    assert_eq!(
        strings(out, "property_type"),
        owned(&["Apartment/Condo", "Other", "Apartment/Condo", "House", "Unique"])
    );
}

// ============================================================================
// Individual Operations
// ============================================================================

#[test]
fn test_review_categories_are_total_and_idempotent() {
    let df = listings();
    let once = categorize_reviews(&df, &REVIEW_COLUMNS).unwrap();
    let twice = categorize_reviews(&once, &REVIEW_COLUMNS).unwrap();

    assert!(once.equals_missing(&twice));
    for column in REVIEW_COLUMNS {
        let labels = strings(&once, column);
        assert!(labels.iter().all(|l| REVIEW_LABELS.contains(&l.as_str())));
    }
}

#[test]
fn test_review_categories_missing_column() {
    let df = listings();
    let err = categorize_reviews(&df, &["review_scores_rating", "review_scores_vibes"]).unwrap_err();

    assert!(matches!(err, FeatureError::ColumnNotFound(ref c) if c == "review_scores_vibes"));
    // rating was not recoded in the caller's frame
    assert!(df.column("review_scores_rating").unwrap().dtype().is_float());
}

#[test]
fn test_review_scale_is_monotonic() {
    let rule = review_rule();
    let scale = rule.category();
    let mut previous = 0;
    for step in 0..=500 {
        let value = step as f64 / 100.0;
        let index = scale.index_of(rule.classify(Some(value))).unwrap();
        assert!(index >= previous, "{value} went down the scale");
        previous = index;
    }
}

#[test]
fn test_host_rate_out_of_range_is_missing() {
    let rule = host_rate_rule();
    assert_eq!(rule.classify(Some(-1.0)), "Missing");
    assert_eq!(rule.classify(Some(0.0)), "0-20%");
    assert_eq!(rule.classify(Some(100.0)), "98%+");
    assert_eq!(rule.classify(Some(100.5)), "Missing");
}

#[test]
fn test_lookup_recategorization_is_exact_and_row_local() {
    let df = listings();
    let mapped = recategorize_column(&df, "property_type", "property_type", property_type_table()).unwrap();

    assert_eq!(
        strings(&mapped, "property_type"),
        ["Apartment/Condo", "Other", "Apartment/Condo", "House", "Unique"]
    );
    let outputs = property_type_table().outputs();
    assert!(strings(&mapped, "property_type").iter().all(|l| outputs.contains(l.as_str())));

    let located = recategorize_column(&df, "location_category", "tier", location_table()).unwrap();
    assert_eq!(
        strings(&located, "tier"),
        ["Milan", "Unknown", "Northern Italy", "Europe", "Lombardy"]
    );
    assert_eq!(strings(&located, "location_category")[1], "Atlantis");

    // Tier names are not table keys, so looking them up again only keeps
    // the labels that map to themselves.
    let again = recategorize_column(&located, "tier", "tier", location_table()).unwrap();
    assert_eq!(
        strings(&again, "tier"),
        ["Milan", "Unknown", "Unknown", "Unknown", "Lombardy"]
    );
}

#[test]
fn test_boolean_round_trip() {
    let df = listings();
    let columns = ["host_is_superhost", "host_identity_verified", "instant_bookable"];
    let converted = convert_columns_to_boolean(&df, &columns).unwrap();

    for column in columns {
        let original = strings(&df, column);
        let flags: Vec<String> = converted
            .column(column)
            .unwrap()
            .as_materialized_series()
            .bool()
            .unwrap()
            .into_iter()
            .map(|v| match v {
                Some(true) => "t".to_string(),
                Some(false) => "f".to_string(),
                None => "<null>".to_string(),
            })
            .collect();
        assert_eq!(flags, original, "{column}");
    }

    // running again on Boolean columns changes nothing
    let again = convert_columns_to_boolean(&converted, &columns).unwrap();
    assert!(again.equals_missing(&converted));
}

#[test]
fn test_boolean_rejects_free_text() {
    let df = listings();
    let err = convert_columns_to_boolean(&df, &["property_type"]).unwrap_err();
    assert_eq!(err.error_code(), "UNSUPPORTED_VALUES");
}

#[test]
fn test_days_since_derivation() {
    let df = listings();
    let out = days_since(&df, "first_review", "last_scraped").unwrap();

    let days: Vec<Option<i64>> = out
        .column("days_since_first_review")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    // 2025-03-20 minus each first_review
    assert_eq!(days, vec![Some(3357), None, Some(139), Some(2454), Some(28)]);
    assert!(out.column("first_review").is_err());
}

// ============================================================================
// Missing-value Analysis
// ============================================================================

#[test]
fn test_partial_missing_reviews() {
    let df = listings();
    let report = partial_missing(&df, &REVIEW_COLUMNS, "id", &["listing_url"]).unwrap();

    assert_eq!(report.any_missing, 2);
    assert_eq!(report.all_missing, 1);
    assert_eq!(report.partial(), 1);
    assert_eq!(report.ids, vec!["1003".to_string()]);
    assert_eq!(report.frame.width(), 9);
}

#[test]
fn test_missing_correlation_with_zero_reviews() {
    let df = listings();
    let matrix = missing_correlation(
        &df,
        &["review_scores_rating", "first_review", "not_a_column"],
        "number_of_reviews",
    )
    .unwrap();

    assert_eq!(matrix.labels.len(), 3);
    let r = matrix
        .get("review_scores_rating", "number_of_reviews_0_vs_other")
        .unwrap();
    assert!((r - 1.0).abs() < 1e-9);
}

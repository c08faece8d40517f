//! CLI entry point for the listings feature pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use listing_features::analysis::{CorrelationMatrix, missing_correlation, partial_missing};
use listing_features::{FeatureConfig, FeaturePipeline, FeatureReport};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Categorical feature engineering for Airbnb listings",
    long_about = "Recodes an Inside Airbnb listings.csv into analysis-ready categorical features:\n\
                  review score bands, review age and recency bins, host rate bands, location\n\
                  and property type hierarchies, presence indicators and zero-count flags.\n\n\
                  EXAMPLES:\n  \
                  # Default columns\n  \
                  listing-features -i listings.csv\n\n  \
                  # Custom column configuration and a JSON report\n  \
                  listing-features -i listings.csv -c features.json --emit-report\n\n  \
                  # Show the planned steps only\n  \
                  listing-features -i listings.csv --dry-run"
)]
struct Args {
    /// Path to the listings CSV file
    #[arg(short, long)]
    input: String,

    /// Path of the transformed CSV
    #[arg(short, long, default_value = "./outputs/listings_features.csv")]
    output: String,

    /// JSON file with a feature configuration
    ///
    /// Fields left out take their defaults.
    #[arg(short, long)]
    config: Option<String>,

    /// Preview the steps without processing
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report next to the output file
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = load_config(args.config.as_deref())?;
    let pipeline = FeaturePipeline::new(config);

    if args.dry_run {
        run_dry_run(&args, &pipeline);
        return Ok(());
    }

    info!("Loading dataset from: {}", args.input);
    let data = load_csv_with_fallbacks(&args.input)?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    // The overview is only printed in the human-readable summary.
    let overview = if args.json {
        None
    } else {
        missing_overview(&data, pipeline.config())
    };

    let result = match pipeline.run(&data) {
        Ok(result) => result,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&e)?);
            }
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let output_path = PathBuf::from(&args.output);
    write_csv(&result.frame, &output_path)?;

    let report = FeatureReport::from_result(&result, Path::new(&args.input), Some(&output_path), data.width());

    if args.json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    if args.emit_report {
        let output_dir = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let report_path = report.write_report_to_file(output_dir, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(&report, overview.as_ref());

    Ok(())
}

fn load_config(path: Option<&str>) -> Result<FeatureConfig> {
    let Some(path) = path else {
        return Ok(FeatureConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("Could not read config file {}", path))?;
    let config = FeatureConfig::from_json(&json).map_err(|e| anyhow!("Invalid config {}: {}", path, e))?;
    debug!("Loaded configuration from {}", path);
    Ok(config)
}

/// Print the planned steps.
///
/// Uses `println!` since this listing is the whole point of `--dry-run`.
fn run_dry_run(args: &Args, pipeline: &FeaturePipeline) {
    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of feature steps");
    println!("{}\n", "=".repeat(80));

    println!("  File: {}", args.input);
    println!();

    println!("PLANNED STEPS");
    println!("{}", "-".repeat(40));
    let plan = pipeline.dry_run_plan();
    if plan.is_empty() {
        println!("  No steps configured");
    }
    for (i, step) in plan.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();

    println!("OUTPUT FILES (will be created)");
    println!("{}", "-".repeat(40));
    println!("  - {}", args.output);
    if args.emit_report {
        let dir = Path::new(&args.output)
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        println!("  - {}/{}_report.json", dir, extract_file_stem(&args.input));
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("To execute these steps, run without --dry-run");
    println!("{}", "=".repeat(80));
}

/// Missing-review diagnostics computed on the raw input.
struct MissingOverview {
    any_missing: usize,
    all_missing: usize,
    partial_ids: Vec<String>,
    correlation: Option<CorrelationMatrix>,
}

fn missing_overview(data: &DataFrame, config: &FeatureConfig) -> Option<MissingOverview> {
    let reviews: Vec<&str> = config
        .review_score_columns
        .iter()
        .map(String::as_str)
        .filter(|c| data.column(c).is_ok())
        .collect();
    if reviews.is_empty() || data.column("id").is_err() {
        return None;
    }

    let partial = match partial_missing(data, &reviews, "id", &[]) {
        Ok(partial) => partial,
        Err(e) => {
            warn!("Skipping missing-review overview: {}", e);
            return None;
        }
    };

    let correlation = config.zero_flag_columns.first().and_then(|indicator| {
        match missing_correlation(data, &reviews, indicator) {
            Ok(matrix) => Some(matrix),
            Err(e) => {
                warn!("Skipping missing-value correlation with '{}': {}", indicator, e);
                None
            }
        }
    });

    Some(MissingOverview {
        any_missing: partial.any_missing,
        all_missing: partial.all_missing,
        partial_ids: partial.ids,
        correlation,
    })
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df.clone())?;
    info!("Dataset saved: {}", path.display());
    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

fn print_human_readable_summary(report: &FeatureReport, overview: Option<&MissingOverview>) {
    println!();
    println!("{}", "=".repeat(80));
    println!("FEATURES COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file, report.rows, report.columns_before
    );
    if let Some(ref output_file) = report.output_file {
        println!(
            "Output: {} ({} rows x {} columns)",
            output_file, report.rows, report.columns_after
        );
    }
    println!();

    println!("Steps:");
    for step in &report.steps {
        println!("  - {}", step);
    }
    println!();

    if let Some(overview) = overview {
        println!("Missing review scores:");
        println!("  At least one missing: {}", overview.any_missing);
        println!("  All missing: {}", overview.all_missing);
        println!("  Some but not all: {}", overview.partial_ids.len());
        for id in overview.partial_ids.iter().take(10) {
            println!("    id {}", id);
        }
        if let Some(matrix) = &overview.correlation
            && let Some(indicator) = matrix.labels.last()
        {
            println!("  Correlation with '{}':", indicator);
            for label in &matrix.labels[..matrix.labels.len() - 1] {
                match matrix.get(label, indicator) {
                    Some(r) if r.is_finite() => println!("    {:<35} {:>6.3}", label, r),
                    _ => println!("    {:<35} {:>6}", label, "n/a"),
                }
            }
        }
        println!();
    }

    for dist in &report.distributions {
        println!("{}", dist);
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}

/// Load CSV, retrying without quote handling if the standard read fails.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
        .map_err(|e| anyhow!("Failed to load {}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_overview_without_indicator_column() {
        let data = df!(
            "id" => &[1i64, 2, 3],
            "review_scores_rating" => &[Some(4.5), None, None],
            "review_scores_value" => &[Some(4.0), Some(3.0), None]
        )
        .unwrap();

        let overview = missing_overview(&data, &FeatureConfig::default()).unwrap();

        assert_eq!(overview.any_missing, 2);
        assert_eq!(overview.all_missing, 1);
        assert_eq!(overview.partial_ids, vec!["2".to_string()]);
        assert!(overview.correlation.is_none());
    }

    #[test]
    fn test_missing_overview_with_indicator_column() {
        let data = df!(
            "id" => &[1i64, 2, 3],
            "review_scores_rating" => &[Some(4.5), None, Some(4.9)],
            "number_of_reviews" => &[3i64, 0, 12]
        )
        .unwrap();

        let overview = missing_overview(&data, &FeatureConfig::default()).unwrap();
        let matrix = overview.correlation.unwrap();

        assert_eq!(
            matrix.labels,
            vec!["review_scores_rating".to_string(), "number_of_reviews_0_vs_other".to_string()]
        );
    }
}

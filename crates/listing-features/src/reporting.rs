//! JSON report of a pipeline run.
//!
//! The same [`FeatureReport`] backs `--json` (printed to stdout) and
//! `--emit-report` (written next to the output file).

use crate::analysis::CategoryDistribution;
use crate::error::Result;
use crate::pipeline::FeatureResult;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of one run over one input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub input_file: String,
    /// Path to the output file (if written)
    pub output_file: Option<String>,
    pub rows: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    pub steps: Vec<String>,
    pub distributions: Vec<CategoryDistribution>,
}

impl FeatureReport {
    /// Build a report from a finished run.
    pub fn from_result(
        result: &FeatureResult,
        input_file: &Path,
        output_file: Option<&Path>,
        columns_before: usize,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            output_file: output_file.map(|p| p.display().to_string()),
            rows: result.frame.height(),
            columns_before,
            columns_after: result.frame.width(),
            steps: result.steps.clone(),
            distributions: result.distributions.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as `{report_base_name}_report.json` in `output_dir`.
    pub fn write_report_to_file(&self, output_dir: &Path, report_base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(output_dir)?;

        let report_path = output_dir.join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(self.to_json()?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use pretty_assertions::assert_eq;

    fn result() -> FeatureResult {
        FeatureResult {
            frame: df!("a" => &[1, 2], "b" => &["x", "y"]).unwrap(),
            steps: vec!["Replaced 'c' with 'c_present'".to_string()],
            distributions: Vec::new(),
        }
    }

    #[test]
    fn test_from_result() {
        let report = FeatureReport::from_result(
            &result(),
            Path::new("data/listings.csv"),
            Some(Path::new("out/listings_features.csv")),
            3,
        );

        assert_eq!(report.rows, 2);
        assert_eq!(report.columns_before, 3);
        assert_eq!(report.columns_after, 2);
        assert_eq!(report.input_file, "data/listings.csv");
        assert_eq!(report.output_file.as_deref(), Some("out/listings_features.csv"));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("listing_features_report_{}", std::process::id()));
        let report = FeatureReport::from_result(&result(), Path::new("listings.csv"), None, 3);

        let path = report.write_report_to_file(&dir, "listings").unwrap();

        assert!(path.ends_with("listings_report.json"));
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["rows"], 2);
        assert_eq!(written["output_file"], serde_json::Value::Null);
        assert_eq!(written["steps"][0], "Replaced 'c' with 'c_present'");

        let _ = fs::remove_dir_all(&dir);
    }
}

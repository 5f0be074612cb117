use crate::profiler::DatasetProfile;
use crate::report::CleaningReport;
use anyhow::Result;
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Analysis document written next to the cleaned dataset.
///
/// Combines the cleaning report with the post-clean profile so a reader can
/// see both what changed and what remains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Path to the input file.
    pub input_file: String,
    /// Path to the cleaned dataset, if written.
    pub output_file: Option<String>,
    /// What the pipeline changed.
    pub cleaning: CleaningReport,
    /// Per-column profile of the cleaned dataset.
    pub final_profile: DatasetProfile,
}

impl AnalysisReport {
    /// Assemble a report document from pipeline outputs.
    pub fn build(
        input_file: &str,
        output_file: Option<&str>,
        cleaning: CleaningReport,
        final_profile: DatasetProfile,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            output_file: output_file.map(String::from),
            cleaning,
            final_profile,
        }
    }
}

/// Writes pipeline outputs to an output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl ReportGenerator {
    /// Create a new generator with custom output settings.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Base name for output files, without extension.
    fn file_stem(&self) -> String {
        self.output_name
            .clone()
            .unwrap_or_else(|| "cleaned_dataset".to_string())
    }

    /// Write the cleaned dataset as CSV and return its path.
    pub fn save_dataset(&self, df: &mut DataFrame) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(format!("{}.csv", self.file_stem()));
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Write the analysis report as pretty JSON and return its path.
    pub fn write_report(&self, report: &AnalysisReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let report_path = self
            .output_dir
            .join(format!("{}_report.json", self.file_stem()));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}

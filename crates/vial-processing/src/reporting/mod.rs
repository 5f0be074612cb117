//! Output-file generation.
//!
//! This module writes the cleaned dataset and a JSON analysis report to
//! disk. Library users that keep results in memory never need it; the CLI
//! drives it after a pipeline run.

mod generator;

pub use generator::{AnalysisReport, ReportGenerator};

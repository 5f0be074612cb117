//! Tabular Cleaning Pipeline Library
//!
//! A deterministic, schema-driven cleaning pipeline for tabular datasets,
//! built with Rust and Polars. The reference use case is a Spanish-language
//! road-safety incident CSV, but every column name is configuration data.
//!
//! # Overview
//!
//! This library provides:
//!
//! - **Missing-value profiling**: per-column null counts and fractions
//! - **Structural cleaning**: duplicate removal, high-missingness column
//!   pruning with key-column preservation, key-row filtering
//! - **Imputation**: mode for categoricals, rounded mean for numerics,
//!   zero-fill for binary flags
//! - **Transforms**: yes/no vocabulary mapping, min-max normalization,
//!   binned discretization
//! - **Reporting**: a structured [`CleaningReport`] of every change, plus
//!   optional CSV/JSON output files
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vial_processing::{ColumnSpec, Pipeline, PipelineConfig};
//! use polars::prelude::*;
//!
//! // Parse the upload outside the pipeline; parse failures are the
//! // caller's MalformedInput, not a pipeline error.
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("siniestros.csv".into()))?
//!     .finish()?;
//!
//! let outcome = Pipeline::builder()
//!     .schema(ColumnSpec::seguridad_vial())
//!     .config(
//!         PipelineConfig::builder()
//!             .missing_column_threshold(0.5)
//!             .normalize("EDAD LESIONADO", "EDAD NORMALIZADA")
//!             .build()?,
//!     )
//!     .build()?
//!     .process(df)?;
//!
//! println!("Removed {} duplicates", outcome.report.duplicates_removed);
//! println!("{}", outcome.data);
//! ```
//!
//! # Error handling
//!
//! Per-column problems never abort a run: absent schema columns are skipped
//! and listed in the report, all-missing aggregates become warnings. Only
//! invalid configuration and frame-level engine failures surface as errors;
//! see [`CleaningError`].

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod profiler;
pub mod report;
pub mod reporting;
pub mod schema;
pub mod transform;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{
    ConfigValidationError, DiscretizeSpec, NormalizeSpec, PipelineConfig, PipelineConfigBuilder,
};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{CleaningOutcome, Pipeline, PipelineBuilder};
pub use profiler::{ColumnProfile, DataProfiler, DatasetProfile};
pub use report::{CleaningReport, DroppedColumn, ImputationMethod, ImputationRecord};
pub use reporting::{AnalysisReport, ReportGenerator};
pub use schema::{ColumnSpec, SchemaValidationError};
pub use transform::{BinaryMapper, FeatureDeriver};

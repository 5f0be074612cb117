//! Statistical imputation methods.
//!
//! Mode imputation for categorical columns, rounded-mean imputation for
//! numeric columns, zero-fill for binary flag columns. Aggregates are
//! computed over non-missing values only and applied only to missing cells.

use crate::report::{CleaningReport, ImputationMethod};
use crate::utils::{fill_binary_flags, fill_numeric_nulls, fill_string_nulls, rounded_mean, string_mode};
use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Apply mode imputation to a categorical column.
    ///
    /// A configured column absent from the frame is recorded and skipped.
    /// An all-missing column has no mode; it is skipped with a warning.
    pub fn apply_mode(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(col_name) else {
            report.record_missing_schema_column(col_name);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let null_count = series.null_count();
        if null_count == 0 {
            return Ok(());
        }

        let Some(mode_val) = string_mode(&series) else {
            report.add_warning(format!(
                "Cannot impute '{}': no non-missing values to take a mode from",
                col_name
            ));
            return Ok(());
        };

        let filled = fill_string_nulls(&series, &mode_val)?;
        df.replace(col_name, filled)?;
        report.record_imputation(col_name, ImputationMethod::Mode, &mode_val, null_count);

        debug!("Filled '{}' with mode: '{}'", col_name, mode_val);
        Ok(())
    }

    /// Apply rounded-mean imputation to a numeric column.
    pub fn apply_mean_rounded(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(col_name) else {
            report.record_missing_schema_column(col_name);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let null_count = series.null_count();
        if null_count == 0 {
            return Ok(());
        }

        let Some(mean_val) = rounded_mean(&series) else {
            report.add_warning(format!(
                "Cannot impute '{}': no non-missing values to take a mean from",
                col_name
            ));
            return Ok(());
        };

        let filled = fill_numeric_nulls(&series, mean_val)?;
        df.replace(col_name, filled)?;
        report.record_imputation(
            col_name,
            ImputationMethod::MeanRounded,
            format!("{}", mean_val),
            null_count,
        );

        debug!("Filled '{}' with rounded mean: {}", col_name, mean_val);
        Ok(())
    }

    /// Zero-fill a binary flag column and cast it onto the integer
    /// domain {0, 1}.
    ///
    /// The cast applies even when no cells are missing, so flag columns
    /// leave the pipeline as integers regardless of input dtype.
    pub fn apply_zero_flag(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(col_name) else {
            report.record_missing_schema_column(col_name);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let null_count = series.null_count();

        let filled = fill_binary_flags(&series)?;
        df.replace(col_name, filled)?;

        if null_count > 0 {
            report.record_imputation(col_name, ImputationMethod::Zero, "0", null_count);
            debug!("Filled '{}' with 0 ({} cells)", col_name, null_count);
        }

        Ok(())
    }
}

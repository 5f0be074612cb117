//! Structural cleaning for datasets.
//!
//! This module provides the row/column removal steps of the pipeline:
//! - Removing exact-duplicate rows
//! - Dropping columns with high missing rates
//! - Removing rows with missing key fields

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::profiler::DatasetProfile;
use crate::report::{CleaningReport, DroppedColumn};
use crate::schema::ColumnSpec;
use polars::prelude::*;
use tracing::{debug, warn};

/// Data cleaner for structural dataset cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove exact-duplicate rows, keeping the first occurrence.
    ///
    /// Row order is preserved. The removed count is recorded in the report.
    pub fn remove_duplicates(df: DataFrame, report: &mut CleaningReport) -> Result<DataFrame> {
        let before = df.height();
        let df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - df.height();

        report.duplicates_removed = removed;
        if removed > 0 {
            debug!("Removed {} duplicate rows", removed);
        } else {
            debug!("No duplicate rows found");
        }

        Ok(df)
    }

    /// Drop columns whose missing fraction exceeds the configured threshold.
    ///
    /// Key columns are exempt when `preserve_key_columns` is set. Dropped
    /// names and their missing fractions go into the report.
    pub fn prune_missing_columns(
        df: DataFrame,
        profile: &DatasetProfile,
        spec: &ColumnSpec,
        config: &PipelineConfig,
        report: &mut CleaningReport,
    ) -> Result<DataFrame> {
        let dropped: Vec<DroppedColumn> = profile
            .columns
            .iter()
            .filter(|col| {
                col.null_fraction > config.missing_column_threshold
                    && !(config.preserve_key_columns && spec.key_columns.contains(&col.name))
            })
            .map(|col| DroppedColumn {
                name: col.name.clone(),
                missing_fraction: col.null_fraction,
            })
            .collect();

        if dropped.is_empty() {
            debug!(
                "No columns above the {:.0}% missing threshold",
                config.missing_column_threshold * 100.0
            );
            report.dropped_columns = dropped;
            return Ok(df);
        }

        let names: Vec<PlSmallStr> = dropped.iter().map(|c| c.name.as_str().into()).collect();
        debug!(
            "Dropping {} columns above the {:.0}% missing threshold: {:?}",
            names.len(),
            config.missing_column_threshold * 100.0,
            dropped.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );

        let df = df.drop_many(names);
        report.dropped_columns = dropped;
        Ok(df)
    }

    /// Drop rows with a missing value in any configured key column.
    ///
    /// If none of the configured key columns exist in the table, the filter
    /// degrades to a no-op: the report gets a warning and `key_filter_skipped`
    /// is set, but the run continues.
    pub fn filter_key_rows(
        df: DataFrame,
        spec: &ColumnSpec,
        report: &mut CleaningReport,
    ) -> Result<DataFrame> {
        if spec.key_columns.is_empty() {
            return Ok(df);
        }

        let present_keys: Vec<&String> = spec
            .key_columns
            .iter()
            .filter(|name| df.get_column_names().iter().any(|c| c.as_str() == name.as_str()))
            .collect();

        if present_keys.is_empty() {
            warn!(
                "None of the configured key columns {:?} exist; keeping all rows",
                spec.key_columns
            );
            report.key_filter_skipped = true;
            report.add_warning(format!(
                "Key-row filtering skipped: none of the configured key columns {:?} exist in the input",
                spec.key_columns
            ));
            return Ok(df);
        }

        let before = df.height();
        let mut mask = BooleanChunked::full("key_mask".into(), true, df.height());
        for key in &present_keys {
            let col = df.column(key.as_str())?;
            mask = &mask & &col.as_materialized_series().is_not_null();
        }

        let df = df.filter(&mask)?;
        report.rows_dropped_for_keys = before - df.height();

        if report.rows_dropped_for_keys > 0 {
            debug!(
                "Dropped {} rows with missing values in key columns {:?}",
                report.rows_dropped_for_keys,
                present_keys
            );
        }

        Ok(df)
    }
}

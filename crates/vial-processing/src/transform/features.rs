//! Derived feature columns.
//!
//! Min-max normalization and binned discretization of numeric columns.
//! Both read an existing column and add a new one; the source column is
//! never modified.

use crate::config::{DiscretizeSpec, NormalizeSpec};
use crate::error::{CleaningError, Result};
use crate::report::CleaningReport;
use polars::prelude::*;
use tracing::debug;

/// Adds derived columns from existing numeric columns.
pub struct FeatureDeriver;

impl FeatureDeriver {
    /// Min-max normalize `spec.source` into a new `Float64` column on
    /// [0, 1].
    ///
    /// The minimum and maximum are computed over non-missing values; missing
    /// cells stay missing in the output. A source with zero non-missing
    /// values is an [`CleaningError::InsufficientData`] condition. A constant
    /// column maps every value to 0.0.
    pub fn normalize_min_max(
        df: &mut DataFrame,
        spec: &NormalizeSpec,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(&spec.source) else {
            report.record_missing_schema_column(&spec.source);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let float_series = series.cast(&DataType::Float64)?;
        let chunked = float_series.f64()?;

        let min = chunked.min();
        let max = chunked.max();
        let (Some(min), Some(max)) = (min, max) else {
            return Err(CleaningError::InsufficientData(spec.source.clone()));
        };

        let range = max - min;
        let values: Vec<Option<f64>> = chunked
            .into_iter()
            .map(|opt| {
                opt.map(|x| if range == 0.0 { 0.0 } else { (x - min) / range })
            })
            .collect();

        let derived = Series::new(spec.output.as_str().into(), values);
        df.with_column(derived)?;
        report.derived_columns.push(spec.output.clone());

        debug!(
            "Normalized '{}' into '{}' (min {}, max {})",
            spec.source, spec.output, min, max
        );
        Ok(())
    }

    /// Discretize `spec.source` into labeled bins in a new `String` column.
    ///
    /// Bins are left-closed/right-open except the final one, which is closed
    /// on both ends. Values outside every bin and missing values take the
    /// unclassified label, so the output covers every row.
    pub fn discretize(
        df: &mut DataFrame,
        spec: &DiscretizeSpec,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(&spec.source) else {
            report.record_missing_schema_column(&spec.source);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let float_series = series.cast(&DataType::Float64)?;
        let chunked = float_series.f64()?;

        let values: Vec<String> = chunked
            .into_iter()
            .map(|opt| match opt {
                Some(x) => bin_label(x, spec),
                None => spec.unclassified_label.clone(),
            })
            .collect();

        let derived = Series::new(spec.output.as_str().into(), values);
        df.with_column(derived)?;
        report.derived_columns.push(spec.output.clone());

        debug!(
            "Discretized '{}' into '{}' over {} bins",
            spec.source,
            spec.output,
            spec.labels.len()
        );
        Ok(())
    }
}

fn bin_label(value: f64, spec: &DiscretizeSpec) -> String {
    let last = spec.labels.len() - 1;
    for (i, label) in spec.labels.iter().enumerate() {
        let left = spec.edges[i];
        let right = spec.edges[i + 1];
        let inside = if i == last {
            value >= left && value <= right
        } else {
            value >= left && value < right
        };
        if inside {
            return label.clone();
        }
    }
    spec.unclassified_label.clone()
}

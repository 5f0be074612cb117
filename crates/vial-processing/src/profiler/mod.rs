//! Missing-value profiling for datasets.
//!
//! The profile drives the high-missingness pruning step and gives callers
//! the per-column null table they display before cleaning.

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-column profile: dtype, nulls and cardinality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    /// Fraction of missing values (0.0 - 1.0).
    pub null_fraction: f64,
    pub distinct_count: usize,
}

/// Profile of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<ColumnProfile>,
}

impl DatasetProfile {
    /// Look up one column's profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Total null cells across the dataset.
    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }
}

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a dataset.
    pub fn profile(df: &DataFrame) -> Result<DatasetProfile> {
        let mut columns = Vec::with_capacity(df.width());

        for col_name in df.get_column_names() {
            columns.push(Self::profile_column(df, col_name)?);
        }

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            columns,
        })
    }

    fn profile_column(df: &DataFrame, col_name: &str) -> Result<ColumnProfile> {
        let col = df.column(col_name)?;
        let series = col.as_materialized_series();

        let null_count = series.null_count();
        let null_fraction = if df.height() > 0 {
            null_count as f64 / df.height() as f64
        } else {
            0.0
        };

        Ok(ColumnProfile {
            name: col_name.to_string(),
            dtype: format!("{:?}", series.dtype()),
            null_count,
            null_fraction,
            distinct_count: series.n_unique()?,
        })
    }
}

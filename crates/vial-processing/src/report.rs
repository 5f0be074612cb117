//! Structured record of what a pipeline run changed.
//!
//! The report is designed to be serialized and handed to a presentation
//! layer for textual summaries, so every field derives serde.

use serde::{Deserialize, Serialize};

/// Imputation strategy applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationMethod {
    /// Most frequent value (categorical columns).
    Mode,
    /// Mean of non-missing values, rounded to the nearest integer.
    MeanRounded,
    /// Constant zero (binary flag columns).
    Zero,
}

impl ImputationMethod {
    /// Human-readable display name for the method.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::MeanRounded => "mean (rounded)",
            Self::Zero => "zero",
        }
    }
}

/// One imputed column: which method ran and what value filled the gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationRecord {
    /// Column the imputation applied to.
    pub column: String,
    /// Strategy used.
    pub method: ImputationMethod,
    /// The fill value, rendered as text.
    pub fill_value: String,
    /// How many cells were filled.
    pub cells_filled: usize,
}

/// A column dropped for excess missingness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedColumn {
    /// Column name.
    pub name: String,
    /// Fraction of missing values that triggered the drop (0.0 - 1.0).
    pub missing_fraction: f64,
}

/// Record of everything a pipeline run changed.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = pipeline.process(df)?;
/// println!("{} duplicates removed", outcome.report.duplicates_removed);
/// for imp in &outcome.report.imputations {
///     println!("{}: {}", imp.column, imp.method.display_name());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,
    /// Number of columns before cleaning.
    pub columns_before: usize,
    /// Number of columns after cleaning.
    pub columns_after: usize,

    /// Exact-duplicate rows removed.
    pub duplicates_removed: usize,

    /// Columns dropped for excess missingness.
    pub dropped_columns: Vec<DroppedColumn>,

    /// Rows dropped because a key column was missing.
    pub rows_dropped_for_keys: usize,
    /// Set when no configured key column was present and the key-row
    /// filter degraded to a no-op.
    pub key_filter_skipped: bool,

    /// Per-column imputations applied.
    pub imputations: Vec<ImputationRecord>,

    /// Yes/no columns mapped onto the integer domain {0, 1}.
    pub mapped_columns: Vec<String>,

    /// Derived columns added (normalization, discretization).
    pub derived_columns: Vec<String>,

    /// Configured columns that were absent from the input.
    pub missing_schema_columns: Vec<String>,

    /// Warnings and notes generated during the run.
    pub warnings: Vec<String>,
}

impl CleaningReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record an applied imputation.
    pub fn record_imputation(
        &mut self,
        column: impl Into<String>,
        method: ImputationMethod,
        fill_value: impl Into<String>,
        cells_filled: usize,
    ) {
        self.imputations.push(ImputationRecord {
            column: column.into(),
            method,
            fill_value: fill_value.into(),
            cells_filled,
        });
    }

    /// Record a configured column that the input does not contain.
    pub fn record_missing_schema_column(&mut self, column: impl Into<String>) {
        let column = column.into();
        if !self.missing_schema_columns.contains(&column) {
            self.missing_schema_columns.push(column);
        }
    }

    /// Look up the imputation applied to a column, if any.
    pub fn imputation_for(&self, column: &str) -> Option<&ImputationRecord> {
        self.imputations.iter().find(|r| r.column == column)
    }

    /// Total rows removed across all steps.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Calculate the percentage of rows removed.
    pub fn rows_removed_percentage(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed() as f64 / self.rows_before as f64) * 100.0
        }
    }

    /// Calculate the percentage of columns removed.
    pub fn columns_removed_percentage(&self) -> f64 {
        if self.columns_before == 0 {
            0.0
        } else {
            let removed = self.columns_before.saturating_sub(self.columns_after);
            (removed as f64 / self.columns_before as f64) * 100.0
        }
    }
}

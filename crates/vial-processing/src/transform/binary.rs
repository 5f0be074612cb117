//! Yes/no vocabulary mapping.
//!
//! Two-valued text columns ("SI"/"NO") are mapped onto the integer domain
//! {0, 1}. Anything outside the affirmative vocabulary, including residual
//! missing values, maps to 0 so the output never contains nulls.

use crate::error::Result;
use crate::report::CleaningReport;
use polars::prelude::*;
use tracing::debug;

/// Affirmative spellings accepted by the mapping.
const YES_VALUES: [&str; 2] = ["SI", "SÍ"];

/// Maps yes/no text columns onto integer flags.
pub struct BinaryMapper;

impl BinaryMapper {
    /// Map one yes/no column to {0, 1} and cast to `Int64`.
    ///
    /// A configured column absent from the frame is recorded and skipped.
    pub fn map_yes_no(
        df: &mut DataFrame,
        col_name: &str,
        report: &mut CleaningReport,
    ) -> Result<()> {
        let Ok(column) = df.column(col_name) else {
            report.record_missing_schema_column(col_name);
            return Ok(());
        };

        let series = column.as_materialized_series().clone();
        let str_series = series.cast(&DataType::String)?;
        let chunked = str_series.str()?;

        let values: Vec<i64> = chunked
            .into_iter()
            .map(|opt| match opt {
                Some(v) if is_yes(v) => 1,
                _ => 0,
            })
            .collect();

        df.replace(col_name, Series::new(col_name.into(), values))?;
        report.mapped_columns.push(col_name.to_string());

        debug!("Mapped yes/no column '{}' onto {{0, 1}}", col_name);
        Ok(())
    }
}

fn is_yes(value: &str) -> bool {
    let trimmed = value.trim();
    YES_VALUES
        .iter()
        .any(|yes| trimmed.eq_ignore_ascii_case(yes))
}

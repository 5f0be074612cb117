//! Shared series utilities for the cleaning pipeline.
//!
//! Helper functions used across multiple modules to reduce duplication and
//! keep null handling consistent.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Calculate the mode (most frequent value) of a Series, viewed as strings.
///
/// Missing values are ignored. Ties resolve to the smallest of the tied
/// values in the column's natural value ordering.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;
    let str_chunked = str_series.str().ok()?;

    let mut value_counts: std::collections::HashMap<String, usize> =
        std::collections::HashMap::new();
    for val in str_chunked.into_iter().flatten() {
        *value_counts.entry(val.to_string()).or_insert(0) += 1;
    }

    value_counts
        .into_iter()
        .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
        .map(|(val, _)| val)
}

/// Mean of a numeric Series over its non-missing values, rounded to the
/// nearest integer. `None` if the series has no non-missing values.
pub fn rounded_mean(series: &Series) -> Option<f64> {
    series.mean().map(f64::round)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
///
/// The series is viewed as `Float64`; non-null cells are untouched.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let chunked = float_series.f64()?;

    let values: Vec<f64> = chunked
        .into_iter()
        .map(|opt| opt.unwrap_or(fill_value))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_series = series.cast(&DataType::String)?;
    let chunked = str_series.str()?;

    let values: Vec<String> = chunked
        .into_iter()
        .map(|opt| opt.map_or_else(|| fill_value.to_string(), str::to_string))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Fill nulls with 0 and collapse the series onto the integer domain {0, 1}.
///
/// Any non-zero value maps to 1 so dirty flag columns still satisfy the
/// binary domain after the cast.
pub fn fill_binary_flags(series: &Series) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let chunked = float_series.f64()?;

    let values: Vec<i64> = chunked
        .into_iter()
        .map(|opt| match opt {
            Some(x) if x != 0.0 => 1,
            _ => 0,
        })
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

// =============================================================================
// Tests
// =============================================================================

//! Custom error types for the cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror` for better
//! error handling and context throughout the pipeline.
//!
//! Errors are serializable so a host application can forward them to a
//! frontend for display.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A column has no non-missing values where an aggregate or
    /// normalization requires at least one.
    #[error("No valid values found in column '{0}'")]
    InsufficientData(String),

    /// The raw input could not be parsed into a table. Raised by loaders
    /// before the pipeline is entered.
    #[error("Failed to parse input '{path}': {reason}")]
    MalformedInput { path: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InsufficientData(_) => "INSUFFICIENT_DATA",
            Self::MalformedInput { .. } => "MALFORMED_INPUT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable at the step level. Recoverable
    /// errors are isolated to the affected column and reported as warnings.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ColumnNotFound(_) | Self::InsufficientData(_))
    }
}

/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in a host frontend.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

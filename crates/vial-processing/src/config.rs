//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};

/// Derived-feature request: min-max normalization of one numeric column
/// into a new column on the [0, 1] range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeSpec {
    /// Numeric column to rescale.
    pub source: String,
    /// Name of the derived column.
    pub output: String,
}

/// Derived-feature request: discretization of one numeric column into
/// labeled bins.
///
/// Intervals are left-closed/right-open except the final bin, which is
/// closed on both ends. Values outside every bin (and residual missing
/// values) take `unclassified_label` instead of being dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscretizeSpec {
    /// Numeric column to bin.
    pub source: String,
    /// Name of the derived column.
    pub output: String,
    /// Ascending bin edges; `edges.len()` must be `labels.len() + 1`.
    pub edges: Vec<f64>,
    /// One label per bin.
    pub labels: Vec<String>,
    /// Label applied to values outside every bin.
    pub unclassified_label: String,
}

impl DiscretizeSpec {
    /// The reference age grouping used by the road-safety reports.
    pub fn age_groups(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            edges: vec![0.0, 18.0, 30.0, 45.0, 60.0, 100.0],
            labels: vec![
                "MENOR".to_string(),
                "JOVEN".to_string(),
                "ADULTO".to_string(),
                "ADULTO MAYOR".to_string(),
                "TERCERA EDAD".to_string(),
            ],
            unclassified_label: "SIN CLASIFICAR".to_string(),
        }
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration with a
/// fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use vial_processing::config::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .missing_column_threshold(0.5)
///     .preserve_key_columns(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Threshold for dropping columns with too many missing values
    /// (0.0 - 1.0). Columns with a missing fraction strictly above this
    /// threshold are dropped.
    /// Default: 0.5 (50%)
    pub missing_column_threshold: f64,

    /// Whether key columns are exempt from high-missingness pruning.
    /// Default: true
    pub preserve_key_columns: bool,

    /// Whether to remove exact-duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Optional min-max normalization of one column.
    /// Default: None
    pub normalize: Option<NormalizeSpec>,

    /// Optional binned discretization of one column.
    /// Default: None
    pub discretize: Option<DiscretizeSpec>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_column_threshold: 0.5,
            preserve_key_columns: true,
            remove_duplicates: true,
            normalize: None,
            discretize: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.missing_column_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "missing_column_threshold".to_string(),
                value: self.missing_column_threshold,
            });
        }

        if let Some(discretize) = &self.discretize {
            if discretize.edges.len() < 2 {
                return Err(ConfigValidationError::NotEnoughBinEdges(
                    discretize.edges.len(),
                ));
            }
            if discretize.labels.len() + 1 != discretize.edges.len() {
                return Err(ConfigValidationError::LabelEdgeMismatch {
                    labels: discretize.labels.len(),
                    edges: discretize.edges.len(),
                });
            }
            if discretize.edges.windows(2).any(|w| w[0] >= w[1]) {
                return Err(ConfigValidationError::NonAscendingBinEdges);
            }
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Discretization needs at least 2 bin edges, got {0}")]
    NotEnoughBinEdges(usize),

    #[error("Discretization needs one label per bin: {labels} labels for {edges} edges")]
    LabelEdgeMismatch { labels: usize, edges: usize },

    #[error("Discretization bin edges must be strictly ascending")]
    NonAscendingBinEdges,
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    missing_column_threshold: Option<f64>,
    preserve_key_columns: Option<bool>,
    remove_duplicates: Option<bool>,
    normalize: Option<NormalizeSpec>,
    discretize: Option<DiscretizeSpec>,
}

impl PipelineConfigBuilder {
    /// Set the threshold for dropping columns with missing values.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn missing_column_threshold(mut self, threshold: f64) -> Self {
        self.missing_column_threshold = Some(threshold);
        self
    }

    /// Exempt key columns from high-missingness pruning.
    ///
    /// When false, key columns are pruned like any other column and the
    /// key-row filter silently degrades to a no-op for pruned keys.
    pub fn preserve_key_columns(mut self, preserve: bool) -> Self {
        self.preserve_key_columns = Some(preserve);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Request min-max normalization of `source` into a new `output` column.
    pub fn normalize(mut self, source: impl Into<String>, output: impl Into<String>) -> Self {
        self.normalize = Some(NormalizeSpec {
            source: source.into(),
            output: output.into(),
        });
        self
    }

    /// Request binned discretization of one column.
    pub fn discretize(mut self, spec: DiscretizeSpec) -> Self {
        self.discretize = Some(spec);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let config = PipelineConfig {
            missing_column_threshold: self.missing_column_threshold.unwrap_or(0.5),
            preserve_key_columns: self.preserve_key_columns.unwrap_or(true),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            normalize: self.normalize,
            discretize: self.discretize,
        };

        config.validate()?;
        Ok(config)
    }
}

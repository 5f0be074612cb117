//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning workflow.

use crate::cleaner::DataCleaner;
use crate::config::PipelineConfig;
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::profiler::DataProfiler;
use crate::report::CleaningReport;
use crate::schema::ColumnSpec;
use crate::transform::{BinaryMapper, FeatureDeriver};
use polars::prelude::*;
use tracing::{debug, info};

/// Result of one pipeline run: the cleaned table plus the change report.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    /// The cleaned table.
    pub data: DataFrame,
    /// What the run changed.
    pub report: CleaningReport,
}

/// The main cleaning pipeline.
///
/// A pipeline is a pure function over one table: it holds only immutable
/// configuration, so a single instance can process any number of frames and
/// two runs over the same input produce identical outcomes.
///
/// Use [`Pipeline::builder()`] to create a pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use vial_processing::{ColumnSpec, Pipeline, PipelineConfig};
///
/// let pipeline = Pipeline::builder()
///     .schema(ColumnSpec::seguridad_vial())
///     .config(PipelineConfig::builder().missing_column_threshold(0.5).build()?)
///     .build()?;
///
/// let outcome = pipeline.process(df)?;
/// println!("{} rows remain", outcome.data.height());
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    spec: ColumnSpec,
}

// Pipelines move into worker threads in host applications
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The column-role schema this pipeline applies.
    pub fn schema(&self) -> &ColumnSpec {
        &self.spec
    }

    /// The configuration this pipeline applies.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the cleaning steps over one table.
    ///
    /// Steps run in a fixed order: duplicate removal, high-missingness
    /// column pruning, key-row filtering, categorical/numeric/binary
    /// imputation, yes-no mapping, derived features. Per-column problems
    /// (absent columns, all-missing aggregates) are isolated and reported;
    /// the run always returns a best-effort table.
    pub fn process(&self, df: DataFrame) -> Result<CleaningOutcome> {
        let mut report = CleaningReport::new();
        report.rows_before = df.height();
        report.columns_before = df.width();

        info!(
            "Cleaning table with {} rows, {} columns",
            df.height(),
            df.width()
        );

        // Step 1: duplicate removal
        let df = if self.config.remove_duplicates {
            DataCleaner::remove_duplicates(df, &mut report)?
        } else {
            debug!("Duplicate removal disabled");
            df
        };

        // Step 2: high-missingness column pruning
        let profile = DataProfiler::profile(&df)?;
        let df = DataCleaner::prune_missing_columns(
            df,
            &profile,
            &self.spec,
            &self.config,
            &mut report,
        )?;

        // Step 3: key-row filtering
        let mut df = DataCleaner::filter_key_rows(df, &self.spec, &mut report)?;

        // Step 4: categorical imputation
        for col in &self.spec.categorical_columns {
            if report.dropped_columns.iter().any(|d| &d.name == col) {
                continue;
            }
            StatisticalImputer::apply_mode(&mut df, col, &mut report)?;
        }

        // Step 5: numeric imputation. Key columns are excluded: the key-row
        // filter already guarantees them non-missing.
        for col in &self.spec.numeric_columns {
            if report.dropped_columns.iter().any(|d| &d.name == col) {
                continue;
            }
            if !report.key_filter_skipped && self.spec.key_columns.contains(col) {
                continue;
            }
            StatisticalImputer::apply_mean_rounded(&mut df, col, &mut report)?;
        }

        // Step 6: binary flag imputation
        for col in &self.spec.binary_columns {
            if report.dropped_columns.iter().any(|d| &d.name == col) {
                continue;
            }
            StatisticalImputer::apply_zero_flag(&mut df, col, &mut report)?;
        }

        // Step 7: yes/no mapping
        for col in &self.spec.yes_no_columns {
            if report.dropped_columns.iter().any(|d| &d.name == col) {
                continue;
            }
            BinaryMapper::map_yes_no(&mut df, col, &mut report)?;
        }

        // Step 8: derived features, only where the source column survived
        if let Some(normalize) = &self.config.normalize {
            self.derive(&mut df, &normalize.source, &mut report, |df, report| {
                FeatureDeriver::normalize_min_max(df, normalize, report)
            })?;
        }
        if let Some(discretize) = &self.config.discretize {
            self.derive(&mut df, &discretize.source, &mut report, |df, report| {
                FeatureDeriver::discretize(df, discretize, report)
            })?;
        }

        report.rows_after = df.height();
        report.columns_after = df.width();

        info!(
            "Cleaning complete: {} rows, {} columns remain ({} duplicates, {} key rows removed)",
            report.rows_after,
            report.columns_after,
            report.duplicates_removed,
            report.rows_dropped_for_keys
        );

        Ok(CleaningOutcome { data: df, report })
    }

    /// Run one derived-feature step, isolating recoverable failures as
    /// report warnings.
    fn derive<F>(
        &self,
        df: &mut DataFrame,
        source: &str,
        report: &mut CleaningReport,
        step: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut DataFrame, &mut CleaningReport) -> Result<()>,
    {
        if !df.get_column_names().iter().any(|c| c.as_str() == source) {
            report.add_warning(format!(
                "Derived feature skipped: {}",
                CleaningError::ColumnNotFound(source.to_string())
            ));
            return Ok(());
        }

        match step(df, report) {
            Ok(()) => Ok(()),
            Err(e) if e.is_recoverable() => {
                report.add_warning(format!("Derived feature skipped: {}", e));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    spec: Option<ColumnSpec>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the column-role schema.
    ///
    /// Defaults to an empty schema, under which only duplicate removal and
    /// column pruning have any effect.
    pub fn schema(mut self, spec: ColumnSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration or schema is invalid.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        let spec = self.spec.unwrap_or_default();
        spec.validate()
            .map_err(|e| CleaningError::InvalidConfig(e.to_string()))?;

        Ok(Pipeline { config, spec })
    }
}

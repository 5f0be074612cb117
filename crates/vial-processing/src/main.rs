//! CLI entry point for the cleaning pipeline.

use anyhow::{Result, anyhow};
use clap::Parser;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use vial_processing::{
    AnalysisReport, CleaningError, ColumnSpec, DataProfiler, DiscretizeSpec, Pipeline,
    PipelineConfig, ReportGenerator,
};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Schema-driven cleaning pipeline for road-safety incident datasets",
    long_about = "Cleans one CSV dataset: removes duplicate rows, prunes columns with \n\
                  excess missing values, drops rows missing key fields, imputes the \n\
                  rest per column role, and optionally derives normalized and \n\
                  discretized columns.\n\n\
                  EXAMPLES:\n  \
                  # Clean with the built-in Seguridad Vial schema\n  \
                  vial-processing -i siniestros.csv\n\n  \
                  # Custom schema and output location\n  \
                  vial-processing -i data.csv --schema schema.json -o results/\n\n  \
                  # Add normalized age and age groups\n  \
                  vial-processing -i siniestros.csv --normalize-column \"EDAD LESIONADO\" --age-groups\n\n  \
                  # Preview without writing files\n  \
                  vial-processing -i siniestros.csv --dry-run"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses "cleaned_dataset"
    #[arg(long)]
    output_name: Option<String>,

    /// Path to a column-role schema JSON file
    ///
    /// If not specified, the built-in Seguridad Vial schema is used
    #[arg(long)]
    schema: Option<String>,

    /// Missing column threshold (0.0 - 1.0)
    ///
    /// Columns with a missing fraction above this value will be dropped
    #[arg(long, default_value = "0.5")]
    missing_col_threshold: f64,

    /// Prune key columns like any other column instead of preserving them
    #[arg(long, default_value = "false")]
    no_preserve_key_columns: bool,

    /// Keep exact-duplicate rows
    #[arg(long, default_value = "false")]
    keep_duplicates: bool,

    /// Numeric column to min-max normalize into "<column> NORMALIZADA"
    #[arg(long)]
    normalize_column: Option<String>,

    /// Name for the normalized column
    ///
    /// Only meaningful together with --normalize-column
    #[arg(long)]
    normalize_output: Option<String>,

    /// Derive the "GRUPO EDAD" age-group column from "EDAD LESIONADO"
    #[arg(long, default_value = "false")]
    age_groups: bool,

    /// Preview the cleaning report without writing files
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and the final summary)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let df = load_csv(&args.input)?;
    info!(
        "Loaded '{}': {} rows, {} columns",
        args.input,
        df.height(),
        df.width()
    );

    let spec = load_schema(args.schema.as_deref())?;
    let config = build_config(&args)?;

    let pipeline = Pipeline::builder().schema(spec).config(config).build()?;
    let outcome = pipeline.process(df)?;

    print_summary(&outcome.report);

    if args.dry_run {
        info!("Dry run: no files written");
        return Ok(());
    }

    let generator = ReportGenerator::new(PathBuf::from(&args.output), args.output_name.clone());
    let mut cleaned = outcome.data;
    let dataset_path = generator.save_dataset(&mut cleaned)?;

    let final_profile = DataProfiler::profile(&cleaned)?;
    let report = AnalysisReport::build(
        &args.input,
        dataset_path.to_str(),
        outcome.report,
        final_profile,
    );
    generator.write_report(&report)?;

    Ok(())
}

fn init_tracing(args: &Args) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = if args.quiet {
        "error".to_string()
    } else {
        args.log_level.clone()
    };

    let filter = EnvFilter::try_new(&level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}

/// Read the input CSV. Parse failures surface as `MalformedInput` before
/// any pipeline is built.
fn load_csv(path: &str) -> Result<DataFrame> {
    if !Path::new(path).exists() {
        return Err(anyhow!("Input file '{}' does not exist", path));
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .and_then(|reader| reader.finish())
        .map_err(|e| {
            CleaningError::MalformedInput {
                path: path.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn load_schema(path: Option<&str>) -> Result<ColumnSpec> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow!("Cannot read schema file '{}': {}", path, e))?;
            let spec: ColumnSpec = serde_json::from_str(&content)
                .map_err(|e| anyhow!("Cannot parse schema file '{}': {}", path, e))?;
            debug!("Loaded schema from '{}'", path);
            Ok(spec)
        }
        None => {
            debug!("Using the built-in Seguridad Vial schema");
            Ok(ColumnSpec::seguridad_vial())
        }
    }
}

fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .missing_column_threshold(args.missing_col_threshold)
        .preserve_key_columns(!args.no_preserve_key_columns)
        .remove_duplicates(!args.keep_duplicates);

    if let Some(source) = &args.normalize_column {
        let output = args
            .normalize_output
            .clone()
            .unwrap_or_else(|| format!("{} NORMALIZADA", source));
        builder = builder.normalize(source, output);
    } else if args.normalize_output.is_some() {
        warn!("--normalize-output has no effect without --normalize-column");
    }

    if args.age_groups {
        builder = builder.discretize(DiscretizeSpec::age_groups("EDAD LESIONADO", "GRUPO EDAD"));
    }

    Ok(builder.build()?)
}

fn print_summary(report: &vial_processing::CleaningReport) {
    println!("Cleaning summary");
    println!(
        "  rows: {} -> {} ({} duplicates, {} missing key fields)",
        report.rows_before,
        report.rows_after,
        report.duplicates_removed,
        report.rows_dropped_for_keys
    );
    println!(
        "  columns: {} -> {}",
        report.columns_before, report.columns_after
    );

    for dropped in &report.dropped_columns {
        println!(
            "  dropped '{}' ({:.0}% missing)",
            dropped.name,
            dropped.missing_fraction * 100.0
        );
    }
    for imputation in &report.imputations {
        println!(
            "  imputed '{}' with {}: {} ({} cells)",
            imputation.column,
            imputation.method.display_name(),
            imputation.fill_value,
            imputation.cells_filled
        );
    }
    for mapped in &report.mapped_columns {
        println!("  mapped '{}' onto {{0, 1}}", mapped);
    }
    for derived in &report.derived_columns {
        println!("  derived '{}'", derived);
    }
    if !report.missing_schema_columns.is_empty() {
        println!(
            "  configured but absent: {}",
            report.missing_schema_columns.join(", ")
        );
    }
    for warning in &report.warnings {
        println!("  warning: {}", warning);
    }
}

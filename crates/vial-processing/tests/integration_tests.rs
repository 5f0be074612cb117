//! Integration tests for the cleaning pipeline.
//!
//! These tests verify end-to-end behavior of the pipeline using fixture
//! datasets and inline frames.

use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use vial_processing::{
    CleaningOutcome, ColumnSpec, DiscretizeSpec, ImputationMethod, Pipeline, PipelineConfig,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_csv(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path))
        .expect("Failed to create CSV reader")
        .finish()
        .expect("Failed to read CSV file")
}

fn run_seguridad(df: DataFrame) -> CleaningOutcome {
    Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .build()
        .unwrap()
        .process(df)
        .expect("Pipeline should complete successfully")
}

// ============================================================================
// Full Pipeline Tests with the Seguridad Vial Sample
// ============================================================================

#[test]
fn test_full_pipeline_seguridad_subset() {
    let outcome = run_seguridad(load_csv("seguridad_subset.csv"));

    // 12 rows: 2 exact duplicates, then 2 rows missing a key field
    assert_eq!(outcome.report.rows_before, 12);
    assert_eq!(outcome.report.duplicates_removed, 2);
    assert_eq!(outcome.report.rows_dropped_for_keys, 2);
    assert_eq!(outcome.report.rows_after, 8);
    assert_eq!(outcome.data.height(), 8);

    // OBSERVACIONES is 80% missing after deduplication
    assert_eq!(outcome.report.dropped_columns.len(), 1);
    assert_eq!(outcome.report.dropped_columns[0].name, "OBSERVACIONES");
    assert_eq!(outcome.report.columns_after, 7);
}

#[test]
fn test_full_pipeline_imputations() {
    let outcome = run_seguridad(load_csv("seguridad_subset.csv"));

    // CIUDAD has a tie between GUADALAJARA and ZAPOPAN (3 each); the mode
    // tie-break picks the smaller value
    let ciudad = outcome.report.imputation_for("CIUDAD").unwrap();
    assert_eq!(ciudad.method, ImputationMethod::Mode);
    assert_eq!(ciudad.fill_value, "GUADALAJARA");
    assert_eq!(ciudad.cells_filled, 1);

    // MODELO mean over the surviving rows is exactly 2017
    let modelo = outcome.report.imputation_for("MODELO").unwrap();
    assert_eq!(modelo.method, ImputationMethod::MeanRounded);
    assert_eq!(modelo.fill_value, "2017");

    // Binary flags zero-filled
    let alcohol = outcome.report.imputation_for("ALCOHOL").unwrap();
    assert_eq!(alcohol.method, ImputationMethod::Zero);
    assert_eq!(alcohol.cells_filled, 2);
    let ambulancia = outcome.report.imputation_for("AMBULANCIA").unwrap();
    assert_eq!(ambulancia.cells_filled, 1);
}

#[test]
fn test_full_pipeline_no_nulls_remain() {
    let outcome = run_seguridad(load_csv("seguridad_subset.csv"));
    let spec = ColumnSpec::seguridad_vial();

    let present = |name: &str| {
        outcome
            .data
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == name)
    };

    for col in spec
        .categorical_columns
        .iter()
        .chain(spec.numeric_columns.iter())
        .chain(spec.binary_columns.iter())
        .chain(spec.key_columns.iter())
    {
        if present(col) {
            assert_eq!(
                outcome.data.column(col).unwrap().null_count(),
                0,
                "column '{}' still has missing values",
                col
            );
        }
    }
}

#[test]
fn test_full_pipeline_flags_are_integer() {
    let outcome = run_seguridad(load_csv("seguridad_subset.csv"));

    for col in ["ALCOHOL", "AMBULANCIA"] {
        assert!(
            matches!(outcome.data.column(col).unwrap().dtype(), DataType::Int64),
            "flag column '{}' should be integer",
            col
        );
    }
}

#[test]
fn test_full_pipeline_absent_schema_columns_reported() {
    let outcome = run_seguridad(load_csv("seguridad_subset.csv"));

    // The reference schema names 18 flags; the sample only carries two
    assert!(
        outcome
            .report
            .missing_schema_columns
            .contains(&"MOTOCICLETA".to_string())
    );
    assert!(
        outcome
            .report
            .missing_schema_columns
            .contains(&"COLONIA".to_string())
    );
    assert!(
        !outcome
            .report
            .missing_schema_columns
            .contains(&"ALCOHOL".to_string())
    );
}

#[test]
fn test_pipeline_idempotent_on_fixture() {
    let pipeline = Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .build()
        .unwrap();

    let first = pipeline.process(load_csv("seguridad_subset.csv")).unwrap();
    let second = pipeline.process(load_csv("seguridad_subset.csv")).unwrap();

    assert_eq!(first.report, second.report);
    assert!(first.data.equals_missing(&second.data));
}

#[test]
fn test_pipeline_no_nulls_dataset_is_untouched() {
    let outcome = run_seguridad(load_csv("no_nulls.csv"));

    assert_eq!(outcome.report.duplicates_removed, 0);
    assert_eq!(outcome.report.rows_dropped_for_keys, 0);
    assert!(outcome.report.dropped_columns.is_empty());
    assert!(outcome.report.imputations.is_empty());
    assert_eq!(outcome.data.height(), 4);
}

// ============================================================================
// Spec Scenario Tests
// ============================================================================

#[test]
fn test_scenario_duplicate_removal() {
    // two duplicated pairs among 10 rows
    let df = df![
        "EDAD LESIONADO" => [25, 25, 40, 19, 55, 47, 62, 30, 30, 21],
        "GENERO LESIONADO" => ["M", "M", "F", "F", "M", "F", "M", "F", "F", "M"],
    ]
    .unwrap();

    let outcome = run_seguridad(df);

    assert_eq!(outcome.data.height(), 8);
    assert_eq!(outcome.report.duplicates_removed, 2);
}

#[test]
fn test_scenario_high_missing_column_dropped() {
    // OBSERVACIONES is 60% missing and not a key column
    let df = df![
        "EDAD LESIONADO" => [25, 40, 19, 55, 47],
        "GENERO LESIONADO" => ["M", "F", "F", "M", "F"],
        "OBSERVACIONES" => [Some("x"), None, None, Some("y"), None],
    ]
    .unwrap();

    let outcome = run_seguridad(df);

    assert!(
        outcome
            .report
            .dropped_columns
            .iter()
            .any(|c| c.name == "OBSERVACIONES")
    );
    assert!(
        !outcome
            .data
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == "OBSERVACIONES")
    );
}

#[test]
fn test_scenario_key_row_filtering() {
    // GENERO LESIONADO missing in 3 of 10 rows
    let df = df![
        "EDAD LESIONADO" => [25, 40, 19, 55, 47, 62, 30, 21, 33, 28],
        "GENERO LESIONADO" => [
            Some("M"), None, Some("F"), Some("M"), None,
            Some("M"), Some("F"), None, Some("M"), Some("F"),
        ],
    ]
    .unwrap();

    let outcome = run_seguridad(df);

    assert_eq!(outcome.data.height(), 7);
    assert_eq!(outcome.report.rows_dropped_for_keys, 3);
}

#[test]
fn test_scenario_yes_no_mapping() {
    let df = df![
        "EDAD LESIONADO" => [25, 40, 19],
        "GENERO LESIONADO" => ["M", "F", "F"],
        "FALLECIDO" => [Some("SI"), Some("NO"), None],
    ]
    .unwrap();

    let spec = ColumnSpec {
        key_columns: vec!["EDAD LESIONADO".into(), "GENERO LESIONADO".into()],
        yes_no_columns: vec!["FALLECIDO".into()],
        ..Default::default()
    };

    let outcome = Pipeline::builder()
        .schema(spec)
        .build()
        .unwrap()
        .process(df)
        .unwrap();

    let fallecido: Vec<Option<i64>> = outcome
        .data
        .column("FALLECIDO")
        .unwrap()
        .as_materialized_series()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(fallecido, vec![Some(1), Some(0), Some(0)]);
    assert_eq!(outcome.report.mapped_columns, vec!["FALLECIDO".to_string()]);
}

#[test]
fn test_scenario_no_key_columns_present() {
    let df = load_csv("sin_claves.csv");
    let rows = df.height();

    let outcome = run_seguridad(df);

    // Row count unchanged, warning flag set, never an error
    assert_eq!(outcome.data.height(), rows);
    assert!(outcome.report.key_filter_skipped);
    assert_eq!(outcome.report.rows_dropped_for_keys, 0);
    assert!(!outcome.report.warnings.is_empty());
}

// ============================================================================
// Derived Feature Tests
// ============================================================================

#[test]
fn test_normalization_bounds_on_fixture() {
    let config = PipelineConfig::builder()
        .normalize("EDAD LESIONADO", "EDAD NORMALIZADA")
        .build()
        .unwrap();
    let outcome = Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .config(config)
        .build()
        .unwrap()
        .process(load_csv("seguridad_subset.csv"))
        .unwrap();

    let norm = outcome.data.column("EDAD NORMALIZADA").unwrap();
    let values: Vec<f64> = norm
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert!(min.abs() < 1e-9, "observed minimum should map to 0.0");
    assert!((max - 1.0).abs() < 1e-9, "observed maximum should map to 1.0");
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_discretization_covers_every_row() {
    let config = PipelineConfig::builder()
        .discretize(DiscretizeSpec::age_groups("EDAD LESIONADO", "GRUPO EDAD"))
        .build()
        .unwrap();
    let outcome = Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .config(config)
        .build()
        .unwrap()
        .process(load_csv("seguridad_subset.csv"))
        .unwrap();

    let groups = outcome.data.column("GRUPO EDAD").unwrap();
    assert_eq!(groups.null_count(), 0);
    assert_eq!(groups.len(), outcome.data.height());

    let spec = DiscretizeSpec::age_groups("EDAD LESIONADO", "GRUPO EDAD");
    for value in groups.as_materialized_series().str().unwrap().into_iter() {
        let label = value.unwrap().to_string();
        assert!(
            spec.labels.contains(&label) || label == spec.unclassified_label,
            "unexpected label {}",
            label
        );
    }
}

// ============================================================================
// Shape and Configuration Tests
// ============================================================================

#[test]
fn test_clean_table_never_larger_than_input() {
    for fixture in ["seguridad_subset.csv", "no_nulls.csv", "sin_claves.csv"] {
        let df = load_csv(fixture);
        let (rows, cols) = (df.height(), df.width());

        let outcome = run_seguridad(df);

        assert!(outcome.data.height() <= rows, "{}", fixture);
        assert!(outcome.data.width() <= cols, "{}", fixture);
    }
}

#[test]
fn test_pipeline_with_strict_threshold() {
    // At a 0.0 threshold every column with any missing value is dropped,
    // except the preserved key columns
    let config = PipelineConfig::builder()
        .missing_column_threshold(0.0)
        .build()
        .unwrap();
    let outcome = Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .config(config)
        .build()
        .unwrap()
        .process(load_csv("seguridad_subset.csv"))
        .unwrap();

    let names = outcome.data.get_column_names();
    assert!(names.iter().any(|c| c.as_str() == "EDAD LESIONADO"));
    assert!(names.iter().any(|c| c.as_str() == "GENERO LESIONADO"));
    assert!(!names.iter().any(|c| c.as_str() == "CIUDAD"));
}

#[test]
fn test_pipeline_keep_duplicates_mode() {
    let config = PipelineConfig::builder()
        .remove_duplicates(false)
        .build()
        .unwrap();
    let outcome = Pipeline::builder()
        .schema(ColumnSpec::seguridad_vial())
        .config(config)
        .build()
        .unwrap()
        .process(load_csv("seguridad_subset.csv"))
        .unwrap();

    assert_eq!(outcome.report.duplicates_removed, 0);
    // Only the two key-filtered rows are gone
    assert_eq!(outcome.data.height(), 10);
}

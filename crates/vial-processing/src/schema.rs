//! Column-role schema for the cleaning pipeline.
//!
//! The pipeline never hardcodes column names; every column lookup goes
//! through a [`ColumnSpec`] supplied by the caller. Schemas are plain serde
//! data so they can be loaded from JSON files and substituted in tests.

use serde::{Deserialize, Serialize};

/// Column-role configuration for one dataset.
///
/// Each list names the columns a cleaning step applies to. A configured
/// column that is absent from the input is skipped and recorded in the
/// report, never an error.
///
/// # Example
///
/// ```rust,ignore
/// use vial_processing::ColumnSpec;
///
/// let spec = ColumnSpec {
///     key_columns: vec!["EDAD LESIONADO".into(), "GENERO LESIONADO".into()],
///     categorical_columns: vec!["CIUDAD".into()],
///     numeric_columns: vec!["EDAD LESIONADO".into()],
///     binary_columns: vec!["ALCOHOL".into()],
///     yes_no_columns: vec![],
/// };
/// spec.validate()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Columns whose missingness disqualifies a row from the cleaned table.
    #[serde(default)]
    pub key_columns: Vec<String>,

    /// Columns imputed with their most frequent value.
    #[serde(default)]
    pub categorical_columns: Vec<String>,

    /// Columns imputed with their mean, rounded to the nearest integer.
    /// Key columns listed here are skipped by imputation; key-row filtering
    /// already guarantees them non-missing.
    #[serde(default)]
    pub numeric_columns: Vec<String>,

    /// Flag columns imputed with 0 and cast to the integer domain {0, 1}.
    #[serde(default)]
    pub binary_columns: Vec<String>,

    /// Two-valued text columns mapped onto {0, 1} ("SI" -> 1, anything
    /// else -> 0) and cast to integer.
    #[serde(default)]
    pub yes_no_columns: Vec<String>,
}

impl ColumnSpec {
    /// The reference schema for the "Seguridad Vial" road-safety dataset.
    pub fn seguridad_vial() -> Self {
        Self {
            key_columns: to_owned(&["EDAD LESIONADO", "GENERO LESIONADO"]),
            categorical_columns: to_owned(&[
                "COLONIA",
                "TIPO VEHICULO",
                "COLOR",
                "NIVEL DAÑO VEHICULO",
                "PUNTO DE IMPACTO",
                "CIUDAD",
                "GENERO LESIONADO",
            ]),
            numeric_columns: to_owned(&["EDAD LESIONADO", "MODELO"]),
            binary_columns: to_owned(&[
                "AMBULANCIA",
                "ARBOL",
                "PIEDRA",
                "DORMIDO",
                "GRUA",
                "OBRA CIVIL",
                "PAVIMENTO MOJADO",
                "EXPLOSION LLANTA",
                "VOLCADURA",
                "PERDIDA TOTAL",
                "CONDUCTOR DISTRAIDO",
                "FUGA",
                "ALCOHOL",
                "MOTOCICLETA",
                "BICICLETA",
                "SEGURO",
                "TAXI",
                "ANIMAL",
            ]),
            yes_no_columns: Vec::new(),
        }
    }

    /// Validate the schema and return errors if invalid.
    ///
    /// A column may appear as both key and categorical/numeric (a key column
    /// still needs an imputation role for other rows), but the
    /// categorical/numeric/binary/yes-no roles are mutually exclusive.
    pub fn validate(&self) -> Result<(), SchemaValidationError> {
        let role_lists: [(&str, &[String]); 4] = [
            ("categorical", &self.categorical_columns),
            ("numeric", &self.numeric_columns),
            ("binary", &self.binary_columns),
            ("yes_no", &self.yes_no_columns),
        ];

        for (i, (role_a, cols_a)) in role_lists.iter().enumerate() {
            for (role_b, cols_b) in role_lists.iter().skip(i + 1) {
                if let Some(col) = cols_a.iter().find(|c| cols_b.contains(*c)) {
                    return Err(SchemaValidationError::ConflictingRoles {
                        column: col.clone(),
                        role_a: role_a.to_string(),
                        role_b: role_b.to_string(),
                    });
                }
            }
        }

        for (role, cols) in &role_lists {
            if let Some(col) = first_duplicate(cols) {
                return Err(SchemaValidationError::DuplicateColumn {
                    column: col,
                    role: role.to_string(),
                });
            }
        }
        if let Some(col) = first_duplicate(&self.key_columns) {
            return Err(SchemaValidationError::DuplicateColumn {
                column: col,
                role: "key".to_string(),
            });
        }

        Ok(())
    }

    /// True when no role list names any column.
    pub fn is_empty(&self) -> bool {
        self.key_columns.is_empty()
            && self.categorical_columns.is_empty()
            && self.numeric_columns.is_empty()
            && self.binary_columns.is_empty()
            && self.yes_no_columns.is_empty()
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn first_duplicate(cols: &[String]) -> Option<String> {
    let mut seen = std::collections::HashSet::new();
    cols.iter().find(|c| !seen.insert(c.as_str())).cloned()
}

/// Errors that can occur during schema validation.
#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Column '{column}' is listed under both '{role_a}' and '{role_b}' roles")]
    ConflictingRoles {
        column: String,
        role_a: String,
        role_b: String,
    },

    #[error("Column '{column}' is listed twice under the '{role}' role")]
    DuplicateColumn { column: String, role: String },
}

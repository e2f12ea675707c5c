use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the source tables or joining them.
///
/// None of these are recovered from: the first one aborts the run.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid CSV in {source_name} table")]
    Csv {
        source_name: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{source_name} table, line {line}: column '{column}' value '{value}' is not a number")]
    MalformedRow {
        source_name: &'static str,
        line: usize,
        column: String,
        value: String,
    },

    #[error("{source_name} table, line {line}: expected at least {expected} columns, found {found}")]
    ShortRow {
        source_name: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("absorption row for water type '{water_type}' at {wavelength} nm has no scattering row")]
    MissingScattering { water_type: String, wavelength: f64 },

    #[error("scattering row for water type '{water_type}' at {wavelength} nm has no absorption row")]
    MissingAbsorption { water_type: String, wavelength: f64 },

    #[error("attenuation table has no value for water type '{water_type}' at {wavelength} nm")]
    MissingAttenuation { water_type: String, wavelength: f64 },
}

impl TableError {
    /// Whether this error is a join-key mismatch between the source tables.
    pub fn is_missing_join_key(&self) -> bool {
        matches!(
            self,
            TableError::MissingScattering { .. }
                | TableError::MissingAbsorption { .. }
                | TableError::MissingAttenuation { .. }
        )
    }
}

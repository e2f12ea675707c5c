use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::TableError;
use super::model::{SpectralSamples, WaterTypeTable, Wavelength, WavelengthSample};
use crate::config::PipelineConfig;

const SCATTERING: &str = "scattering";
const ABSORPTION: &str = "absorption";
const ATTENUATION: &str = "attenuation";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the three source tables named in `config` and join them.
pub fn load_table(config: &PipelineConfig) -> Result<WaterTypeTable, TableError> {
    let scattering = read_coefficients(open(&config.scattering_path)?, SCATTERING)?;
    log::info!(
        "Read {} scattering rows from {}",
        scattering.len(),
        config.scattering_path.display()
    );

    let absorption = read_coefficients(open(&config.absorption_path)?, ABSORPTION)?;
    log::info!(
        "Read {} absorption rows from {}",
        absorption.len(),
        config.absorption_path.display()
    );

    let attenuation = read_attenuation(open(&config.attenuation_path)?)?;
    log::info!(
        "Read attenuation matrix ({} wavelengths x {} water types) from {}",
        attenuation.rows.len(),
        attenuation.water_types.len(),
        config.attenuation_path.display()
    );

    let table = build_table(&scattering, &absorption, &attenuation)?;
    log::info!("Joined {} water types", table.len());
    Ok(table)
}

fn open(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Coefficient tables (scattering / absorption)
// ---------------------------------------------------------------------------

/// One row of a long-format coefficient table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    pub water_type: String,
    pub wavelength: f64,
    pub value: f64,
}

/// CSV layout: header row, then `index, wavelength, coefficient, water_type`.
/// Columns are addressed by position; the header text is ignored.
pub fn read_coefficients<R: Read>(
    source: R,
    source_name: &'static str,
) -> Result<Vec<CoefficientRow>, TableError> {
    let mut reader = csv_reader(source);
    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| TableError::Csv { source_name, source })?;
        let line = row_no + 2;

        if record.len() < 4 {
            return Err(TableError::ShortRow {
                source_name,
                line,
                expected: 4,
                found: record.len(),
            });
        }

        rows.push(CoefficientRow {
            wavelength: parse_number(&record[1], source_name, line, "wavelength")?,
            value: parse_number(&record[2], source_name, line, "coefficient")?,
            water_type: record[3].to_string(),
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Attenuation matrix
// ---------------------------------------------------------------------------

/// Diffuse attenuation coefficients indexed by wavelength (rows) and water
/// type (columns). Empty cells are kept as `None`.
#[derive(Debug, Clone, Default)]
pub struct AttenuationMatrix {
    pub water_types: Vec<String>,
    pub rows: BTreeMap<Wavelength, Vec<Option<f64>>>,
}

impl AttenuationMatrix {
    /// `kd` for `water_type` at `wavelength`, if both keys exist and the cell
    /// is filled.
    pub fn get(&self, wavelength: f64, water_type: &str) -> Option<f64> {
        let column = self.water_types.iter().position(|w| w == water_type)?;
        self.rows
            .get(&Wavelength(wavelength))
            .and_then(|cells| cells.get(column).copied().flatten())
    }
}

/// CSV layout: header row `<index name>, <water type>, <water type>, ...`,
/// then one row per wavelength with the wavelength in the first column.
///
/// The index name may be left out of the header entirely. When the header
/// is exactly one cell shorter than the first data row, every header cell
/// names a water type.
pub fn read_attenuation<R: Read>(source: R) -> Result<AttenuationMatrix, TableError> {
    let mut reader = csv_reader(source);
    let header: Vec<String> = reader
        .headers()
        .map_err(|source| TableError::Csv { source_name: ATTENUATION, source })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TableError::Csv {
            source_name: ATTENUATION,
            source,
        })?;

    let water_types: Vec<String> = match records.first() {
        Some(first) if first.len() == header.len() + 1 => header,
        _ => header.into_iter().skip(1).collect(),
    };

    let mut rows = BTreeMap::new();

    for (row_no, record) in records.iter().enumerate() {
        let line = row_no + 2;

        let wavelength = match record.get(0) {
            Some(cell) => parse_number(cell, ATTENUATION, line, "wavelength")?,
            None => continue,
        };

        let cells = water_types
            .iter()
            .enumerate()
            .map(|(col, water_type)| match record.get(col + 1).map(str::trim) {
                None | Some("") => Ok(None),
                Some(cell) => parse_number(cell, ATTENUATION, line, water_type).map(Some),
            })
            .collect::<Result<Vec<_>, _>>()?;

        rows.insert(Wavelength(wavelength), cells);
    }

    Ok(AttenuationMatrix { water_types, rows })
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// Scattering plus, once its absorption row has been seen, extinction.
#[derive(Debug, Clone, Copy)]
struct PartialSample {
    sigma_s: f64,
    sigma_t: Option<f64>,
}

/// Join the three tables on (water type, wavelength).
///
/// Scattering rows define the key set. Every scattering key needs exactly
/// one absorption row and one attenuation cell; any absorption row without
/// a scattering row is rejected as well.
pub fn build_table(
    scattering: &[CoefficientRow],
    absorption: &[CoefficientRow],
    attenuation: &AttenuationMatrix,
) -> Result<WaterTypeTable, TableError> {
    let mut partial: BTreeMap<String, BTreeMap<Wavelength, PartialSample>> = BTreeMap::new();

    for row in scattering {
        let sample = PartialSample {
            sigma_s: row.value,
            sigma_t: None,
        };
        match partial.get_mut(&row.water_type) {
            Some(samples) => {
                samples.insert(Wavelength(row.wavelength), sample);
            }
            None => {
                let mut samples = BTreeMap::new();
                samples.insert(Wavelength(row.wavelength), sample);
                partial.insert(row.water_type.clone(), samples);
            }
        }
    }

    for row in absorption {
        let sample = partial
            .get_mut(&row.water_type)
            .and_then(|samples| samples.get_mut(&Wavelength(row.wavelength)))
            .ok_or_else(|| TableError::MissingScattering {
                water_type: row.water_type.clone(),
                wavelength: row.wavelength,
            })?;
        sample.sigma_t = Some(sample.sigma_s + row.value);
    }

    let mut table = WaterTypeTable::default();

    for (water_type, samples) in partial {
        let mut joined = SpectralSamples::new();
        for (wavelength, sample) in samples {
            let sigma_t = sample.sigma_t.ok_or_else(|| TableError::MissingAbsorption {
                water_type: water_type.clone(),
                wavelength: wavelength.0,
            })?;
            let kd = attenuation.get(wavelength.0, &water_type).ok_or_else(|| {
                TableError::MissingAttenuation {
                    water_type: water_type.clone(),
                    wavelength: wavelength.0,
                }
            })?;
            joined.insert(
                wavelength,
                WavelengthSample {
                    sigma_s: sample.sigma_s,
                    sigma_t,
                    kd,
                },
            );
        }
        table.water_types.insert(water_type, joined);
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source)
}

fn parse_number(
    cell: &str,
    source_name: &'static str,
    line: usize,
    column: &str,
) -> Result<f64, TableError> {
    cell.trim()
        .parse::<f64>()
        .map_err(|_| TableError::MalformedRow {
            source_name,
            line,
            column: column.to_string(),
            value: cell.to_string(),
        })
}

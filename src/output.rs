use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::data::model::{WaterTypeTable, Wavelength, WavelengthSample};

/// The consolidated lookup table as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterPropsDocument {
    /// Water type → one sample per entry of `wavelengths`, same order.
    pub jerlov_water_props: BTreeMap<String, Vec<WavelengthSample>>,
    pub wavelengths: Vec<f64>,
}

impl WaterPropsDocument {
    /// Flatten a gap-filled table along `wavelengths`.
    ///
    /// Fails if any water type lacks a sample at one of the wavelengths,
    /// i.e. if the table was not filled first.
    pub fn assemble(table: &WaterTypeTable, wavelengths: &[f64]) -> Result<Self> {
        let mut jerlov_water_props = BTreeMap::new();

        for (water_type, samples) in &table.water_types {
            let row = wavelengths
                .iter()
                .map(|&wl| {
                    samples.get(&Wavelength(wl)).copied().with_context(|| {
                        format!("water type '{water_type}' has no sample at {wl} nm")
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            jerlov_water_props.insert(water_type.clone(), row);
        }

        Ok(Self {
            jerlov_water_props,
            wavelengths: wavelengths.to_vec(),
        })
    }

    /// Pretty-printed JSON with 4-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).context("serializing water properties")?;
        Ok(buf)
    }

    /// Write the document to `path`, replacing it only once fully written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            bail!("output directory {} does not exist", dir.display());
        }

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temporary file in {}", dir.display()))?;
        tmp.write_all(&json).context("writing temporary output")?;
        tmp.persist(path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

use std::path::PathBuf;

/// Locations of the three source tables and of the generated lookup table.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Scattering coefficients: `index, wavelength, b, water_type`.
    pub scattering_path: PathBuf,
    /// Absorption coefficients: `index, wavelength, a, water_type`.
    pub absorption_path: PathBuf,
    /// Diffuse attenuation matrix: wavelength rows, one column per water type.
    pub attenuation_path: PathBuf,
    /// Consolidated JSON output.
    pub output_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scattering_path: PathBuf::from("b.csv"),
            absorption_path: PathBuf::from("a.csv"),
            attenuation_path: PathBuf::from("kd.csv"),
            output_path: PathBuf::from("data.json"),
        }
    }
}

#[cfg(test)]
impl PipelineConfig {
    /// Same file names as [`Default`], resolved inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            scattering_path: dir.join(defaults.scattering_path),
            absorption_path: dir.join(defaults.absorption_path),
            attenuation_path: dir.join(defaults.attenuation_path),
            output_path: dir.join(defaults.output_path),
        }
    }
}

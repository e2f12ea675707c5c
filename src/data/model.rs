use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Reference wavelength axis
// ---------------------------------------------------------------------------

/// Wavelengths (nm) every water type must cover in the output, in output order.
pub const REFERENCE_WAVELENGTHS: [f64; 10] = [
    412.0, 440.0, 488.0, 510.0, 532.0, 555.0, 630.0, 650.0, 676.0, 715.0,
];

// ---------------------------------------------------------------------------
// Wavelength – an orderable map key
// ---------------------------------------------------------------------------

/// A wavelength in nanometres, usable as a `BTreeMap` key.
///
/// Values are compared exactly, the same way they were parsed from the
/// sources, so `440` in one table matches `440.0` in another.
#[derive(Debug, Clone, Copy)]
pub struct Wavelength(pub f64);

// -- Manual Eq/Ord so Wavelength can key a BTreeMap --

impl PartialEq for Wavelength {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Wavelength {}

impl PartialOrd for Wavelength {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Wavelength {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Wavelength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} nm", self.0)
    }
}

impl From<f64> for Wavelength {
    fn from(nm: f64) -> Self {
        Wavelength(nm)
    }
}

// ---------------------------------------------------------------------------
// WavelengthSample – joined optical properties at one wavelength
// ---------------------------------------------------------------------------

/// Optical properties of one water type at one wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WavelengthSample {
    /// Scattering coefficient [m^-1].
    pub sigma_s: f64,
    /// Extinction coefficient, scattering + absorption [m^-1].
    pub sigma_t: f64,
    /// Diffuse attenuation coefficient [m^-1].
    pub kd: f64,
}

impl WavelengthSample {
    /// Linear interpolation towards `next`, each field on its own.
    ///
    /// `fract = 0` yields `self`, `fract = 1` yields `next`.
    pub fn lerp(&self, next: &WavelengthSample, fract: f64) -> WavelengthSample {
        fn mix(a: f64, b: f64, t: f64) -> f64 {
            a + t * (b - a)
        }
        WavelengthSample {
            sigma_s: mix(self.sigma_s, next.sigma_s, fract),
            sigma_t: mix(self.sigma_t, next.sigma_t, fract),
            kd: mix(self.kd, next.kd, fract),
        }
    }
}

// ---------------------------------------------------------------------------
// WaterTypeTable – water type → wavelength → sample
// ---------------------------------------------------------------------------

/// Samples of a single water type keyed by wavelength.
pub type SpectralSamples = BTreeMap<Wavelength, WavelengthSample>;

/// The joined table: water type identifier → its samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterTypeTable {
    pub water_types: BTreeMap<String, SpectralSamples>,
}

impl WaterTypeTable {
    /// Number of water types.
    pub fn len(&self) -> usize {
        self.water_types.len()
    }

    /// Whether no water type has been loaded.
    pub fn is_empty(&self) -> bool {
        self.water_types.is_empty()
    }
}

/// Data layer: core types, loading/joining, and gap filling.
///
/// Architecture:
/// ```text
///  b.csv (scattering)   a.csv (absorption)   kd.csv (attenuation)
///        │                    │                     │
///        └────────────┬───────┴─────────────────────┘
///                     ▼
///              ┌──────────┐
///              │  loader   │  parse + join on (water type, wavelength)
///              └──────────┘
///                     │
///                     ▼
///             ┌────────────────┐
///             │ WaterTypeTable  │  water type → wavelength → sample
///             └────────────────┘
///                     │
///                     ▼
///              ┌──────────┐
///              │   fill    │  copy / interpolate up to the reference axis
///              └──────────┘
/// ```

pub mod error;
pub mod fill;
pub mod loader;
pub mod model;

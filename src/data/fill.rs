use super::model::{SpectralSamples, WaterTypeTable, Wavelength, WavelengthSample};

/// How a missing sample was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPolicy {
    /// Target lies below every observed wavelength: copy the first sample.
    BelowRange,
    /// Target lies above every observed wavelength: copy the last sample.
    AboveRange,
    /// Target lies between two observed wavelengths: interpolate linearly.
    Interior,
}

/// Give every water type a sample at each of `targets`.
///
/// Existing samples are never touched. Returns the number of synthesized
/// samples across all water types.
pub fn fill_missing(table: &mut WaterTypeTable, targets: &[f64]) -> usize {
    let mut filled = 0;
    for (water_type, samples) in table.water_types.iter_mut() {
        for (wavelength, policy) in fill_water_type(samples, targets) {
            log::debug!("{water_type}: synthesized {wavelength} ({policy:?})");
            filled += 1;
        }
    }
    filled
}

/// Fill the gaps of a single water type, reporting what was synthesized.
///
/// Interpolation only ever reads the samples that were observed before this
/// call, never ones synthesized during it.
pub fn fill_water_type(
    samples: &mut SpectralSamples,
    targets: &[f64],
) -> Vec<(Wavelength, FillPolicy)> {
    let observed: Vec<(f64, WavelengthSample)> =
        samples.iter().map(|(wl, sample)| (wl.0, *sample)).collect();

    let mut synthesized = Vec::new();
    let (Some(first), Some(last)) = (observed.first(), observed.last()) else {
        return synthesized;
    };

    for &target in targets {
        let key = Wavelength(target);
        if samples.contains_key(&key) {
            continue;
        }

        let index = observed.partition_point(|(wl, _)| *wl < target);
        let (sample, policy) = if index == 0 {
            (first.1, FillPolicy::BelowRange)
        } else if index == observed.len() {
            (last.1, FillPolicy::AboveRange)
        } else {
            let (prev_wl, prev) = observed[index - 1];
            let (next_wl, next) = observed[index];
            let fract = (target - prev_wl) / (next_wl - prev_wl);
            (prev.lerp(&next, fract), FillPolicy::Interior)
        };

        samples.insert(key, sample);
        synthesized.push((key, policy));
    }

    synthesized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::REFERENCE_WAVELENGTHS;

    fn sample(sigma_s: f64, sigma_t: f64, kd: f64) -> WavelengthSample {
        WavelengthSample { sigma_s, sigma_t, kd }
    }

    fn samples(points: &[(f64, WavelengthSample)]) -> SpectralSamples {
        points.iter().map(|&(wl, s)| (Wavelength(wl), s)).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn interpolates_between_neighbours() {
        let mut observed = samples(&[
            (440.0, sample(0.0, 0.00663, 0.0166)),
            (488.0, sample(0.0, 0.00473, 0.0135)),
        ]);
        let report = fill_water_type(&mut observed, &[460.0]);
        assert_eq!(report, vec![(Wavelength(460.0), FillPolicy::Interior)]);

        let fract = (460.0 - 440.0) / (488.0 - 440.0);
        let filled = observed[&Wavelength(460.0)];
        assert_close(filled.sigma_s, 0.0);
        assert_close(filled.sigma_t, 0.00663 + fract * (0.00473 - 0.00663));
        assert_close(filled.kd, 0.0166 + fract * (0.0135 - 0.0166));
        assert!((filled.sigma_t - 0.005838).abs() < 1e-6);
        assert!((filled.kd - 0.015308).abs() < 1e-6);
    }

    #[test]
    fn copies_boundary_samples_outside_observed_range() {
        let low = sample(0.1, 0.2, 0.3);
        let high = sample(0.4, 0.5, 0.6);
        let mut observed = samples(&[(488.0, low), (630.0, high)]);

        let report = fill_water_type(&mut observed, &[412.0, 715.0]);
        assert_eq!(
            report,
            vec![
                (Wavelength(412.0), FillPolicy::BelowRange),
                (Wavelength(715.0), FillPolicy::AboveRange),
            ]
        );
        assert_eq!(observed[&Wavelength(412.0)], low);
        assert_eq!(observed[&Wavelength(715.0)], high);
    }

    #[test]
    fn existing_samples_are_left_alone() {
        let original = samples(&[
            (412.0, sample(0.1, 0.2, 0.3)),
            (555.0, sample(0.2, 0.4, 0.6)),
            (715.0, sample(0.3, 0.9, 0.1)),
        ]);
        let mut observed = original.clone();
        fill_missing_single(&mut observed);

        for (wl, s) in &original {
            assert_eq!(observed[wl], *s);
        }
        assert_eq!(observed.len(), REFERENCE_WAVELENGTHS.len());
    }

    #[test]
    fn interpolation_ignores_synthesized_samples() {
        // 440 and 488 both fall between 412 and 715; 488 must be
        // interpolated from the observed pair, not from the new 440 sample.
        let mut observed = samples(&[
            (412.0, sample(0.0, 0.0, 0.0)),
            (715.0, sample(303.0, 303.0, 303.0)),
        ]);
        fill_water_type(&mut observed, &[440.0, 488.0]);
        assert_close(observed[&Wavelength(440.0)].kd, 28.0);
        assert_close(observed[&Wavelength(488.0)].kd, 76.0);
    }

    #[test]
    fn interior_values_stay_within_their_bounds() {
        let a = sample(0.02, 0.5, 0.9);
        let b = sample(0.08, 0.1, 0.3);
        let mut observed = samples(&[(412.0, a), (715.0, b)]);
        fill_missing_single(&mut observed);

        for s in observed.values() {
            assert!(s.sigma_s >= 0.02 && s.sigma_s <= 0.08);
            assert!(s.sigma_t >= 0.1 && s.sigma_t <= 0.5);
            assert!(s.kd >= 0.3 && s.kd <= 0.9);
        }
    }

    #[test]
    fn single_sample_is_copied_everywhere() {
        let only = sample(0.1, 0.2, 0.3);
        let mut observed = samples(&[(532.0, only)]);
        let report = fill_missing_single(&mut observed);

        assert_eq!(report.len(), REFERENCE_WAVELENGTHS.len() - 1);
        assert!(report.iter().all(|(_, p)| *p != FillPolicy::Interior));
        assert!(observed.values().all(|s| *s == only));
    }

    #[test]
    fn empty_water_type_is_left_empty() {
        let mut observed = SpectralSamples::new();
        assert!(fill_missing_single(&mut observed).is_empty());
        assert!(observed.is_empty());
    }

    #[test]
    fn fill_missing_counts_all_water_types() {
        let mut table = WaterTypeTable::default();
        table
            .water_types
            .insert("I".to_string(), samples(&[(440.0, sample(0.0, 0.1, 0.2))]));
        table.water_types.insert(
            "II".to_string(),
            samples(&[
                (412.0, sample(0.0, 0.1, 0.2)),
                (715.0, sample(0.1, 0.2, 0.3)),
            ]),
        );

        let filled = fill_missing(&mut table, &REFERENCE_WAVELENGTHS);
        assert_eq!(filled, 9 + 8);
        assert!(table
            .water_types
            .values()
            .all(|s| s.len() == REFERENCE_WAVELENGTHS.len()));
    }

    fn fill_missing_single(samples: &mut SpectralSamples) -> Vec<(Wavelength, FillPolicy)> {
        fill_water_type(samples, &REFERENCE_WAVELENGTHS)
    }
}

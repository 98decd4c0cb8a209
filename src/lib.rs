mod builtin_tables;
mod calculator;
mod error;
mod measurement;
mod reference_data;

pub use calculator::{FieldTotals, PPM_TO_LBS_PER_ACRE, Recommendation, compute, compute_with};
pub use error::{FertilizerError, LookupKind, Result};
pub use measurement::MeasurementInput;
pub use reference_data::{CropProfile, ReferenceData, SoilAdjustment, SoilType};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn all_pairs() -> impl Iterator<Item = (&'static str, &'static str)> {
        let data = ReferenceData::builtin();
        data.crop_ids()
            .flat_map(move |crop| data.soil_ids().map(move |soil| (crop, soil)))
    }

    #[test]
    fn zero_levels_give_baseline_times_factor() {
        let data = ReferenceData::builtin();
        for (crop_id, soil_id) in all_pairs() {
            let rec = compute(&MeasurementInput::new(crop_id, soil_id)).unwrap();
            let crop = data.crop(crop_id).unwrap();
            let adj = data.soil_adjustment(soil_id).unwrap();
            let expected = crop.baseline().component_mul(&adj.factors());
            assert_abs_diff_eq!(rec.nitrogen_needed, expected.x, epsilon = 0.05);
            assert_abs_diff_eq!(rec.phosphorus_needed, expected.y, epsilon = 0.05);
            assert_abs_diff_eq!(rec.potassium_needed, expected.z, epsilon = 0.05);
        }
    }

    #[test]
    fn outputs_are_non_negative_and_total_matches() {
        let levels = [0.0, 250.0, 12_345.0, 60_000.0, 1e6];
        for (crop_id, soil_id) in all_pairs() {
            for &n in &levels {
                for &k in &levels {
                    let input = MeasurementInput::new(crop_id, soil_id).with_levels(n, n / 2.0, k);
                    let rec = compute(&input).unwrap();
                    assert!(rec.nitrogen_needed >= 0.0);
                    assert!(rec.phosphorus_needed >= 0.0);
                    assert!(rec.potassium_needed >= 0.0);
                    assert!(rec.total_fertilizer >= 0.0);
                    let sum = rec.nitrogen_needed + rec.phosphorus_needed + rec.potassium_needed;
                    assert_abs_diff_eq!(rec.total_fertilizer, sum, epsilon = 0.1 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn compute_is_idempotent() {
        let input = MeasurementInput::new("tomatoes", "chalky").with_levels(120.0, 33.0, 410.0);
        assert_eq!(compute(&input).unwrap(), compute(&input).unwrap());
    }

    #[test]
    fn concurrent_callers_share_builtin_data() {
        let handles: Vec<_> = all_pairs()
            .map(|(crop, soil)| {
                std::thread::spawn(move || compute(&MeasurementInput::new(crop, soil)))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().is_ok());
        }
    }

    #[test]
    fn recommendation_copies_reference_text() {
        let data = ReferenceData::builtin();
        let rec = compute(&MeasurementInput::new("rice", "sandy")).unwrap();
        let rice = data.crop("rice").unwrap();
        assert_eq!(rec.application_timing, rice.application_timing);
        assert_eq!(rec.additional_notes, rice.notes);
        assert_eq!(rec.soil_amendments, data.soil_amendments("sandy"));
        assert_eq!(rec.soil_type_label, "Sandy");
    }
}

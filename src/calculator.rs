use nalgebra::Vector3;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::measurement::{MeasurementInput, invalid_measurement};
use crate::reference_data::ReferenceData;

// Rough ppm -> lbs/acre conversion for a soil test sample. An approximation, not a soil model.
pub const PPM_TO_LBS_PER_ACRE: f64 = 0.002;

// Per-acre fertilizer recommendation for one crop on one soil type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub crop_name: String,
    pub soil_type_label: String, // Capitalized soil id, e.g. "Sandy"
    pub npk_ratio: String,
    pub nitrogen_needed: f64,   // [lbs/acre]
    pub phosphorus_needed: f64, // [lbs/acre]
    pub potassium_needed: f64,  // [lbs/acre]
    // N + P + K summed, not the weight of any real fertilizer product [lbs/acre]
    pub total_fertilizer: f64,
    pub application_timing: Vec<String>,
    pub additional_notes: Vec<String>,
    pub soil_amendments: Vec<String>,
    #[serde(skip)]
    needed_per_acre: Vector3<f64>, // Unrounded N-P-K [lbs/acre]
}

// Per-acre figures scaled up to a whole field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldTotals {
    pub area_acres: f64,
    pub nitrogen: f64,   // [lbs]
    pub phosphorus: f64, // [lbs]
    pub potassium: f64,  // [lbs]
    pub total: f64,      // [lbs]
}

impl Recommendation {
    /// Scales the unrounded per-acre amounts to a field of `area_acres`, then rounds.
    ///
    /// # Errors
    /// `InvalidMeasurement` if the area is not finite and strictly positive.
    pub fn field_totals(&self, area_acres: f64) -> Result<FieldTotals> {
        if !area_acres.is_finite() || area_acres <= 0.0 {
            return Err(invalid_measurement("area_acres", area_acres));
        }
        let field = self.needed_per_acre * area_acres;
        Ok(FieldTotals {
            area_acres,
            nitrogen: round_tenth(field.x),
            phosphorus: round_tenth(field.y),
            potassium: round_tenth(field.z),
            total: round_tenth(field.sum()),
        })
    }
}

/// Computes a recommendation against the built-in reference table.
pub fn compute(input: &MeasurementInput) -> Result<Recommendation> {
    compute_with(ReferenceData::builtin(), input)
}

/**
Computes a recommendation against the given reference table.

For each nutrient the measured level is converted to lbs/acre and subtracted from
the crop baseline. The remainder is scaled by the soil factor and clamped at zero,
so a rich soil can cancel a nutrient but never produce a negative amount. Each
figure, including the total, is rounded to one decimal independently.

# Errors
`InvalidMeasurement` if a level is negative or non-finite or the area is not
positive, `NotFound` if the crop or soil id is not in `data`.
*/
pub fn compute_with(data: &ReferenceData, input: &MeasurementInput) -> Result<Recommendation> {
    input.validate()?;
    let crop = data.crop(&input.crop_id)?;
    let adjustment = data.soil_adjustment(&input.soil_id)?;

    let current = input.measured_ppm() * PPM_TO_LBS_PER_ACRE;
    let needed = (crop.baseline() - current)
        .component_mul(&adjustment.factors())
        .map(|x| x.max(0.0));
    let total = needed.sum();

    let recommendation = Recommendation {
        crop_name: crop.name.clone(),
        soil_type_label: capitalize(&input.soil_id),
        npk_ratio: crop.npk_ratio.clone(),
        nitrogen_needed: round_tenth(needed.x),
        phosphorus_needed: round_tenth(needed.y),
        potassium_needed: round_tenth(needed.z),
        total_fertilizer: round_tenth(total),
        application_timing: crop.application_timing.clone(),
        additional_notes: crop.notes.clone(),
        soil_amendments: data.soil_amendments(&input.soil_id).to_vec(),
        needed_per_acre: needed,
    };
    debug!(
        crop = %input.crop_id,
        soil = %input.soil_id,
        n = recommendation.nitrogen_needed,
        p = recommendation.phosphorus_needed,
        k = recommendation.potassium_needed,
        total = recommendation.total_fertilizer,
        "computed recommendation"
    );
    Ok(recommendation)
}

// Rounds half away from zero, which matches round-half-up for the non-negative values here
pub(crate) fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

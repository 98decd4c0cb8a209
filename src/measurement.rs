use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FertilizerError, Result};

// Soil test results for one field, as submitted by the input form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    pub crop_id: String,
    pub soil_id: String,
    #[serde(default)]
    pub nitrogen_ppm: f64, // Measured soil nitrogen [ppm]
    #[serde(default)]
    pub phosphorus_ppm: f64, // Measured soil phosphorus [ppm]
    #[serde(default)]
    pub potassium_ppm: f64, // Measured soil potassium [ppm]
    #[serde(default = "default_area")]
    pub area_acres: f64, // Field size [acres], not used by the per-acre figures
}

fn default_area() -> f64 {
    1.0
}

impl MeasurementInput {
    // Zero nutrient levels on a one-acre field
    pub fn new(crop_id: impl Into<String>, soil_id: impl Into<String>) -> Self {
        MeasurementInput {
            crop_id: crop_id.into(),
            soil_id: soil_id.into(),
            nitrogen_ppm: 0.0,
            phosphorus_ppm: 0.0,
            potassium_ppm: 0.0,
            area_acres: default_area(),
        }
    }

    pub fn with_levels(
        mut self,
        nitrogen_ppm: f64,
        phosphorus_ppm: f64,
        potassium_ppm: f64,
    ) -> Self {
        self.nitrogen_ppm = nitrogen_ppm;
        self.phosphorus_ppm = phosphorus_ppm;
        self.potassium_ppm = potassium_ppm;
        self
    }

    pub fn with_area(mut self, area_acres: f64) -> Self {
        self.area_acres = area_acres;
        self
    }

    /**
    Builds an input from raw form field text.

    Blank or unparsable nutrient fields fall back to 0 and the area field to 1,
    the same way the form treats them. Zero area also falls back to 1. Negative
    numbers are kept as entered so that [`MeasurementInput::validate`] can reject
    them instead of silently clamping.
    */
    pub fn from_form(
        crop_id: &str,
        soil_id: &str,
        nitrogen: &str,
        phosphorus: &str,
        potassium: &str,
        area: &str,
    ) -> Self {
        MeasurementInput {
            crop_id: crop_id.trim().to_string(),
            soil_id: soil_id.trim().to_string(),
            nitrogen_ppm: parse_field(nitrogen, 0.0),
            phosphorus_ppm: parse_field(phosphorus, 0.0),
            potassium_ppm: parse_field(potassium, 0.0),
            area_acres: parse_field(area, default_area()),
        }
    }

    // Measured levels as an N-P-K vector [ppm]
    pub fn measured_ppm(&self) -> Vector3<f64> {
        Vector3::new(self.nitrogen_ppm, self.phosphorus_ppm, self.potassium_ppm)
    }

    /// Range checks on the numeric fields.
    ///
    /// Nutrient levels must be finite and non-negative, the area finite and
    /// strictly positive. Identifiers are checked against the reference tables
    /// by the calculator, not here.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("nitrogen_ppm", self.nitrogen_ppm),
            ("phosphorus_ppm", self.phosphorus_ppm),
            ("potassium_ppm", self.potassium_ppm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_measurement(field, value));
            }
        }
        if !self.area_acres.is_finite() || self.area_acres <= 0.0 {
            return Err(invalid_measurement("area_acres", self.area_acres));
        }
        Ok(())
    }
}

// Falsy results (blank, NaN, zero) take the default
fn parse_field(raw: &str, default: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => default,
    }
}

pub(crate) fn invalid_measurement(field: &'static str, value: f64) -> FertilizerError {
    warn!(field, value, "rejected measurement");
    FertilizerError::InvalidMeasurement { field, value }
}

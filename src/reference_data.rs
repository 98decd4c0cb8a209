use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::builtin_tables;
use crate::error::{FertilizerError, LookupKind, Result};

// Nutrient targets and advisory text for one crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    pub id: String,      // Lookup key like "corn"
    pub name: String,    // Display name like "Corn (Maize)"
    pub nitrogen: f64,   // Nitrogen baseline [lbs/acre]
    pub phosphorus: f64, // Phosphorus baseline [lbs/acre]
    pub potassium: f64,  // Potassium baseline [lbs/acre]
    pub npk_ratio: String,
    pub application_timing: Vec<String>, // Growth stages, in application order
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CropProfile {
    // Baselines as an N-P-K vector [lbs/acre]
    pub fn baseline(&self) -> Vector3<f64> {
        Vector3::new(self.nitrogen, self.phosphorus, self.potassium)
    }
}

// Per-nutrient multipliers describing how a soil holds or loses nutrients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilAdjustment {
    pub nitrogen_factor: f64,
    pub phosphorus_factor: f64,
    pub potassium_factor: f64,
}

impl SoilAdjustment {
    pub fn new(nitrogen_factor: f64, phosphorus_factor: f64, potassium_factor: f64) -> Self {
        SoilAdjustment {
            nitrogen_factor,
            phosphorus_factor,
            potassium_factor,
        }
    }

    pub fn factors(&self) -> Vector3<f64> {
        Vector3::new(
            self.nitrogen_factor,
            self.phosphorus_factor,
            self.potassium_factor,
        )
    }
}

// Soil table row: adjustment factors plus amendment advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilType {
    pub id: String, // Lowercase key like "sandy"
    pub nitrogen_factor: f64,
    pub phosphorus_factor: f64,
    pub potassium_factor: f64,
    #[serde(default)]
    pub amendments: Vec<String>,
}

impl SoilType {
    pub fn adjustment(&self) -> SoilAdjustment {
        SoilAdjustment::new(
            self.nitrogen_factor,
            self.phosphorus_factor,
            self.potassium_factor,
        )
    }
}

// Layout of a reference data TOML file: `[[crop]]` and `[[soil]]` arrays of tables
#[derive(Deserialize)]
struct ReferenceFile {
    #[serde(rename = "crop")]
    crops: Vec<CropProfile>,
    #[serde(rename = "soil")]
    soils: Vec<SoilType>,
}

static BUILTIN: LazyLock<ReferenceData> = LazyLock::new(|| ReferenceData {
    crops: builtin_tables::crops(),
    soils: builtin_tables::soils(),
});

/// Read-only crop and soil tables.
///
/// The built-in table is shared process-wide through [`ReferenceData::builtin`];
/// alternative tables can be loaded from TOML. Nothing here mutates after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    crops: Vec<CropProfile>,
    soils: Vec<SoilType>,
}

impl ReferenceData {
    /// The built-in table, initialized on first use.
    pub fn builtin() -> &'static ReferenceData {
        &BUILTIN
    }

    /// Build a table from rows, checking ids and values.
    pub fn new(crops: Vec<CropProfile>, soils: Vec<SoilType>) -> Result<Self> {
        let data = ReferenceData { crops, soils };
        data.validate()?;
        Ok(data)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ReferenceFile = toml::from_str(toml_str)?;
        Self::new(file.crops, file.soils)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let toml_str = fs::read_to_string(path)?;
        let data = Self::from_toml_str(&toml_str)?;
        info!(
            path = %path.display(),
            crops = data.crops.len(),
            soils = data.soils.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    pub fn crop(&self, crop_id: &str) -> Result<&CropProfile> {
        self.crops
            .iter()
            .find(|c| c.id == crop_id)
            .ok_or_else(|| not_found(LookupKind::Crop, crop_id))
    }

    pub fn soil(&self, soil_id: &str) -> Result<&SoilType> {
        self.soils
            .iter()
            .find(|s| s.id == soil_id)
            .ok_or_else(|| not_found(LookupKind::Soil, soil_id))
    }

    pub fn soil_adjustment(&self, soil_id: &str) -> Result<SoilAdjustment> {
        self.soil(soil_id).map(SoilType::adjustment)
    }

    // Advice is optional: unknown soils simply have none
    pub fn soil_amendments(&self, soil_id: &str) -> &[String] {
        self.soils
            .iter()
            .find(|s| s.id == soil_id)
            .map(|s| s.amendments.as_slice())
            .unwrap_or(&[])
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn soils(&self) -> &[SoilType] {
        &self.soils
    }

    pub fn crop_ids(&self) -> impl Iterator<Item = &str> {
        self.crops.iter().map(|c| c.id.as_str())
    }

    pub fn soil_ids(&self) -> impl Iterator<Item = &str> {
        self.soils.iter().map(|s| s.id.as_str())
    }

    fn validate(&self) -> Result<()> {
        if self.crops.is_empty() {
            return Err(invalid("no crops defined"));
        }
        if self.soils.is_empty() {
            return Err(invalid("no soil types defined"));
        }

        let mut seen = HashSet::new();
        for crop in &self.crops {
            check_id(&crop.id)?;
            if !seen.insert(crop.id.as_str()) {
                return Err(invalid(format!("duplicate crop '{}'", crop.id)));
            }
            for (nutrient, value) in [
                ("nitrogen", crop.nitrogen),
                ("phosphorus", crop.phosphorus),
                ("potassium", crop.potassium),
            ] {
                if !(value.is_finite() && value > 0.0) {
                    return Err(invalid(format!(
                        "crop '{}' has non-positive {} baseline {}",
                        crop.id, nutrient, value
                    )));
                }
            }
        }

        seen.clear();
        for soil in &self.soils {
            check_id(&soil.id)?;
            if !seen.insert(soil.id.as_str()) {
                return Err(invalid(format!("duplicate soil type '{}'", soil.id)));
            }
            if soil.adjustment().factors().iter().any(|f| !(f.is_finite() && *f > 0.0)) {
                return Err(invalid(format!(
                    "soil type '{}' has a non-positive adjustment factor",
                    soil.id
                )));
            }
        }
        Ok(())
    }
}

// Ids are lowercase ASCII starting with a letter so labels can capitalize the first byte
fn check_id(id: &str) -> Result<()> {
    let starts_with_letter = id.bytes().next().is_some_and(|b| b.is_ascii_lowercase());
    if !starts_with_letter || !id.bytes().all(|b| b.is_ascii_lowercase() || b == b'_') {
        return Err(invalid(format!(
            "identifier '{}' must be lowercase ASCII starting with a letter",
            id
        )));
    }
    Ok(())
}

fn invalid(msg: impl Into<String>) -> FertilizerError {
    FertilizerError::InvalidReferenceData(msg.into())
}

fn not_found(kind: LookupKind, id: &str) -> FertilizerError {
    warn!(%kind, id, "reference lookup failed");
    FertilizerError::NotFound {
        kind,
        id: id.to_string(),
    }
}

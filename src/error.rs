use std::fmt;

use thiserror::Error;

// Which reference table a failed lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Crop,
    Soil,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Crop => write!(f, "crop"),
            LookupKind::Soil => write!(f, "soil type"),
        }
    }
}

/// Errors raised by the reference data store and the calculator.
#[derive(Error, Debug)]
pub enum FertilizerError {
    #[error("Unknown {kind} '{id}'")]
    NotFound { kind: LookupKind, id: String },

    #[error("Invalid measurement for {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },

    #[error("Invalid reference data: {0}")]
    InvalidReferenceData(String),

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
}

impl FertilizerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FertilizerError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, FertilizerError>;

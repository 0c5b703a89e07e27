//! Error types for the Moody reduction

use crate::geometry::Line;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoodyError {
    // Plate configuration errors
    #[error("Invalid plate dimension {name}: {value} (must be a positive, finite number of inches)")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Plate is too small for the reflector foot spacing: {axis} yields {stations} station(s), need at least 2")]
    PlateTooSmall { axis: &'static str, stations: usize },

    // Reading errors
    #[error("Cardinality mismatch on {line}: expected {expected} readings, got {actual}")]
    CardinalityMismatch {
        line: Line,
        expected: usize,
        actual: usize,
    },

    #[error("No readings supplied for {line}")]
    EmptyReadings { line: Line },

    #[error("Invalid reading {value} at position {index} on {line}")]
    InvalidReading { line: Line, index: usize, value: f64 },

    // Reduction errors
    #[error("Mid-station value of an empty sequence is undefined")]
    DegenerateMidpoint,

    #[error("Invalid uncertainty parameters: {reason}")]
    InvalidUncertainty { reason: String },

    // Survey file errors
    #[error("Invalid survey configuration for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MoodyError>;

//! Custom error types for ROI processing

use std::fmt;
use std::io;

use crate::stats::StatKind;

/// ROI-specific error types
#[derive(Debug)]
pub enum RoiError {
    /// Geometric parameter outside its valid range
    InvalidParameter(String),
    /// Array shape does not agree with the declared voxel dimensions
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// Voxel index outside the grid
    IndexOutOfRange {
        index: [usize; 3],
        dimensions: [usize; 3],
    },
    /// Unrecognized ROI type in a record
    UnknownType(String),
    /// Reduction requested over zero selected voxels
    EmptyInput(StatKind),
    /// I/O error
    IoError(io::Error),
    /// Malformed JSON document
    JsonError(String),
    /// Malformed configuration
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for RoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            RoiError::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected {:?}, got {:?}", expected, actual)
            }
            RoiError::IndexOutOfRange { index, dimensions } => {
                write!(f, "Voxel index {:?} out of range for dimensions {:?}", index, dimensions)
            }
            RoiError::UnknownType(t) => write!(f, "ROI type \"{}\" not recognized", t),
            RoiError::EmptyInput(kind) => write!(f, "Cannot compute {} of an empty selection", kind),
            RoiError::IoError(e) => write!(f, "I/O error: {}", e),
            RoiError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            RoiError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RoiError::GenericError(msg) => write!(f, "ROI error: {}", msg),
        }
    }
}

impl std::error::Error for RoiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoiError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RoiError {
    fn from(error: io::Error) -> Self {
        RoiError::IoError(error)
    }
}

impl From<serde_json::Error> for RoiError {
    fn from(error: serde_json::Error) -> Self {
        RoiError::JsonError(error.to_string())
    }
}

impl From<String> for RoiError {
    fn from(msg: String) -> Self {
        RoiError::GenericError(msg)
    }
}

/// Result type for ROI operations
pub type RoiResult<T> = Result<T, RoiError>;

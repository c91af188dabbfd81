//! Voxel-center placement conventions
//!
//! A grid of `n` voxels spanning a field of view `fov` samples each voxel at
//! its center, `(index + 0.5) * fov / n`. The convention decides where the
//! world origin sits relative to those samples.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RoiError;

/// Where the world origin sits in a voxel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridConvention {
    /// Origin at the center of the volume:
    /// `world = (index + 0.5) * voxel_size - fov / 2`
    Centered,
    /// Origin at the outer corner of voxel (0, 0, 0):
    /// `world = (index + 0.5) * voxel_size`
    Corner,
}

/// Convention used unless a caller asks otherwise. ROI centers in stored
/// definitions are relative to the scene center, so grids are centered.
pub const DEFAULT_CONVENTION: GridConvention = GridConvention::Centered;

impl GridConvention {
    /// World offset subtracted from the corner-based position along one axis
    pub fn origin_offset(&self, field_of_view: f64) -> f64 {
        match self {
            GridConvention::Centered => field_of_view / 2.0,
            GridConvention::Corner => 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GridConvention::Centered => "centered",
            GridConvention::Corner => "corner",
        }
    }
}

impl Default for GridConvention {
    fn default() -> Self {
        DEFAULT_CONVENTION
    }
}

impl fmt::Display for GridConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GridConvention {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "centered" | "center" => Ok(GridConvention::Centered),
            "corner" => Ok(GridConvention::Corner),
            other => Err(RoiError::ConfigError(format!("unknown grid convention \"{}\"", other))),
        }
    }
}

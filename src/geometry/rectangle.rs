//! Rectangular (box) ROI

use super::bounds::WorldBounds;
use super::point::Point3;
use super::shape::{validate_lengths, Contains};
use crate::errors::RoiResult;

/// Axis-aligned box given by its center and full edge lengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    center: Point3,
    size: [f64; 3],
}

impl Rectangle {
    /// Create a new box
    ///
    /// # Arguments
    /// * `size` - Full edge length along (x, y, z), each strictly positive
    /// * `center` - Center in world coordinates
    pub fn new(size: [f64; 3], center: Point3) -> RoiResult<Self> {
        let size = validate_lengths("size", size)?;
        let center = Point3::from_slice(&center.to_array())?;
        Ok(Rectangle { center, size })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn size(&self) -> [f64; 3] {
        self.size
    }

    pub fn volume(&self) -> f64 {
        self.size.iter().product()
    }
}

impl Contains for Rectangle {
    fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|a| (point[a] - self.center[a]).abs() <= self.size[a] / 2.0)
    }

    fn bounds(&self) -> WorldBounds {
        WorldBounds::from_center(
            &self.center,
            [self.size[0] / 2.0, self.size[1] / 2.0, self.size[2] / 2.0],
        )
    }
}

//! Point structure for representing world coordinates

use crate::errors::{RoiError, RoiResult};

/// A point in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    /// The world origin, i.e. the center of a centered grid
    pub fn origin() -> Self {
        Point3::new(0.0, 0.0, 0.0)
    }

    /// Build a point from a slice that must hold exactly three finite values
    pub fn from_slice(coords: &[f64]) -> RoiResult<Self> {
        if coords.len() != 3 {
            return Err(RoiError::InvalidParameter(format!(
                "center must have exactly 3 coordinates, got {}",
                coords.len()
            )));
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(RoiError::InvalidParameter(format!(
                "center coordinates must be finite, got {:?}",
                coords
            )));
        }
        Ok(Point3::new(coords[0], coords[1], coords[2]))
    }

    /// Coordinates as an array in (x, y, z) order
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(coords: [f64; 3]) -> Self {
        Point3::new(coords[0], coords[1], coords[2])
    }
}

impl std::ops::Index<usize> for Point3 {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Point3 axis index {} out of range", axis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_three_coordinates() {
        assert!(Point3::from_slice(&[1.0, 2.0]).is_err());
        assert!(Point3::from_slice(&[1.0, 2.0, 3.0, 4.0]).is_err());
        assert_eq!(Point3::from_slice(&[1.0, 2.0, 3.0]).unwrap(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_slice_rejects_nan() {
        assert!(Point3::from_slice(&[f64::NAN, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_distance() {
        let a = Point3::new(1.0, 2.0, 2.0);
        assert_eq!(a.distance_to(&Point3::origin()), 3.0);
    }
}

//! Cylindrical ROI

use std::f64::consts::PI;

use super::axis::Axis;
use super::bounds::WorldBounds;
use super::point::Point3;
use super::shape::{validate_length, Contains};
use crate::errors::RoiResult;

/// Cylinder aligned to one of the coordinate axes
///
/// `height` is the full length along the axis, centered on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    center: Point3,
    radius: f64,
    height: f64,
    axis: Axis,
}

impl Cylinder {
    /// Create a new cylinder along the z axis
    ///
    /// # Arguments
    /// * `radius` - Radius of the circular cross-section, strictly positive
    /// * `height` - Full length along z, strictly positive
    /// * `center` - Center in world coordinates
    pub fn new(radius: f64, height: f64, center: Point3) -> RoiResult<Self> {
        Self::with_axis(radius, height, center, Axis::Z)
    }

    /// Create a new cylinder along the given axis
    pub fn with_axis(radius: f64, height: f64, center: Point3, axis: Axis) -> RoiResult<Self> {
        let radius = validate_length("radius", radius)?;
        let height = validate_length("height", height)?;
        let center = Point3::from_slice(&center.to_array())?;
        Ok(Cylinder { center, radius, height, axis })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn volume(&self) -> f64 {
        PI * self.radius * self.radius * self.height
    }
}

impl Contains for Cylinder {
    fn contains(&self, point: &Point3) -> bool {
        let [a, b] = self.axis.planar();
        let da = point[a] - self.center[a];
        let db = point[b] - self.center[b];
        let axial = point[self.axis.index()] - self.center[self.axis.index()];

        (da * da + db * db).sqrt() <= self.radius && axial.abs() <= self.height / 2.0
    }

    fn bounds(&self) -> WorldBounds {
        let mut half = [self.radius; 3];
        half[self.axis.index()] = self.height / 2.0;
        WorldBounds::from_center(&self.center, half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_dimensions() {
        assert!(Cylinder::new(0.0, 1.0, Point3::origin()).is_err());
        assert!(Cylinder::new(1.0, -1.0, Point3::origin()).is_err());
        assert!(Cylinder::new(1.0, 1.0, Point3::origin()).is_ok());
    }

    #[test]
    fn test_contains_along_z() {
        let cyl = Cylinder::new(2.0, 4.0, Point3::new(0.0, 0.0, 1.0)).unwrap();
        assert!(cyl.contains(&Point3::new(2.0, 0.0, 3.0)));
        assert!(cyl.contains(&Point3::new(0.0, -2.0, -1.0)));
        assert!(!cyl.contains(&Point3::new(0.0, 0.0, 3.01)));
        assert!(!cyl.contains(&Point3::new(1.5, 1.5, 1.0)));
    }

    #[test]
    fn test_contains_along_x() {
        let cyl = Cylinder::with_axis(1.0, 10.0, Point3::origin(), Axis::X).unwrap();
        assert!(cyl.contains(&Point3::new(4.9, 0.0, 1.0)));
        assert!(!cyl.contains(&Point3::new(0.0, 0.0, 4.0)));
        assert_eq!(cyl.bounds().size(), [10.0, 2.0, 2.0]);
    }
}

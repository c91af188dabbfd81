//! Spherical ROI

use std::f64::consts::PI;

use super::bounds::WorldBounds;
use super::point::Point3;
use super::shape::{validate_length, Contains};
use crate::errors::RoiResult;

/// Sphere defined by its center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere
    ///
    /// # Arguments
    /// * `radius` - Radius in world units, strictly positive
    /// * `center` - Center in world coordinates
    ///
    /// # Returns
    /// The sphere, or `InvalidParameter` if the radius or center is invalid
    pub fn new(radius: f64, center: Point3) -> RoiResult<Self> {
        let radius = validate_length("radius", radius)?;
        let center = Point3::from_slice(&center.to_array())?;
        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }
}

impl Contains for Sphere {
    fn contains(&self, point: &Point3) -> bool {
        point.distance_to(&self.center) <= self.radius
    }

    fn bounds(&self) -> WorldBounds {
        WorldBounds::from_center(&self.center, [self.radius; 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(Sphere::new(0.0, Point3::origin()).is_err());
        assert!(Sphere::new(-2.0, Point3::origin()).is_err());
        assert!(Sphere::new(1.0, Point3::new(f64::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_surface_is_inclusive() {
        let sphere = Sphere::new(1.0, Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(sphere.contains(&Point3::new(2.0, 1.0, 1.0)));
        assert!(sphere.contains(&Point3::new(1.0, 1.0, 0.0)));
        assert!(!sphere.contains(&Point3::new(2.0, 2.0, 1.0)));
    }

    #[test]
    fn test_equidistant_points_classified_identically() {
        let sphere = Sphere::new(5.0, Point3::new(1.0, -2.0, 3.0)).unwrap();
        let offsets = [(3.0, 4.0, 0.0), (5.0, 0.0, 0.0), (0.0, 3.0, 4.0), (4.0, 0.0, 3.0)];

        for scale in [0.5, 1.0, 1.5] {
            let expected = scale <= 1.0;
            for (dx, dy, dz) in offsets {
                for sign in [1.0, -1.0] {
                    let p = Point3::new(
                        1.0 + sign * dx * scale,
                        -2.0 + sign * dy * scale,
                        3.0 + sign * dz * scale,
                    );
                    assert_eq!(sphere.contains(&p), expected, "point {:?}", p);
                }
            }
        }
    }
}

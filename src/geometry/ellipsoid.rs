//! Ellipsoidal ROI

use std::f64::consts::PI;

use super::bounds::WorldBounds;
use super::point::Point3;
use super::shape::{validate_lengths, Contains};
use crate::errors::RoiResult;

/// Axis-aligned ellipsoid given by its center and semi-axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    center: Point3,
    radii: [f64; 3],
}

impl Ellipsoid {
    /// Create a new ellipsoid with semi-axes along (x, y, z)
    pub fn new(radii: [f64; 3], center: Point3) -> RoiResult<Self> {
        let radii = validate_lengths("radii", radii)?;
        let center = Point3::from_slice(&center.to_array())?;
        Ok(Ellipsoid { center, radii })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radii(&self) -> [f64; 3] {
        self.radii
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radii[0] * self.radii[1] * self.radii[2]
    }
}

impl Contains for Ellipsoid {
    fn contains(&self, point: &Point3) -> bool {
        let norm: f64 = (0..3)
            .map(|a| {
                let u = (point[a] - self.center[a]) / self.radii[a];
                u * u
            })
            .sum();
        norm <= 1.0
    }

    fn bounds(&self) -> WorldBounds {
        WorldBounds::from_center(&self.center, self.radii)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_on_semi_axes() {
        let ell = Ellipsoid::new([1.0, 2.0, 4.0], Point3::origin()).unwrap();
        assert!(ell.contains(&Point3::new(0.0, 0.0, 4.0)));
        assert!(ell.contains(&Point3::new(0.0, -2.0, 0.0)));
        assert!(!ell.contains(&Point3::new(1.0, 2.0, 0.0)));
    }

    #[test]
    fn test_equal_radii_match_sphere() {
        use super::super::sphere::Sphere;

        let ell = Ellipsoid::new([2.0; 3], Point3::origin()).unwrap();
        let sphere = Sphere::new(2.0, Point3::origin()).unwrap();
        for p in [
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(1.5, 1.5, 0.0),
            Point3::new(0.0, 0.5, 2.5),
        ] {
            assert_eq!(ell.contains(&p), sphere.contains(&p));
        }
    }
}

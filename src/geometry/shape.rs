//! The closed set of ROI shapes and their containment capability

use log::debug;

use super::bounds::WorldBounds;
use super::cylinder::Cylinder;
use super::ellipsoid::Ellipsoid;
use super::point::Point3;
use super::rectangle::Rectangle;
use super::sphere::Sphere;
use crate::errors::{RoiError, RoiResult};

/// Point-containment test in world coordinates
///
/// Every ROI shape implements this trait. Boundaries are inclusive:
/// a point exactly on the surface is inside.
pub trait Contains {
    /// Check if the shape contains a world point
    fn contains(&self, point: &Point3) -> bool;

    /// Axis-aligned world bounds enclosing the shape
    fn bounds(&self) -> WorldBounds;
}

/// A region of interest shape
///
/// All variants are axis-aligned and immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Cylinder(Cylinder),
    Rectangle(Rectangle),
    Ellipsoid(Ellipsoid),
}

impl Shape {
    /// Record tag naming the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Cylinder(_) => "cylinder",
            Shape::Rectangle(_) => "rectangle",
            Shape::Ellipsoid(_) => "ellipsoid",
        }
    }

    /// Center of the shape
    pub fn center(&self) -> Point3 {
        match self {
            Shape::Sphere(s) => s.center(),
            Shape::Cylinder(c) => c.center(),
            Shape::Rectangle(r) => r.center(),
            Shape::Ellipsoid(e) => e.center(),
        }
    }

    /// Analytic volume of the shape in world units
    pub fn volume(&self) -> f64 {
        match self {
            Shape::Sphere(s) => s.volume(),
            Shape::Cylinder(c) => c.volume(),
            Shape::Rectangle(r) => r.volume(),
            Shape::Ellipsoid(e) => e.volume(),
        }
    }
}

impl Contains for Shape {
    fn contains(&self, point: &Point3) -> bool {
        match self {
            Shape::Sphere(s) => s.contains(point),
            Shape::Cylinder(c) => c.contains(point),
            Shape::Rectangle(r) => r.contains(point),
            Shape::Ellipsoid(e) => e.contains(point),
        }
    }

    fn bounds(&self) -> WorldBounds {
        match self {
            Shape::Sphere(s) => s.bounds(),
            Shape::Cylinder(c) => c.bounds(),
            Shape::Rectangle(r) => r.bounds(),
            Shape::Ellipsoid(e) => e.bounds(),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(s: Sphere) -> Self {
        Shape::Sphere(s)
    }
}

impl From<Cylinder> for Shape {
    fn from(c: Cylinder) -> Self {
        Shape::Cylinder(c)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<Ellipsoid> for Shape {
    fn from(e: Ellipsoid) -> Self {
        Shape::Ellipsoid(e)
    }
}

/// Check that a length parameter is finite and strictly positive
pub(crate) fn validate_length(name: &str, value: f64) -> RoiResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        debug!("Rejecting {} = {}", name, value);
        return Err(RoiError::InvalidParameter(format!(
            "{} must be strictly positive, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Check every entry of a per-axis length parameter
pub(crate) fn validate_lengths(name: &str, values: [f64; 3]) -> RoiResult<[f64; 3]> {
    for value in values {
        validate_length(name, value)?;
    }
    Ok(values)
}

//! Geometry primitives for ROI definitions
//!
//! This module provides the world-space shapes an ROI can take and the
//! point-containment test each of them exposes. All shapes are
//! axis-aligned value types validated at construction.

mod axis;
mod bounds;
mod cylinder;
mod ellipsoid;
mod point;
mod rectangle;
mod shape;
mod sphere;

// Re-export key types
pub use self::axis::Axis;
pub use self::bounds::WorldBounds;
pub use self::cylinder::Cylinder;
pub use self::ellipsoid::Ellipsoid;
pub use self::point::Point3;
pub use self::rectangle::Rectangle;
pub use self::shape::{Contains, Shape};
pub use self::sphere::Sphere;

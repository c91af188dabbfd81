//! Axis-aligned bounding box in world coordinates

use super::point::Point3;

/// An axis-aligned box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimum corner
    pub min: Point3,
    /// Maximum corner
    pub max: Point3,
}

impl WorldBounds {
    /// Create new bounds from two corners
    pub fn new(min: Point3, max: Point3) -> Self {
        WorldBounds { min, max }
    }

    /// Bounds of a box centered on a point with the given half extents
    pub fn from_center(center: &Point3, half_extents: [f64; 3]) -> Self {
        WorldBounds::new(
            Point3::new(
                center.x - half_extents[0],
                center.y - half_extents[1],
                center.z - half_extents[2],
            ),
            Point3::new(
                center.x + half_extents[0],
                center.y + half_extents[1],
                center.z + half_extents[2],
            ),
        )
    }

    /// Extent along each axis
    pub fn size(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    /// Check if these bounds contain a point (inclusive)
    pub fn contains(&self, point: &Point3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
            point.y >= self.min.y && point.y <= self.max.y &&
            point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if two bounds overlap (touching counts)
    pub fn intersects(&self, other: &WorldBounds) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
            self.min.y <= other.max.y && self.max.y >= other.min.y &&
            self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Check if `other` lies entirely inside these bounds
    pub fn encloses(&self, other: &WorldBounds) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }
}

//! Voxel grid geometry and the voxel/world coordinate mapping

use crate::errors::{RoiError, RoiResult};
use crate::geometry::{Point3, WorldBounds};

use super::convention::{GridConvention, DEFAULT_CONVENTION};

/// Geometry of a voxel grid
///
/// Pairs the array shape (voxels per axis) with the physical extent the
/// grid covers. Two images with equal geometry share every ROI selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    voxel_dimensions: [usize; 3],
    field_of_view: [f64; 3],
    convention: GridConvention,
}

impl GridGeometry {
    /// Create a grid geometry using the default (centered) convention
    ///
    /// # Arguments
    /// * `voxel_dimensions` - Number of voxels along (x, y, z), each positive
    /// * `field_of_view` - Physical extent along (x, y, z), each positive
    ///
    /// # Returns
    /// The geometry, or `InvalidParameter` if any entry is not positive
    pub fn new(voxel_dimensions: [usize; 3], field_of_view: [f64; 3]) -> RoiResult<Self> {
        Self::with_convention(voxel_dimensions, field_of_view, DEFAULT_CONVENTION)
    }

    /// Create a grid geometry with an explicit voxel-center convention
    pub fn with_convention(voxel_dimensions: [usize; 3],
                           field_of_view: [f64; 3],
                           convention: GridConvention) -> RoiResult<Self> {
        if voxel_dimensions.iter().any(|&n| n == 0) {
            return Err(RoiError::InvalidParameter(format!(
                "voxel dimensions must be positive, got {:?}",
                voxel_dimensions
            )));
        }
        // Every flat index must fit in usize
        if voxel_dimensions.iter().try_fold(1usize, |total, &n| total.checked_mul(n)).is_none() {
            return Err(RoiError::InvalidParameter(format!(
                "voxel dimensions {:?} hold more voxels than can be indexed",
                voxel_dimensions
            )));
        }
        if field_of_view.iter().any(|&f| !f.is_finite() || f <= 0.0) {
            return Err(RoiError::InvalidParameter(format!(
                "field of view must be positive, got {:?}",
                field_of_view
            )));
        }

        Ok(GridGeometry {
            voxel_dimensions,
            field_of_view,
            convention,
        })
    }

    /// Build a geometry from slices, checking that each holds 3 entries
    pub fn from_slices(voxel_dimensions: &[usize], field_of_view: &[f64]) -> RoiResult<Self> {
        let dims: [usize; 3] = voxel_dimensions.try_into().map_err(|_| {
            RoiError::InvalidParameter(format!(
                "voxel dimensions must have 3 entries, got {}",
                voxel_dimensions.len()
            ))
        })?;
        let fov: [f64; 3] = field_of_view.try_into().map_err(|_| {
            RoiError::InvalidParameter(format!(
                "field of view must have 3 entries, got {}",
                field_of_view.len()
            ))
        })?;
        Self::new(dims, fov)
    }

    pub fn voxel_dimensions(&self) -> [usize; 3] {
        self.voxel_dimensions
    }

    pub fn field_of_view(&self) -> [f64; 3] {
        self.field_of_view
    }

    pub fn convention(&self) -> GridConvention {
        self.convention
    }

    /// Same grid, different voxel-center convention
    pub fn to_convention(&self, convention: GridConvention) -> Self {
        GridGeometry { convention, ..*self }
    }

    /// Physical size of one voxel along each axis
    pub fn voxel_size(&self) -> [f64; 3] {
        [
            self.field_of_view[0] / self.voxel_dimensions[0] as f64,
            self.field_of_view[1] / self.voxel_dimensions[1] as f64,
            self.field_of_view[2] / self.voxel_dimensions[2] as f64,
        ]
    }

    /// Physical volume of one voxel
    pub fn voxel_volume(&self) -> f64 {
        self.voxel_size().iter().product()
    }

    /// Total number of voxels in the grid
    pub fn total_voxels(&self) -> usize {
        self.voxel_dimensions.iter().product()
    }

    /// Check whether an index lies inside the grid
    pub fn in_bounds(&self, index: [usize; 3]) -> bool {
        (0..3).all(|a| index[a] < self.voxel_dimensions[a])
    }

    fn check_index(&self, index: [usize; 3]) -> RoiResult<()> {
        if self.in_bounds(index) {
            Ok(())
        } else {
            Err(RoiError::IndexOutOfRange {
                index,
                dimensions: self.voxel_dimensions,
            })
        }
    }

    /// World coordinate of a voxel center
    ///
    /// # Arguments
    /// * `i`, `j`, `k` - Voxel index along x, y and z
    ///
    /// # Returns
    /// The voxel center, or `IndexOutOfRange` outside the grid
    pub fn voxel_to_world(&self, i: usize, j: usize, k: usize) -> RoiResult<Point3> {
        self.check_index([i, j, k])?;
        Ok(self.voxel_center([i, j, k]))
    }

    /// World coordinate of a voxel center, without bounds checking
    pub(crate) fn voxel_center(&self, index: [usize; 3]) -> Point3 {
        let size = self.voxel_size();
        let coord = |a: usize| {
            (index[a] as f64 + 0.5) * size[a] - self.convention.origin_offset(self.field_of_view[a])
        };
        Point3::new(coord(0), coord(1), coord(2))
    }

    /// Voxel whose cell contains a world point
    ///
    /// Cells are half-open, `[lower, upper)`, so a point on a shared face maps
    /// to the voxel with the larger index.
    ///
    /// # Returns
    /// The voxel index, or None if the point lies outside the field of view
    pub fn world_to_voxel(&self, point: &Point3) -> Option<[usize; 3]> {
        let size = self.voxel_size();
        let mut index = [0usize; 3];

        for a in 0..3 {
            let offset = self.convention.origin_offset(self.field_of_view[a]);
            let continuous = ((point[a] + offset) / size[a]).floor();
            if !continuous.is_finite() || continuous < 0.0 || continuous >= self.voxel_dimensions[a] as f64 {
                return None;
            }
            index[a] = continuous as usize;
        }

        Some(index)
    }

    /// World-space extent covered by the grid
    pub fn bounds(&self) -> WorldBounds {
        let offset = |a: usize| self.convention.origin_offset(self.field_of_view[a]);
        WorldBounds::new(
            Point3::new(-offset(0), -offset(1), -offset(2)),
            Point3::new(
                self.field_of_view[0] - offset(0),
                self.field_of_view[1] - offset(1),
                self.field_of_view[2] - offset(2),
            ),
        )
    }

    /// Row-major position of a voxel (z varies fastest)
    pub fn flat_index(&self, i: usize, j: usize, k: usize) -> RoiResult<usize> {
        self.check_index([i, j, k])?;
        let [_, ny, nz] = self.voxel_dimensions;
        Ok((i * ny + j) * nz + k)
    }

    /// Inverse of `flat_index` for positions below `total_voxels()`
    pub(crate) fn unflatten(&self, flat: usize) -> [usize; 3] {
        let [_, ny, nz] = self.voxel_dimensions;
        [flat / (ny * nz), (flat / nz) % ny, flat % nz]
    }

    /// Iterate over every voxel index in row-major order
    pub fn indices(&self) -> VoxelIndices {
        VoxelIndices {
            geometry: *self,
            next: 0,
            total: self.total_voxels(),
        }
    }
}

/// Row-major iterator over the voxel indices of a grid
#[derive(Debug, Clone)]
pub struct VoxelIndices {
    geometry: GridGeometry,
    next: usize,
    total: usize,
}

impl Iterator for VoxelIndices {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let index = self.geometry.unflatten(self.next);
        self.next += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VoxelIndices {}

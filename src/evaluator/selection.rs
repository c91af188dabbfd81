//! The set of voxels inside an ROI for one grid geometry

use crate::errors::{RoiError, RoiResult};
use crate::grid::{GridGeometry, VolumeImage};
use crate::stats::{reduce, StatKind, StatSummary};

/// Voxels of a grid whose centers lie inside an ROI
///
/// A selection depends only on the shape and the grid geometry, never on
/// voxel values, so it can be applied to every image sharing that geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    geometry: GridGeometry,
    /// Row-major flat positions of the selected voxels, ascending
    positions: Vec<usize>,
    mask: Vec<bool>,
}

impl Selection {
    pub(crate) fn from_mask(geometry: GridGeometry, mask: Vec<bool>) -> Self {
        let positions = mask
            .iter()
            .enumerate()
            .filter_map(|(flat, &inside)| if inside { Some(flat) } else { None })
            .collect();
        Selection {
            geometry,
            positions,
            mask,
        }
    }

    /// Geometry the selection was computed for
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Number of selected voxels
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Boolean mask over every voxel, in row-major order
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    /// Check if a voxel is selected; false for indices outside the grid
    pub fn contains_index(&self, i: usize, j: usize, k: usize) -> bool {
        self.geometry
            .flat_index(i, j, k)
            .map(|flat| self.mask[flat])
            .unwrap_or(false)
    }

    /// Selected voxel indices in row-major order
    pub fn indices(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.positions.iter().map(move |&flat| self.geometry.unflatten(flat))
    }

    /// Check that an image shares the geometry this selection was built on
    fn check_compatible(&self, image: &VolumeImage) -> RoiResult<()> {
        let other = image.geometry();
        if other.voxel_dimensions() != self.geometry.voxel_dimensions() {
            return Err(RoiError::ShapeMismatch {
                expected: self.geometry.voxel_dimensions().to_vec(),
                actual: other.voxel_dimensions().to_vec(),
            });
        }
        if other != &self.geometry {
            return Err(RoiError::InvalidParameter(format!(
                "selection computed for FOV {:?} ({}), image has FOV {:?} ({})",
                self.geometry.field_of_view(),
                self.geometry.convention(),
                other.field_of_view(),
                other.convention()
            )));
        }
        Ok(())
    }

    /// Values of the selected voxels in the first frame of an image
    pub fn values(&self, image: &VolumeImage) -> RoiResult<Vec<f64>> {
        self.check_compatible(image)?;
        self.gather(image, 0)
    }

    /// Values of the selected voxels, one sequence per frame
    pub fn frame_values(&self, image: &VolumeImage) -> RoiResult<Vec<Vec<f64>>> {
        self.check_compatible(image)?;
        (0..image.frames()).map(|frame| self.gather(image, frame)).collect()
    }

    fn gather(&self, image: &VolumeImage, frame: usize) -> RoiResult<Vec<f64>> {
        let view = image.frame(frame)?;
        Ok(self
            .positions
            .iter()
            .map(|&flat| {
                let [i, j, k] = self.geometry.unflatten(flat);
                view[[i, j, k]]
            })
            .collect())
    }

    /// Reduce the selected values of an image's first frame
    pub fn statistic(&self, image: &VolumeImage, kind: StatKind) -> RoiResult<f64> {
        reduce(&self.values(image)?, kind)
    }

    /// Reduce the selected values of every frame of an image
    pub fn frame_statistics(&self, image: &VolumeImage, kind: StatKind) -> RoiResult<Vec<f64>> {
        self.frame_values(image)?
            .iter()
            .map(|values| reduce(values, kind))
            .collect()
    }

    /// All statistics of an image's first frame
    pub fn summary(&self, image: &VolumeImage) -> RoiResult<StatSummary> {
        Ok(StatSummary::from_values(&self.values(image)?))
    }
}

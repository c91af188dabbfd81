//! Volumetric image: voxel data over a grid geometry

use log::debug;
use ndarray::{Array4, ArrayD, ArrayView3, Axis, IxDyn};

use crate::errors::{RoiError, RoiResult};

use super::convention::GridConvention;
use super::geometry::GridGeometry;

/// Value(s) stored at one voxel
#[derive(Debug, Clone, PartialEq)]
pub enum VoxelValue {
    /// Single-frame image
    Scalar(f64),
    /// One value per frame of a multi-frame image
    Series(Vec<f64>),
}

impl VoxelValue {
    /// Value of the first frame
    pub fn first(&self) -> f64 {
        match self {
            VoxelValue::Scalar(v) => *v,
            VoxelValue::Series(values) => values.first().copied().unwrap_or(f64::NAN),
        }
    }
}

/// A voxel volume with its physical extent
///
/// The data array has the grid's voxel dimensions as its leading three
/// axes. Any trailing axes hold repeated scenes or timepoints over the
/// same grid; they are flattened into a single frame axis internally.
#[derive(Debug, Clone)]
pub struct VolumeImage {
    geometry: GridGeometry,
    /// (nx, ny, nz, frames)
    data: Array4<f64>,
    /// Trailing axes of the original array (empty for a plain 3D volume)
    frame_shape: Vec<usize>,
}

impl VolumeImage {
    /// Create an image from declared dimensions, field of view and data
    ///
    /// # Arguments
    /// * `voxel_dimensions` - Number of voxels along (x, y, z)
    /// * `field_of_view` - Physical extent along (x, y, z)
    /// * `data` - Array whose leading 3 axes equal `voxel_dimensions`
    ///
    /// # Returns
    /// The image, or `ShapeMismatch` if the array disagrees with the dimensions
    pub fn new(voxel_dimensions: [usize; 3],
               field_of_view: [f64; 3],
               data: ArrayD<f64>) -> RoiResult<Self> {
        let geometry = GridGeometry::new(voxel_dimensions, field_of_view)?;
        Self::from_geometry(geometry, data)
    }

    /// Create an image over an existing grid geometry
    pub fn from_geometry(geometry: GridGeometry, data: ArrayD<f64>) -> RoiResult<Self> {
        let dims = geometry.voxel_dimensions();
        let shape = data.shape().to_vec();

        if shape.len() < 3 || shape[..3] != dims[..] {
            return Err(RoiError::ShapeMismatch {
                expected: dims.to_vec(),
                actual: shape,
            });
        }

        // Trailing axes collapse into one frame axis
        let frame_shape = shape[3..].to_vec();
        let frames: usize = frame_shape.iter().product();
        if frames == 0 {
            return Err(RoiError::ShapeMismatch {
                expected: dims.to_vec(),
                actual: shape,
            });
        }

        // Copy into row-major order before reshaping
        let data = data
            .as_standard_layout()
            .into_owned()
            .into_shape_with_order((dims[0], dims[1], dims[2], frames))
            .map_err(|e| RoiError::GenericError(format!("Failed to reshape image data: {}", e)))?;

        debug!("Created image {:?} with {} frame(s) over FOV {:?}",
               dims, frames, geometry.field_of_view());

        Ok(VolumeImage {
            geometry,
            data,
            frame_shape,
        })
    }

    /// Create an image whose dimensions are taken from the data itself
    ///
    /// Arrays with fewer than three axes are promoted the way numpy's
    /// `atleast_3d` does: `(n,)` becomes `(1, n, 1)` and `(m, n)` becomes
    /// `(m, n, 1)`.
    pub fn from_array(field_of_view: [f64; 3], data: ArrayD<f64>) -> RoiResult<Self> {
        let data = promote_to_3d(data)?;
        let shape = data.shape();
        let dims = [shape[0], shape[1], shape[2]];
        Self::new(dims, field_of_view, data)
    }

    /// Same field of view and convention, new voxel data
    ///
    /// The voxel dimensions follow the new data, so voxel size may change.
    pub fn with_data(&self, data: ArrayD<f64>) -> RoiResult<Self> {
        let data = promote_to_3d(data)?;
        let shape = data.shape();
        let geometry = GridGeometry::with_convention(
            [shape[0], shape[1], shape[2]],
            self.geometry.field_of_view(),
            self.geometry.convention(),
        )?;
        Self::from_geometry(geometry, data)
    }

    /// Same voxel data, new field of view
    pub fn with_field_of_view(&self, field_of_view: [f64; 3]) -> RoiResult<Self> {
        let geometry = GridGeometry::with_convention(
            self.geometry.voxel_dimensions(),
            field_of_view,
            self.geometry.convention(),
        )?;
        Ok(VolumeImage {
            geometry,
            data: self.data.clone(),
            frame_shape: self.frame_shape.clone(),
        })
    }

    /// Same voxel data, different voxel-center convention
    pub fn with_convention(&self, convention: GridConvention) -> Self {
        VolumeImage {
            geometry: self.geometry.to_convention(convention),
            data: self.data.clone(),
            frame_shape: self.frame_shape.clone(),
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Number of frames (1 for a plain 3D volume)
    pub fn frames(&self) -> usize {
        self.data.len_of(Axis(3))
    }

    /// Shape of the trailing frame axes as supplied at construction
    pub fn frame_shape(&self) -> &[usize] {
        &self.frame_shape
    }

    /// View of one frame as a 3D array
    pub fn frame(&self, frame: usize) -> RoiResult<ArrayView3<'_, f64>> {
        if frame >= self.frames() {
            return Err(RoiError::InvalidParameter(format!(
                "frame {} out of range, image has {} frame(s)",
                frame,
                self.frames()
            )));
        }
        Ok(self.data.index_axis(Axis(3), frame))
    }

    /// Every stored value in row-major order, frame index varying fastest
    pub(crate) fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }

    /// Value(s) stored at a voxel
    ///
    /// # Returns
    /// `Scalar` for single-frame images, `Series` with one value per frame
    /// otherwise, or `IndexOutOfRange` outside the grid
    pub fn value_at(&self, i: usize, j: usize, k: usize) -> RoiResult<VoxelValue> {
        self.check_index(i, j, k)?;
        if self.frame_shape.is_empty() {
            Ok(VoxelValue::Scalar(self.data[[i, j, k, 0]]))
        } else {
            // One value per frame at this voxel
            let series = (0..self.frames()).map(|f| self.data[[i, j, k, f]]).collect();
            Ok(VoxelValue::Series(series))
        }
    }

    /// Value at a voxel in one frame
    pub fn frame_value(&self, i: usize, j: usize, k: usize, frame: usize) -> RoiResult<f64> {
        self.check_index(i, j, k)?;
        Ok(self.frame(frame)?[[i, j, k]])
    }

    fn check_index(&self, i: usize, j: usize, k: usize) -> RoiResult<()> {
        if self.geometry.in_bounds([i, j, k]) {
            Ok(())
        } else {
            Err(RoiError::IndexOutOfRange {
                index: [i, j, k],
                dimensions: self.geometry.voxel_dimensions(),
            })
        }
    }
}

/// Promote 0-, 1- and 2-axis arrays to three axes
fn promote_to_3d(data: ArrayD<f64>) -> RoiResult<ArrayD<f64>> {
    let shape = data.shape().to_vec();
    let promoted = match shape.len() {
        0 => vec![1, 1, 1],
        1 => vec![1, shape[0], 1],
        2 => vec![shape[0], shape[1], 1],
        _ => return Ok(data),
    };

    data.as_standard_layout()
        .into_owned()
        .into_shape_with_order(IxDyn(&promoted))
        .map_err(|e| RoiError::GenericError(format!("Failed to promote image data: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, Array3, ArrayD};

    fn ramp(dims: [usize; 3]) -> ArrayD<f64> {
        let total = dims.iter().product::<usize>();
        Array::from_shape_vec(IxDyn(&dims), (0..total).map(|v| v as f64).collect()).unwrap()
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let data = ArrayD::<f64>::zeros(IxDyn(&[4, 4, 3]));
        match VolumeImage::new([4, 4, 4], [1.0, 1.0, 1.0], data) {
            Err(RoiError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, vec![4, 4, 4]);
                assert_eq!(actual, vec![4, 4, 3]);
            }
            other => panic!("expected ShapeMismatch, got {:?}", other),
        }

        let flat = ArrayD::<f64>::zeros(IxDyn(&[16]));
        assert!(VolumeImage::new([4, 4, 1], [1.0, 1.0, 1.0], flat).is_err());
    }

    #[test]
    fn test_value_at_row_major() {
        let image = VolumeImage::new([2, 3, 4], [1.0, 1.0, 1.0], ramp([2, 3, 4])).unwrap();
        assert_eq!(image.value_at(0, 0, 0).unwrap(), VoxelValue::Scalar(0.0));
        assert_eq!(image.value_at(0, 0, 3).unwrap(), VoxelValue::Scalar(3.0));
        assert_eq!(image.value_at(1, 2, 3).unwrap(), VoxelValue::Scalar(23.0));
        assert!(matches!(image.value_at(2, 0, 0), Err(RoiError::IndexOutOfRange { .. })));
    }

    #[test]
    fn test_multi_frame_values() {
        let data = Array::from_shape_fn(IxDyn(&[2, 2, 2, 3]), |idx| (idx[3] * 100 + idx[0]) as f64);
        let image = VolumeImage::new([2, 2, 2], [1.0, 1.0, 1.0], data).unwrap();

        assert_eq!(image.frames(), 3);
        assert_eq!(image.frame_shape(), &[3]);
        assert_eq!(image.value_at(1, 0, 1).unwrap(), VoxelValue::Series(vec![1.0, 101.0, 201.0]));
        assert_eq!(image.frame_value(1, 1, 1, 2).unwrap(), 201.0);
        assert!(image.frame(3).is_err());
    }

    #[test]
    fn test_from_array_promotes_like_atleast_3d() {
        let plane = Array::from_elem(IxDyn(&[5, 7]), 1.0);
        let image = VolumeImage::from_array([5.0, 7.0, 1.0], plane).unwrap();
        assert_eq!(image.geometry().voxel_dimensions(), [5, 7, 1]);

        let line = Array::from_elem(IxDyn(&[6]), 2.0);
        let image = VolumeImage::from_array([1.0, 6.0, 1.0], line).unwrap();
        assert_eq!(image.geometry().voxel_dimensions(), [1, 6, 1]);
    }

    #[test]
    fn test_with_data_keeps_field_of_view() {
        let image = VolumeImage::new([4, 4, 4], [8.0, 8.0, 8.0], ramp([4, 4, 4])).unwrap();
        let finer = image.with_data(Array3::<f64>::zeros((8, 8, 8)).into_dyn()).unwrap();
        assert_eq!(finer.geometry().field_of_view(), [8.0, 8.0, 8.0]);
        assert_eq!(finer.geometry().voxel_size(), [1.0, 1.0, 1.0]);

        let wider = image.with_field_of_view([16.0, 16.0, 16.0]).unwrap();
        assert_eq!(wider.geometry().voxel_size(), [4.0, 4.0, 4.0]);
        assert_eq!(wider.value_at(3, 3, 3).unwrap(), VoxelValue::Scalar(63.0));
    }

    #[test]
    fn test_accepts_non_standard_layout() {
        let data = ramp([3, 4, 5]);
        let transposed = data.clone().reversed_axes();
        let image = VolumeImage::new([5, 4, 3], [1.0, 1.0, 1.0], transposed).unwrap();
        assert_eq!(image.frame_value(4, 3, 2, 0).unwrap(), data[[2, 3, 4]]);
    }
}

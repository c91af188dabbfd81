//! Voxel membership evaluation

use log::{debug, info, warn};

use crate::geometry::{Contains, Shape};
use crate::grid::{GridGeometry, VolumeImage};

use super::selection::Selection;

/// Evaluates ROI shapes against voxel grids
///
/// Every voxel center of the grid is mapped to world coordinates and tested
/// against the shape. The scan is exhaustive; the per-voxel test is O(1)
/// for every supported shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoiEvaluator;

impl RoiEvaluator {
    /// Create a new evaluator
    pub fn new() -> Self {
        RoiEvaluator
    }

    /// Select the voxels whose centers lie inside a shape
    ///
    /// # Arguments
    /// * `shape` - ROI in world coordinates
    /// * `geometry` - Grid to scan
    ///
    /// # Returns
    /// The selection, empty if no voxel center lies inside the shape
    pub fn evaluate(&self, shape: &Shape, geometry: &GridGeometry) -> Selection {
        info!("Evaluating {} ROI centered at {:?} over grid {:?}",
              shape.type_name(), shape.center(), geometry.voxel_dimensions());

        // Compare extents first so misplaced ROIs are reported before the scan
        let roi_bounds = shape.bounds();
        let grid_bounds = geometry.bounds();
        if !grid_bounds.intersects(&roi_bounds) {
            warn!("{} ROI with extent {:?} lies entirely outside the field of view {:?}",
                  shape.type_name(), roi_bounds.size(), geometry.field_of_view());
        } else if roi_bounds.encloses(&grid_bounds) {
            debug!("{} ROI bounds cover the whole field of view", shape.type_name());
        }

        // Test every voxel center, in row-major order
        let mask: Vec<bool> = geometry
            .indices()
            .map(|index| shape.contains(&geometry.voxel_center(index)))
            .collect();
        let selection = Selection::from_mask(*geometry, mask);

        debug!("Selected {} of {} voxels", selection.len(), geometry.total_voxels());
        if selection.is_empty() {
            warn!("ROI selected no voxels");
        }

        selection
    }

    /// Select voxels using an image's grid geometry
    pub fn evaluate_image(&self, shape: &Shape, image: &VolumeImage) -> Selection {
        self.evaluate(shape, image.geometry())
    }
}

/// Select the voxels of a grid whose centers lie inside a shape
pub fn evaluate(shape: &Shape, geometry: &GridGeometry) -> Selection {
    RoiEvaluator::new().evaluate(shape, geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RoiError;
    use crate::geometry::{Cylinder, Point3, Rectangle, Sphere};
    use crate::stats::StatKind;
    use ndarray::{Array, ArrayD, IxDyn};

    fn ones(dims: [usize; 3], fov: [f64; 3]) -> VolumeImage {
        VolumeImage::new(dims, fov, ArrayD::from_elem(IxDyn(&dims), 1.0)).unwrap()
    }

    #[test]
    fn test_surface_voxels_included() {
        // Unit voxels, centers at -1, 0, 1 on each axis
        let grid = GridGeometry::new([3, 3, 3], [3.0, 3.0, 3.0]).unwrap();
        let sphere = Sphere::new(1.0, Point3::origin()).unwrap().into();
        let selection = evaluate(&sphere, &grid);

        assert_eq!(selection.len(), 7);
        assert!(selection.contains_index(1, 1, 1));
        assert!(selection.contains_index(0, 1, 1));
        assert!(selection.contains_index(1, 1, 2));
        assert!(!selection.contains_index(0, 0, 1));
        assert!(!selection.contains_index(5, 5, 5));
    }

    #[test]
    fn test_selection_bounded_by_grid() {
        let grid = GridGeometry::new([6, 5, 4], [3.0, 2.5, 2.0]).unwrap();
        let shapes: Vec<Shape> = vec![
            Sphere::new(1.2, Point3::new(0.3, -0.2, 0.1)).unwrap().into(),
            Cylinder::new(0.8, 1.0, Point3::origin()).unwrap().into(),
            Rectangle::new([100.0, 100.0, 100.0], Point3::origin()).unwrap().into(),
        ];
        for shape in &shapes {
            assert!(evaluate(shape, &grid).len() <= grid.total_voxels());
        }
        assert_eq!(evaluate(&shapes[2], &grid).len(), grid.total_voxels());
    }

    #[test]
    fn test_enclosing_sphere_selects_everything() {
        let grid = GridGeometry::new([10, 8, 6], [5.0, 4.0, 3.0]).unwrap();
        let sphere: Shape = Sphere::new(10.0, Point3::origin()).unwrap().into();
        assert!(sphere.bounds().encloses(&grid.bounds()));
        assert_eq!(evaluate(&sphere, &grid).len(), 480);
    }

    #[test]
    fn test_shape_outside_fov_is_empty() {
        let image = ones([8, 8, 8], [4.0, 4.0, 4.0]);
        let sphere = Sphere::new(1.0, Point3::new(50.0, 0.0, 0.0)).unwrap().into();
        let selection = RoiEvaluator::new().evaluate_image(&sphere, &image);

        assert!(selection.is_empty());
        assert_eq!(selection.statistic(&image, StatKind::Sum).unwrap(), 0.0);
        for kind in [StatKind::Mean, StatKind::Median, StatKind::Min, StatKind::Max, StatKind::Var, StatKind::Std] {
            assert!(matches!(selection.statistic(&image, kind), Err(RoiError::EmptyInput(_))));
        }
    }

    #[test]
    fn test_selection_reused_across_images() {
        let dims = [4, 4, 4];
        let fov = [4.0, 4.0, 4.0];
        let grid = GridGeometry::new(dims, fov).unwrap();
        let rect = Rectangle::new([2.0, 2.0, 2.0], Point3::origin()).unwrap().into();
        let selection = evaluate(&rect, &grid);
        assert_eq!(selection.len(), 8);

        let first = ones(dims, fov);
        let second = VolumeImage::new(dims, fov, Array::from_shape_fn(IxDyn(&dims), |ix| ix[0] as f64)).unwrap();
        assert_eq!(selection.statistic(&first, StatKind::Sum).unwrap(), 8.0);
        // selected x indices are 1 and 2
        assert_eq!(selection.statistic(&second, StatKind::Sum).unwrap(), 12.0);
        assert_eq!(selection.statistic(&second, StatKind::Median).unwrap(), 1.5);
    }

    #[test]
    fn test_incompatible_image_rejected() {
        let grid = GridGeometry::new([4, 4, 4], [4.0, 4.0, 4.0]).unwrap();
        let sphere = Sphere::new(1.0, Point3::origin()).unwrap().into();
        let selection = evaluate(&sphere, &grid);

        let other_dims = ones([4, 4, 5], [4.0, 4.0, 4.0]);
        assert!(matches!(selection.values(&other_dims), Err(RoiError::ShapeMismatch { .. })));

        let other_fov = ones([4, 4, 4], [8.0, 8.0, 8.0]);
        assert!(matches!(selection.values(&other_fov), Err(RoiError::InvalidParameter(_))));
    }

    #[test]
    fn test_frame_statistics() {
        let dims = [2, 2, 2];
        let data = Array::from_shape_fn(IxDyn(&[2, 2, 2, 3]), |ix| (ix[3] + 1) as f64);
        let image = VolumeImage::new(dims, [2.0, 2.0, 2.0], data).unwrap();
        let everything = Rectangle::new([10.0, 10.0, 10.0], Point3::origin()).unwrap().into();
        let selection = evaluate(&everything, image.geometry());

        assert_eq!(selection.frame_statistics(&image, StatKind::Sum).unwrap(), vec![8.0, 16.0, 24.0]);
        assert_eq!(selection.frame_values(&image).unwrap().len(), 3);
        assert_eq!(selection.values(&image).unwrap(), vec![1.0; 8]);
    }

    #[test]
    fn test_indices_match_mask() {
        let grid = GridGeometry::new([5, 5, 5], [5.0, 5.0, 5.0]).unwrap();
        let cyl = Cylinder::new(1.0, 1.0, Point3::origin()).unwrap().into();
        let selection = evaluate(&cyl, &grid);

        let from_indices: Vec<[usize; 3]> = selection.indices().collect();
        assert_eq!(from_indices.len(), selection.mask().iter().filter(|m| **m).count());
        // center plane only: the cross of 5 voxels
        assert_eq!(from_indices, vec![[1, 2, 2], [2, 1, 2], [2, 2, 2], [2, 3, 2], [3, 2, 2]]);
    }
}

//! Opt-in memoization of selections

use std::sync::Arc;

use log::debug;

use crate::geometry::Shape;
use crate::grid::GridGeometry;

use super::roi_evaluator::RoiEvaluator;
use super::selection::Selection;

/// Cache of selections keyed by (shape, grid geometry)
///
/// Selections are handed out as `Arc`s so that worker threads can each hold
/// a read-only reference while reducing different images.
#[derive(Debug, Default)]
pub struct SelectionCache {
    evaluator: RoiEvaluator,
    entries: Vec<(Shape, GridGeometry, Arc<Selection>)>,
    hits: usize,
    misses: usize,
}

impl SelectionCache {
    /// Create an empty cache
    pub fn new() -> Self {
        SelectionCache::default()
    }

    /// Return the cached selection for a pair, evaluating it on first use
    pub fn get_or_evaluate(&mut self, shape: &Shape, geometry: &GridGeometry) -> Arc<Selection> {
        if let Some((_, _, selection)) = self
            .entries
            .iter()
            .find(|(s, g, _)| s == shape && g == geometry)
        {
            self.hits += 1;
            debug!("Selection cache hit for {} ROI", shape.type_name());
            return Arc::clone(selection);
        }

        self.misses += 1;
        let selection = Arc::new(self.evaluator.evaluate(shape, geometry));
        self.entries.push((shape.clone(), *geometry, Arc::clone(&selection)));
        selection
    }

    /// Number of cached selections
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }

    /// Drop every cached selection
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point3, Sphere};
    use crate::grid::VolumeImage;
    use crate::stats::StatKind;
    use ndarray::{Array, IxDyn};
    use std::thread;

    #[test]
    fn test_reuses_selection() {
        let mut cache = SelectionCache::new();
        let grid = GridGeometry::new([6, 6, 6], [6.0, 6.0, 6.0]).unwrap();
        let sphere: Shape = Sphere::new(1.5, Point3::origin()).unwrap().into();

        let a = cache.get_or_evaluate(&sphere, &grid);
        let b = cache.get_or_evaluate(&sphere, &grid);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), (1, 1));

        let other_grid = GridGeometry::new([6, 6, 6], [12.0, 12.0, 12.0]).unwrap();
        let c = cache.get_or_evaluate(&sphere, &other_grid);
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let dims = [5, 5, 5];
        let fov = [5.0, 5.0, 5.0];
        let mut cache = SelectionCache::new();
        let grid = GridGeometry::new(dims, fov).unwrap();
        let sphere: Shape = Sphere::new(1.0, Point3::origin()).unwrap().into();
        let selection = cache.get_or_evaluate(&sphere, &grid);

        let handles: Vec<_> = (1..=4)
            .map(|scale| {
                let selection = Arc::clone(&selection);
                thread::spawn(move || {
                    let data = Array::from_elem(IxDyn(&dims), scale as f64);
                    let image = VolumeImage::new(dims, fov, data).unwrap();
                    selection.statistic(&image, StatKind::Sum).unwrap()
                })
            })
            .collect();

        let sums: Vec<f64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(sums, vec![7.0, 14.0, 21.0, 28.0]);
    }
}

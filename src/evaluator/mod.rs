//! ROI evaluation
//!
//! Combines a shape with a grid geometry to find the voxels inside the
//! region, and gathers their values from images on that grid.

mod cache;
mod roi_evaluator;
mod selection;

pub use self::cache::SelectionCache;
pub use self::roi_evaluator::{evaluate, RoiEvaluator};
pub use self::selection::Selection;

pub mod errors;
pub mod geometry;
pub mod grid;
pub mod evaluator;
pub mod stats;
pub mod io;
pub mod compression;
pub mod config;
pub mod utils;
pub mod api;

pub use crate::api::{RoiKit, RoiReport, StatEntry};
pub use crate::config::AnalysisConfig;
pub use crate::errors::{RoiError, RoiResult};

pub use geometry::{Axis, Contains, Cylinder, Ellipsoid, Point3, Rectangle, Shape, Sphere};
pub use grid::{GridConvention, GridGeometry, VolumeImage, VoxelValue};
pub use evaluator::{evaluate, RoiEvaluator, Selection, SelectionCache};
pub use stats::{reduce, StatKind, StatSummary};
pub use io::{from_record, roi_from_json, to_record};

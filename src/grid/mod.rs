//! Image grid adapter
//!
//! Wraps a dense voxel array together with the physical field of view it
//! covers, and maps between voxel indices and world coordinates.

mod convention;
mod geometry;
mod image;

pub use self::convention::{GridConvention, DEFAULT_CONVENTION};
pub use self::geometry::{GridGeometry, VoxelIndices};
pub use self::image::{VolumeImage, VoxelValue};

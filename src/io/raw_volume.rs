//! Raw voxel volume files
//!
//! A raw volume is a headerless dump of samples in row-major order with the
//! frame index varying fastest, i.e. the memory order of an
//! `(nx, ny, nz, frames)` C-contiguous array. Files ending in `.gz` or
//! `.zst` are decompressed transparently.

use std::fs;
use std::path::Path;

use log::{debug, info};
use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::compression::CompressionFactory;
use crate::errors::{RoiError, RoiResult};
use crate::grid::{GridConvention, GridGeometry, VolumeImage, DEFAULT_CONVENTION};

use super::byte_order::{ByteOrder, SampleType};

/// Layout of a raw volume file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawVolumeSpec {
    /// Voxels along (x, y, z)
    pub voxel_dimensions: [usize; 3],
    /// Physical extent along (x, y, z)
    pub field_of_view: [f64; 3],
    /// Number of frames stored per voxel
    #[serde(default = "default_frames")]
    pub frames: usize,
    #[serde(default)]
    pub sample_type: SampleType,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default = "default_convention")]
    pub convention: GridConvention,
}

fn default_frames() -> usize {
    1
}

fn default_convention() -> GridConvention {
    DEFAULT_CONVENTION
}

impl RawVolumeSpec {
    /// Single-frame little-endian f32 layout
    pub fn new(voxel_dimensions: [usize; 3], field_of_view: [f64; 3]) -> Self {
        RawVolumeSpec {
            voxel_dimensions,
            field_of_view,
            frames: default_frames(),
            sample_type: SampleType::default(),
            byte_order: ByteOrder::default(),
            convention: DEFAULT_CONVENTION,
        }
    }

    /// Number of samples the file must hold
    pub fn sample_count(&self) -> usize {
        self.voxel_dimensions.iter().product::<usize>() * self.frames
    }
}

/// Read a raw volume file into an image
///
/// # Arguments
/// * `path` - File to read; `.gz` and `.zst` files are decompressed
/// * `spec` - Expected layout of the samples
///
/// # Returns
/// The image, or `ShapeMismatch` if the file holds the wrong number of samples
pub fn read_raw_volume<P: AsRef<Path>>(path: P, spec: &RawVolumeSpec) -> RoiResult<VolumeImage> {
    let path = path.as_ref();
    if spec.frames == 0 {
        return Err(RoiError::InvalidParameter("frame count must be positive".to_string()));
    }
    let geometry = GridGeometry::with_convention(spec.voxel_dimensions, spec.field_of_view, spec.convention)?;

    // Compression is picked from the file extension
    let handler = CompressionFactory::for_path(path);
    info!("Reading raw volume {} ({}, {} {}-endian)",
          path.display(), handler.name(), spec.sample_type, spec.byte_order.name());

    let packed = fs::read(path)?;
    let bytes = handler.decompress(&packed)?;
    debug!("Read {} bytes, {} after decompression", packed.len(), bytes.len());

    // The decoded size must match the declared layout exactly
    let expected = spec.sample_count();
    if bytes.len() != expected * spec.sample_type.byte_size() {
        return Err(RoiError::ShapeMismatch {
            expected: vec![expected],
            actual: vec![bytes.len() / spec.sample_type.byte_size()],
        });
    }

    let values = spec.byte_order.create_handler().read_samples(&bytes, spec.sample_type)?;

    // Single-frame volumes stay 3D
    let [nx, ny, nz] = spec.voxel_dimensions;
    let shape = if spec.frames == 1 {
        vec![nx, ny, nz]
    } else {
        vec![nx, ny, nz, spec.frames]
    };
    let data = ArrayD::from_shape_vec(IxDyn(&shape), values)
        .map_err(|e| RoiError::GenericError(format!("Failed to shape raw volume: {}", e)))?;

    VolumeImage::from_geometry(geometry, data)
}

/// Write an image as a raw volume file
///
/// The returned spec describes the written layout, so the file can be read
/// back with `read_raw_volume`.
pub fn write_raw_volume<P: AsRef<Path>>(path: P,
                                        image: &VolumeImage,
                                        sample_type: SampleType,
                                        byte_order: ByteOrder) -> RoiResult<RawVolumeSpec> {
    let path = path.as_ref();
    let geometry = image.geometry();
    let handler = CompressionFactory::for_path(path);
    info!("Writing raw volume {} ({}, {} {}-endian)",
          path.display(), handler.name(), sample_type, byte_order.name());

    // Encode every sample, frame index varying fastest
    let mut bytes = Vec::with_capacity(geometry.total_voxels() * image.frames() * sample_type.byte_size());
    byte_order
        .create_handler()
        .write_samples(&mut image.samples(), sample_type, &mut bytes)?;
    fs::write(path, handler.compress(&bytes)?)?;

    Ok(RawVolumeSpec {
        voxel_dimensions: geometry.voxel_dimensions(),
        field_of_view: geometry.field_of_view(),
        frames: image.frames(),
        sample_type,
        byte_order,
        convention: geometry.convention(),
    })
}

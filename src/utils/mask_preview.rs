//! Selection mask previews
//!
//! Renders one z-slice of a selection as a grayscale image, which makes it
//! easy to eyeball where an ROI landed on the grid.

use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use log::info;

use crate::errors::{RoiError, RoiResult};
use crate::evaluator::Selection;

const SELECTED: u8 = 255;
const UNSELECTED: u8 = 0;

/// Render one z-slice of a selection mask
///
/// Image columns follow the x axis and rows follow the y axis.
///
/// # Arguments
/// * `selection` - The selection to render
/// * `z` - Slice index along the z axis
///
/// # Returns
/// A grayscale image with selected voxels white, or `IndexOutOfRange`
pub fn render_mask_slice(selection: &Selection, z: usize) -> RoiResult<GrayImage> {
    let dims = selection.geometry().voxel_dimensions();
    if z >= dims[2] {
        return Err(RoiError::IndexOutOfRange {
            index: [0, 0, z],
            dimensions: dims,
        });
    }

    let width = u32::try_from(dims[0])
        .map_err(|_| RoiError::InvalidParameter(format!("grid too wide to render: {}", dims[0])))?;
    let height = u32::try_from(dims[1])
        .map_err(|_| RoiError::InvalidParameter(format!("grid too tall to render: {}", dims[1])))?;

    let mut preview = GrayImage::from_pixel(width, height, Luma([UNSELECTED]));
    for [i, j, _] in selection.indices().filter(|index| index[2] == z) {
        preview.put_pixel(i as u32, j as u32, Luma([SELECTED]));
    }
    Ok(preview)
}

/// Ensure a file path has the PNG extension
///
/// # Arguments
/// * `file_path` - The original file path
///
/// # Returns
/// The path unchanged if it already ends in `.png`, otherwise the path with
/// its extension replaced
pub fn ensure_png_extension(file_path: &Path) -> PathBuf {
    match file_path.extension() {
        Some(ext) if ext.to_string_lossy().eq_ignore_ascii_case("png") => file_path.to_path_buf(),
        _ => file_path.with_extension("png"),
    }
}

/// Save one z-slice of a selection mask as a PNG file
///
/// # Returns
/// The path actually written, which always ends in `.png`
pub fn save_mask_slice<P: AsRef<Path>>(selection: &Selection, z: usize, output_path: P) -> RoiResult<PathBuf> {
    let requested = output_path.as_ref();
    let final_path = ensure_png_extension(requested);
    if final_path != requested {
        info!("Changed output extension to PNG: {}", final_path.display());
    }

    let preview = render_mask_slice(selection, z)?;
    preview
        .save_with_format(&final_path, ImageFormat::Png)
        .map_err(|e| RoiError::GenericError(format!("Failed to save mask preview: {}", e)))?;

    info!("Saved mask slice z={} to {}", z, final_path.display());
    Ok(final_path)
}

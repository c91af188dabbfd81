//! Reading and writing ROI definition files

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::errors::{RoiError, RoiResult};
use crate::geometry::Shape;

use super::record::{from_record, to_record};

/// Decode an ROI from a JSON document or from a file containing one
///
/// The input is first parsed as JSON. If that fails it is treated as the
/// path of a JSON file.
///
/// # Arguments
/// * `input` - JSON text, or a path to a JSON file
///
/// # Returns
/// The decoded shape or an error
pub fn roi_from_json(input: &str) -> RoiResult<Shape> {
    match serde_json::from_str::<Value>(input) {
        Ok(record) => from_record(&record),
        Err(parse_error) => {
            debug!("Input is not inline JSON ({}), trying it as a file path", parse_error);
            if Path::new(input).is_file() {
                read_roi_file(input)
            } else {
                Err(RoiError::JsonError(format!(
                    "JSON string or filename not valid: {}",
                    parse_error
                )))
            }
        }
    }
}

/// Read an ROI definition from a JSON file
pub fn read_roi_file<P: AsRef<Path>>(path: P) -> RoiResult<Shape> {
    let path = path.as_ref();
    info!("Reading ROI definition from {}", path.display());
    let content = fs::read_to_string(path)?;
    let record: Value = serde_json::from_str(&content)?;
    from_record(&record)
}

/// Write an ROI definition to a JSON file
pub fn write_roi_file<P: AsRef<Path>>(path: P, shape: &Shape) -> RoiResult<()> {
    let path = path.as_ref();
    info!("Writing {} ROI definition to {}", shape.type_name(), path.display());
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &to_record(shape))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

//! Conversion between shapes and JSON-compatible records
//!
//! Record layout:
//! - `{"type": "sphere", "center": [x, y, z], "radius": r}`
//! - `{"type": "cylinder", "center": [x, y, z], "radius": r, "height": h, "axis": "z"}`
//! - `{"type": "rectangle", "center": [x, y, z], "size": [sx, sy, sz]}`
//! - `{"type": "ellipsoid", "center": [x, y, z], "radii": [rx, ry, rz]}`
//!
//! Unknown keys are ignored. The cylinder `axis` key is optional and
//! defaults to `"z"`.

use log::debug;
use serde_json::{json, Map, Value};

use crate::errors::{RoiError, RoiResult};
use crate::geometry::{Axis, Cylinder, Ellipsoid, Point3, Rectangle, Shape, Sphere};

/// Convert a shape into its JSON record
pub fn to_record(shape: &Shape) -> Value {
    let center = shape.center().to_array();
    match shape {
        Shape::Sphere(s) => json!({
            "type": "sphere",
            "center": center,
            "radius": s.radius(),
        }),
        Shape::Cylinder(c) => json!({
            "type": "cylinder",
            "center": center,
            "radius": c.radius(),
            "height": c.height(),
            "axis": c.axis().name(),
        }),
        Shape::Rectangle(r) => json!({
            "type": "rectangle",
            "center": center,
            "size": r.size(),
        }),
        Shape::Ellipsoid(e) => json!({
            "type": "ellipsoid",
            "center": center,
            "radii": e.radii(),
        }),
    }
}

/// Build a shape from its JSON record
///
/// # Arguments
/// * `record` - JSON object with a `"type"` key and the variant's fields
///
/// # Returns
/// The validated shape, `UnknownType` for an unrecognized `"type"`, or
/// `InvalidParameter` for missing or invalid fields
pub fn from_record(record: &Value) -> RoiResult<Shape> {
    let fields = record.as_object().ok_or_else(|| {
        RoiError::InvalidParameter("ROI record must be a JSON object".to_string())
    })?;

    let type_name = match fields.get("type") {
        None => {
            return Err(RoiError::InvalidParameter(
                "key specifying type of ROI was not specified".to_string(),
            ))
        }
        Some(Value::String(name)) => name.as_str(),
        Some(other) => return Err(RoiError::UnknownType(other.to_string())),
    };
    debug!("Decoding {} ROI record", type_name);

    match type_name {
        "sphere" => {
            let center = center(fields)?;
            Ok(Sphere::new(number(fields, "radius")?, center)?.into())
        }
        "cylinder" => {
            let center = center(fields)?;
            let axis = match fields.get("axis") {
                None | Some(Value::Null) => Axis::default(),
                Some(Value::String(name)) => name.parse()?,
                Some(other) => {
                    return Err(RoiError::InvalidParameter(format!(
                        "key \"axis\" must be a string, got {}",
                        other
                    )))
                }
            };
            Ok(Cylinder::with_axis(
                number(fields, "radius")?,
                number(fields, "height")?,
                center,
                axis,
            )?
            .into())
        }
        "rectangle" => {
            let center = center(fields)?;
            Ok(Rectangle::new(triplet(fields, "size")?, center)?.into())
        }
        "ellipsoid" => {
            let center = center(fields)?;
            Ok(Ellipsoid::new(triplet(fields, "radii")?, center)?.into())
        }
        other => Err(RoiError::UnknownType(other.to_string())),
    }
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str) -> RoiResult<&'a Value> {
    fields.get(key).ok_or_else(|| {
        RoiError::InvalidParameter(format!("key specifying {} of ROI was not specified", key))
    })
}

fn number(fields: &Map<String, Value>, key: &str) -> RoiResult<f64> {
    let value = required(fields, key)?;
    value.as_f64().ok_or_else(|| {
        RoiError::InvalidParameter(format!("key \"{}\" must be a number, got {}", key, value))
    })
}

fn triplet(fields: &Map<String, Value>, key: &str) -> RoiResult<[f64; 3]> {
    let value = required(fields, key)?;
    let invalid = || {
        RoiError::InvalidParameter(format!(
            "key \"{}\" must be an array of 3 numbers, got {}",
            key, value
        ))
    };

    let items = value.as_array().ok_or_else(invalid)?;
    let numbers: Vec<f64> = items
        .iter()
        .map(|v| v.as_f64().ok_or_else(invalid))
        .collect::<RoiResult<_>>()?;
    numbers.try_into().map_err(|_| invalid())
}

fn center(fields: &Map<String, Value>) -> RoiResult<Point3> {
    let value = required(fields, "center")?;
    let items = value.as_array().ok_or_else(|| {
        RoiError::InvalidParameter(format!("key \"center\" must be an array, got {}", value))
    })?;
    let coords = items
        .iter()
        .map(|v| {
            v.as_f64().ok_or_else(|| {
                RoiError::InvalidParameter(format!("center coordinate {} is not a number", v))
            })
        })
        .collect::<RoiResult<Vec<f64>>>()?;
    Point3::from_slice(&coords)
}

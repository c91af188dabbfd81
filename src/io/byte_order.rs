//! Byte order handling for raw voxel data
//!
//! This module implements the Strategy pattern for decoding and encoding
//! voxel samples stored in little-endian or big-endian order.

use std::fmt;
use std::io::{Cursor, Result};
use std::str::FromStr;

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::errors::RoiError;

/// Byte order of a raw volume file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Little-endian byte order
    #[default]
    Little,
    /// Big-endian byte order
    Big,
}

impl ByteOrder {
    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::Little => "little",
            ByteOrder::Big => "big",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::Little => Box::new(LittleEndianHandler),
            ByteOrder::Big => Box::new(BigEndianHandler),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = RoiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "little" | "le" | "little-endian" => Ok(ByteOrder::Little),
            "big" | "be" | "big-endian" => Ok(ByteOrder::Big),
            other => Err(RoiError::InvalidParameter(format!("unknown byte order \"{}\"", other))),
        }
    }
}

/// Numeric type of one stored sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    /// 32-bit float, the usual type of reconstructed PET volumes
    #[default]
    F32,
    F64,
}

impl SampleType {
    /// Size of one sample in bytes
    pub fn byte_size(&self) -> usize {
        match self {
            SampleType::F32 => 4,
            SampleType::F64 => 8,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleType::F32 => write!(f, "f32"),
            SampleType::F64 => write!(f, "f64"),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Decode a buffer of samples into f64 values
    fn read_samples(&self, bytes: &[u8], sample_type: SampleType) -> Result<Vec<f64>>;

    /// Encode values as samples, appending to `out`
    fn write_samples(&self, values: &mut dyn Iterator<Item = f64>,
                     sample_type: SampleType, out: &mut Vec<u8>) -> Result<()>;
}

fn read_with<B: byteorder::ByteOrder>(bytes: &[u8], sample_type: SampleType) -> Result<Vec<f64>> {
    let count = bytes.len() / sample_type.byte_size();
    let mut cursor = Cursor::new(bytes);
    match sample_type {
        SampleType::F32 => {
            let mut samples = vec![0f32; count];
            cursor.read_f32_into::<B>(&mut samples)?;
            Ok(samples.into_iter().map(f64::from).collect())
        }
        SampleType::F64 => {
            let mut samples = vec![0f64; count];
            cursor.read_f64_into::<B>(&mut samples)?;
            Ok(samples)
        }
    }
}

fn write_with<B: byteorder::ByteOrder>(values: &mut dyn Iterator<Item = f64>,
                                       sample_type: SampleType, out: &mut Vec<u8>) -> Result<()> {
    for value in values {
        match sample_type {
            SampleType::F32 => out.write_f32::<B>(value as f32)?,
            SampleType::F64 => out.write_f64::<B>(value)?,
        }
    }
    Ok(())
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_samples(&self, bytes: &[u8], sample_type: SampleType) -> Result<Vec<f64>> {
        read_with::<LittleEndian>(bytes, sample_type)
    }

    fn write_samples(&self, values: &mut dyn Iterator<Item = f64>,
                     sample_type: SampleType, out: &mut Vec<u8>) -> Result<()> {
        write_with::<LittleEndian>(values, sample_type, out)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_samples(&self, bytes: &[u8], sample_type: SampleType) -> Result<Vec<f64>> {
        read_with::<BigEndian>(bytes, sample_type)
    }

    fn write_samples(&self, values: &mut dyn Iterator<Item = f64>,
                     sample_type: SampleType, out: &mut Vec<u8>) -> Result<()> {
        write_with::<BigEndian>(values, sample_type, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_f32() {
        let mut buffer = Vec::new();
        buffer.write_f32::<BigEndian>(1.5).unwrap();
        buffer.write_f32::<BigEndian>(-2.0).unwrap();

        let values = ByteOrder::Big.create_handler().read_samples(&buffer, SampleType::F32).unwrap();
        assert_eq!(values, vec![1.5, -2.0]);
    }

    #[test]
    fn test_little_endian_f64_encoding() {
        let mut out = Vec::new();
        ByteOrder::Little
            .create_handler()
            .write_samples(&mut [0.25f64, 8.0].into_iter(), SampleType::F64, &mut out)
            .unwrap();

        assert_eq!(out.len(), 16);
        assert_eq!(&out[..8], &0.25f64.to_le_bytes());
        assert_eq!(&out[8..], &8.0f64.to_le_bytes());
    }

    #[test]
    fn test_parse_byte_order() {
        assert_eq!("LE".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert_eq!("big-endian".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert!("middle".parse::<ByteOrder>().is_err());
    }
}

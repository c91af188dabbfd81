//! Handler for gzip compressed data

use std::io::{Read, Write};
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;
use crate::errors::{RoiError, RoiResult};
use super::handler::CompressionHandler;

/// Gzip compression handler (`.gz` files)
pub struct GzipHandler;

impl CompressionHandler for GzipHandler {
    fn decompress(&self, data: &[u8]) -> RoiResult<Vec<u8>> {
        debug!("Gzip decompressing {} bytes", data.len());
        let mut decoder = MultiGzDecoder::new(data);
        let mut decompressed_data = Vec::new();
        match decoder.read_to_end(&mut decompressed_data) {
            Ok(_) => Ok(decompressed_data),
            Err(e) => Err(RoiError::IoError(e))
        }
    }

    fn compress(&self, data: &[u8]) -> RoiResult<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?)
    }

    fn name(&self) -> &'static str {
        "Gzip"
    }

    fn extension(&self) -> Option<&'static str> {
        Some("gz")
    }
}

//! Handler for uncompressed data

use crate::errors::RoiResult;
use super::handler::CompressionHandler;

/// Uncompressed data handler
pub struct UncompressedHandler;

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> RoiResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn compress(&self, data: &[u8]) -> RoiResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "Uncompressed"
    }

    fn extension(&self) -> Option<&'static str> {
        None
    }
}

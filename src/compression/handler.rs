//! Compression handler trait definition

use crate::errors::RoiResult;

/// Strategy trait for handling different compression methods
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> RoiResult<Vec<u8>>;

    /// Compress the data
    fn compress(&self, data: &[u8]) -> RoiResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// File extension (without the dot) that marks this compression
    fn extension(&self) -> Option<&'static str>;
}

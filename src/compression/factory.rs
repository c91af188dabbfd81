//! Factory for creating compression handlers

use std::path::Path;

use crate::errors::{RoiError, RoiResult};
use super::handler::CompressionHandler;
use super::uncompressed::UncompressedHandler;
use super::gzip::GzipHandler;
use super::zstd::ZstdHandler;

/// Factory for creating compression handlers
pub struct CompressionFactory;

impl CompressionFactory {
    /// Pick a handler from a file's extension
    ///
    /// `.gz` selects gzip, `.zst` selects ZSTD, anything else is read as-is.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Box<dyn CompressionHandler> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(|ext| ext.to_lowercase());

        let compressed: [Box<dyn CompressionHandler>; 2] = [Box::new(GzipHandler), Box::new(ZstdHandler::new())];
        compressed
            .into_iter()
            .find(|handler| handler.extension().is_some() && handler.extension() == extension.as_deref())
            .unwrap_or_else(|| Box::new(UncompressedHandler))
    }

    /// Get a handler by name
    pub fn get_handler_by_name(name: &str) -> RoiResult<Box<dyn CompressionHandler>> {
        match name.to_lowercase().as_str() {
            "uncompressed" | "none" | "raw" => Ok(Box::new(UncompressedHandler)),
            "gzip" | "gz" => Ok(Box::new(GzipHandler)),
            "zstd" | "zst" => Ok(Box::new(ZstdHandler::new())),
            _ => Err(RoiError::GenericError(format!("Unknown compression type: {}", name)))
        }
    }
}

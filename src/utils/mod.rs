//! Utility modules for common functionality
//!
//! Logging setup, progress reporting and mask previews used by the API layer.

pub mod logger;
pub mod progress;
pub mod mask_preview;

//! Compression handling for raw volume files
//!
//! This module implements strategies for handling different compression methods.

mod handler;
mod uncompressed;
mod gzip;
mod factory;
mod zstd;

pub use self::handler::CompressionHandler;
pub use self::uncompressed::UncompressedHandler;
pub use self::gzip::GzipHandler;
pub use self::factory::CompressionFactory;
pub use self::zstd::ZstdHandler;

//! Serialization and file I/O
//!
//! ROI definitions travel as JSON records; voxel data can be loaded from
//! headerless raw volume files.

pub mod byte_order;
mod raw_volume;
mod record;
mod roi_file;

pub use self::byte_order::{ByteOrder, SampleType};
pub use self::raw_volume::{read_raw_volume, write_raw_volume, RawVolumeSpec};
pub use self::record::{from_record, to_record};
pub use self::roi_file::{read_roi_file, roi_from_json, write_roi_file};

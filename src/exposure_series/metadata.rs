//! Metadata extraction
//!
//! Validation only ever looks at a file's metadata, never at pixel data.
//! The reader is a trait so the consistency checks can be exercised without
//! camera files on disk.

mod exif_reader;
mod reader;
pub mod types;

pub use exif_reader::ExifMetadataReader;
pub use reader::MetadataReader;
pub use types::FrameMetadata;

use std::path::Path;

use crate::exposure_series::common::error::Result;
use crate::exposure_series::metadata::types::FrameMetadata;

pub trait MetadataReader {
    fn read(&self, path: &Path) -> Result<FrameMetadata>;
}

use std::path::Path;

use crate::exposure_series::common::error::Result;
use crate::exposure_series::raw::types::RawFrame;

pub trait RawFrameReader {
    fn read_frame(&self, path: &Path) -> Result<RawFrame>;
}

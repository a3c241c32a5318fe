//! RAW frame reader implementation using the rawloader library.
//!
//! rawloader covers the proprietary per-camera bitstream formats (ARW, CR2,
//! NEF, DNG, ...) and ships its camera calibration tables inside the crate,
//! so a reader value carries no mutable state and can be shared across
//! decode workers freely.

use std::path::Path;

use rawloader::RawImageData;
use tracing::debug;

use crate::exposure_series::common::error::{Result, SeriesError};
use crate::exposure_series::raw::reader::RawFrameReader;
use crate::exposure_series::raw::types::RawFrame;

pub struct RawLoaderFrameReader;

impl RawFrameReader for RawLoaderFrameReader {
    fn read_frame(&self, path: &Path) -> Result<RawFrame> {
        let decoded = rawloader::decode_file(path).map_err(|e| SeriesError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(
            path = %path.display(),
            width = decoded.width,
            height = decoded.height,
            "decoded RAW frame"
        );

        if decoded.cpp != 1 {
            return Err(SeriesError::Unsupported {
                path: path.to_path_buf(),
                reason: format!(
                    "subsampled sensor output ({} components per pixel)",
                    decoded.cpp
                ),
            });
        }

        let data = match decoded.data {
            RawImageData::Integer(values) => values,
            RawImageData::Float(_) => {
                return Err(SeriesError::Unsupported {
                    path: path.to_path_buf(),
                    reason: "only RAW data in 16-bit format is supported".to_string(),
                });
            }
        };

        if decoded.cfa.width == 0 || decoded.cfa.height == 0 {
            return Err(SeriesError::Unsupported {
                path: path.to_path_buf(),
                reason: "only sensors with a color filter array are supported".to_string(),
            });
        }

        // Crops give the border around the active area: top, right, bottom,
        // left. The decoded plane keeps the full sensor width as its pitch.
        let [top, right, bottom, left] = decoded.crops;
        let width = decoded.width.saturating_sub(left + right);
        let height = decoded.height.saturating_sub(top + bottom);
        if width == 0 || height == 0 {
            return Err(SeriesError::InvalidDimensions(width, height));
        }

        Ok(RawFrame {
            width,
            height,
            pitch: decoded.width,
            offset_x: left,
            offset_y: top,
            black_level: decoded.blacklevels[0],
            white_level: decoded.whitelevels[0],
            data,
        })
    }
}

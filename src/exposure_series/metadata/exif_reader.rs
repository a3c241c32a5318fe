//! EXIF-backed metadata reader
//!
//! Reads the camera settings relevant to bracket validation out of a RAW
//! file's EXIF block, plus a serialized copy of every tag for the series
//! metadata map. Only the file header is parsed; pixel data stays untouched.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Tag, Value};
use tracing::debug;

use crate::exposure_series::common::error::{Result, SeriesError};
use crate::exposure_series::metadata::reader::MetadataReader;
use crate::exposure_series::metadata::types::FrameMetadata;

pub struct ExifMetadataReader;

impl MetadataReader for ExifMetadataReader {
    fn read(&self, path: &Path) -> Result<FrameMetadata> {
        let file = File::open(path).map_err(|e| SeriesError::MetadataRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let exif = exif::Reader::new()
            .read_from_container(&mut BufReader::new(file))
            .map_err(|e| SeriesError::MetadataRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let numeric = |tag: Tag| {
            exif.get_field(tag, In::PRIMARY)
                .and_then(|f| value_to_f64(&f.value))
        };

        let tags: Vec<(String, String)> = exif
            .fields()
            .map(|f| {
                (
                    f.tag.to_string(),
                    f.display_value().with_unit(&exif).to_string(),
                )
            })
            .collect();

        debug!(path = %path.display(), tags = tags.len(), "extracted EXIF metadata");

        Ok(FrameMetadata {
            shutter_speed_value: numeric(Tag::ShutterSpeedValue),
            exposure_time: numeric(Tag::ExposureTime),
            iso_speed: numeric(Tag::PhotographicSensitivity),
            aperture: numeric(Tag::FNumber),
            exposure_mode: exif
                .get_field(Tag::ExposureMode, In::PRIMARY)
                .map(|f| f.display_value().to_string()),
            // Focus mode lives in vendor maker notes, which kamadak-exif
            // leaves opaque. A maker-note-aware reader can supply it through
            // the same trait.
            focus_mode: None,
            tags,
        })
    }
}

/// First component of a numeric EXIF value, whatever its wire type.
fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Byte(v) => v.first().map(|&x| f64::from(x)),
        Value::Short(v) => v.first().map(|&x| f64::from(x)),
        Value::Long(v) => v.first().map(|&x| f64::from(x)),
        Value::SShort(v) => v.first().map(|&x| f64::from(x)),
        Value::SLong(v) => v.first().map(|&x| f64::from(x)),
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        Value::SRational(v) => v.first().map(|r| r.to_f64()),
        Value::Float(v) => v.first().map(|&x| f64::from(x)),
        Value::Double(v) => v.first().copied(),
        _ => None,
    }
}

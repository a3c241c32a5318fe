//! Exposure-series ingest for high-dynamic-range reconstruction.
//!
//! Takes a bracketed sequence of RAW photographs, validates that the shots
//! form a coherent series (same ISO, same aperture, no duplicate exposure
//! times), decodes the sensor data into normalized linear-light buffers and
//! estimates the sensor saturation point from the brightest exposure.

pub mod exposure_series;
pub mod logger;

pub use exposure_series::{
    Exposure, ExposureSeries, ExifMetadataReader, MetadataReader, RawFrameReader,
    RawLoaderFrameReader, Result, SeriesError,
};

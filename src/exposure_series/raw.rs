//! RAW frame decoding
//!
//! Wraps the sensor-format decoder behind a trait so materialization can be
//! tested with synthetic frames. The decoder hands back the sensor plane
//! with its calibration levels; normalization to linear light happens on
//! [`types::RawFrame`].

mod rawloader_reader;
mod reader;
pub mod types;

pub use rawloader_reader::RawLoaderFrameReader;
pub use reader::RawFrameReader;
pub use types::RawFrame;

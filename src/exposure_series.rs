//! Exposure-series pipeline
//!
//! The series moves through three phases: discovery (expanding a filename
//! pattern into exposures), validation (metadata-only consistency checks)
//! and materialization (parallel RAW decode into normalized buffers).

pub mod common;
pub mod metadata;
pub mod raw;
pub mod saturation;
pub mod series;


pub use common::{Result, SeriesError};

pub use metadata::{ExifMetadataReader, FrameMetadata, MetadataReader};

pub use raw::{RawFrame, RawFrameReader, RawLoaderFrameReader};

pub use series::{Exposure, ExposureSeries};

pub use saturation::estimate_saturation;

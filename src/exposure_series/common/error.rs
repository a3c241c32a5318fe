use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("{}: could not read image metadata: {reason}", .path.display())]
    MetadataRead { path: PathBuf, reason: String },

    #[error("{}: could not extract the {field}", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: ISO speed {found} differs from the rest of the series ({expected})", .path.display())]
    IsoMismatch {
        path: PathBuf,
        expected: f64,
        found: f64,
    },

    #[error("{}: aperture f/{found} differs from the rest of the series (f/{expected})", .path.display())]
    ApertureMismatch {
        path: PathBuf,
        expected: f64,
        found: f64,
    },

    #[error("duplicate exposure time: {0}")]
    DuplicateExposure(String),

    #[error("{}: failed to decode RAW data: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("{}: unsupported RAW data: {reason}", .path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("the exposure series contains no images")]
    EmptySeries,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeriesError>;

//! Per-frame metadata types

/// Metadata extracted from a single frame, before any cross-frame checks.
///
/// The five camera-setting fields are optional at this level; the validation
/// phase decides which of them are required and fails the run accordingly.
#[derive(Debug, Clone, Default)]
pub struct FrameMetadata {
    /// APEX shutter-speed value, the logarithmic exposure representation.
    /// The linear duration in seconds is `2^(-value)`.
    pub shutter_speed_value: Option<f64>,
    /// The nominal exposure time the camera reports, usually rounded.
    pub exposure_time: Option<f64>,
    pub iso_speed: Option<f64>,
    /// Aperture as an f-number.
    pub aperture: Option<f64>,
    /// Printable exposure-mode description, when the file carries one.
    pub exposure_mode: Option<String>,
    /// Vendor-specific focus-mode description, when available. Best effort;
    /// most readers cannot recover this for every make.
    pub focus_mode: Option<String>,
    /// Every tag the file carries, serialized, for the series metadata map.
    pub tags: Vec<(String, String)>,
}

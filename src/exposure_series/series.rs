//! Exposure series: discovery, validation, materialization.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::exposure_series::common::error::{Result, SeriesError};
use crate::exposure_series::metadata::MetadataReader;
use crate::exposure_series::raw::RawFrameReader;
use crate::exposure_series::saturation::estimate_saturation;

/// Tag values longer than this are rejected as likely binary payloads.
const MAX_TAG_VALUE_LEN: usize = 100;

/// One photograph of the bracket.
#[derive(Debug, Clone)]
pub struct Exposure {
    pub path: PathBuf,
    /// Linear exposure time in seconds, derived from the logarithmic
    /// shutter-speed value. Sort and duplicate-detection key.
    pub exposure: f64,
    /// Nominal exposure time as the camera reports it, for display only.
    pub shown_exposure: f64,
    /// Normalized linear pixels, row-major, tightly packed. Populated by
    /// [`ExposureSeries::load`].
    pub image: Option<Vec<f32>>,
}

impl Exposure {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            exposure: 0.0,
            shown_exposure: 0.0,
            image: None,
        }
    }
}

impl fmt::Display for Exposure {
    /// Renders the nominal time the way cameras do: `1/N s` below one
    /// second, plain seconds at or above.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown_exposure > 0.0 && self.shown_exposure < 1.0 {
            write!(f, "1/{:.0} s", 1.0 / self.shown_exposure)
        } else {
            write!(f, "{} s", self.shown_exposure)
        }
    }
}

/// An ordered bracket of exposures plus everything the merge stage needs:
/// the series-wide metadata map, the common frame dimensions and the
/// saturation estimate.
#[derive(Debug, Default)]
pub struct ExposureSeries {
    pub exposures: Vec<Exposure>,
    /// Auxiliary metadata collected across all exposures; differing values
    /// for one key are "; "-joined.
    pub metadata: BTreeMap<String, String>,
    pub width: usize,
    pub height: usize,
    /// Normalized intensity considered overexposed, estimated from the
    /// brightest shot.
    pub saturation: f32,
}

impl ExposureSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.exposures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposures.is_empty()
    }

    /// Expand `pattern` into exposures by probing the filesystem.
    ///
    /// The pattern may contain one `%d` (or zero-padded, e.g. `%04d`)
    /// placeholder. Probing starts at index 0 and stops at the first
    /// missing file; if nothing matched at all, the scan is repeated from
    /// index 1 for sequences numbered by 1-based camera firmware. A pattern
    /// without a placeholder names a single file. Finding no files is not
    /// an error here; `check` rejects an empty series.
    pub fn add(&mut self, pattern: &str) {
        let Some(placeholder) = Placeholder::parse(pattern) else {
            if Path::new(pattern).exists() {
                self.exposures.push(Exposure::new(pattern));
            }
            return;
        };

        if !self.scan(&placeholder, 0) {
            // Maybe the sequence starts at 1?
            self.scan(&placeholder, 1);
        }
    }

    fn scan(&mut self, placeholder: &Placeholder<'_>, start: usize) -> bool {
        let mut found = false;
        for index in start.. {
            let filename = placeholder.expand(index);
            if !Path::new(&filename).exists() {
                break;
            }
            debug!(file = %filename, "found exposure");
            self.exposures.push(Exposure::new(filename));
            found = true;
        }
        found
    }

    /// Validate the series from metadata alone, without touching pixel
    /// data.
    ///
    /// Derives each linear exposure time from the logarithmic shutter-speed
    /// value, enforces that every image shares the first image's ISO speed
    /// and aperture, merges auxiliary tags into the series metadata map,
    /// sorts by exposure time and rejects duplicate exposures. Non-manual
    /// exposure or focus modes only produce warnings.
    #[instrument(skip_all)]
    pub fn check<M: MetadataReader>(&mut self, reader: &M) -> Result<()> {
        if self.exposures.is_empty() {
            return Err(SeriesError::EmptySeries);
        }

        let mut iso_speed: Option<f64> = None;
        let mut aperture: Option<f64> = None;

        for exp in &mut self.exposures {
            let meta = reader.read(&exp.path)?;

            for (key, value) in &meta.tags {
                merge_tag(&mut self.metadata, key, value);
            }

            let value = meta
                .shutter_speed_value
                .ok_or_else(|| SeriesError::MissingField {
                    path: exp.path.clone(),
                    field: "shutter speed value",
                })?;
            exp.exposure = (-value).exp2();

            exp.shown_exposure = meta.exposure_time.ok_or_else(|| SeriesError::MissingField {
                path: exp.path.clone(),
                field: "exposure time",
            })?;

            let iso = meta.iso_speed.ok_or_else(|| SeriesError::MissingField {
                path: exp.path.clone(),
                field: "ISO speed",
            })?;
            match iso_speed {
                None => iso_speed = Some(iso),
                Some(expected) if iso != expected => {
                    return Err(SeriesError::IsoMismatch {
                        path: exp.path.clone(),
                        expected,
                        found: iso,
                    });
                }
                Some(_) => {}
            }

            let fnumber = meta.aperture.ok_or_else(|| SeriesError::MissingField {
                path: exp.path.clone(),
                field: "aperture setting",
            })?;
            match aperture {
                None => aperture = Some(fnumber),
                Some(expected) if fnumber != expected => {
                    return Err(SeriesError::ApertureMismatch {
                        path: exp.path.clone(),
                        expected,
                        found: fnumber,
                    });
                }
                Some(_) => {}
            }

            if let Some(mode) = &meta.exposure_mode {
                if !is_manual(mode) {
                    warn!(path = %exp.path.display(), mode = %mode,
                        "image was *not* taken in manual exposure mode");
                }
            }

            if let Some(mode) = &meta.focus_mode {
                if !is_manual(mode) {
                    warn!(path = %exp.path.display(), mode = %mode,
                        "image was *not* taken in manual focus mode");
                }
            }
        }

        self.exposures.sort_by(|a, b| {
            a.exposure
                .partial_cmp(&b.exposure)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        if let Some(dup) = self
            .exposures
            .windows(2)
            .find(|pair| pair[0].exposure == pair[1].exposure)
        {
            return Err(SeriesError::DuplicateExposure(dup[0].to_string()));
        }

        let listing = self
            .exposures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            count = self.exposures.len(),
            iso = iso_speed.unwrap_or(0.0),
            aperture = %format_aperture(aperture.unwrap_or(0.0)),
            "validated exposure series"
        );
        info!("exposures: {}", listing);
        info!(entries = self.metadata.len(), "collected metadata");

        Ok(())
    }

    /// Decode all exposures in parallel and estimate the saturation point.
    ///
    /// Expects a series that passed `check`: sorted by exposure time, free
    /// of duplicates. Each worker decodes one file and writes only its own
    /// image slot; the first failing worker aborts the batch once in-flight
    /// decodes have joined.
    #[instrument(skip_all)]
    pub fn load<R: RawFrameReader + Sync>(&mut self, reader: &R) -> Result<()> {
        if self.exposures.is_empty() {
            return Err(SeriesError::EmptySeries);
        }

        let total = self.exposures.len();
        info!(count = total, "loading raw image data");

        let completed = AtomicUsize::new(0);
        let dimensions: Vec<(usize, usize)> = self
            .exposures
            .par_iter_mut()
            .map(|exp| {
                let frame = reader.read_frame(&exp.path)?;
                exp.image = Some(frame.normalize());
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                debug!(done, total, path = %exp.path.display(), "decoded");
                Ok((frame.width, frame.height))
            })
            .collect::<Result<_>>()?;

        // All frames are assumed to share the first one's dimensions.
        let (width, height) = dimensions[0];
        self.width = width;
        self.height = height;

        let memory_mib = (width * height * size_of::<f32>() * total) as f64 / (1024.0 * 1024.0);
        info!(
            width,
            height,
            "loaded {} exposures, using {:.1} MiB of memory",
            total,
            memory_mib
        );

        // The longest exposure is the one most likely to clip; its upper
        // percentile stands in for the sensor's full-well response.
        let brightest = self
            .exposures
            .last()
            .and_then(|exp| exp.image.as_deref())
            .ok_or(SeriesError::EmptySeries)?;
        self.saturation = estimate_saturation(brightest)
            .ok_or(SeriesError::InvalidDimensions(width, height))?;

        info!(saturation = self.saturation, "saturation detected");

        Ok(())
    }
}

/// One printf-style numeric placeholder inside a filename pattern.
struct Placeholder<'a> {
    prefix: &'a str,
    suffix: &'a str,
    pad: usize,
}

impl<'a> Placeholder<'a> {
    /// Accepts `%d` and zero-padded forms like `%04d`. Anything else makes
    /// the whole pattern a literal filename.
    fn parse(pattern: &'a str) -> Option<Self> {
        let percent = pattern.find('%')?;
        let rest = &pattern[percent + 1..];
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        let after = &rest[digits..];
        if !after.starts_with('d') {
            return None;
        }
        let pad = if digits > 0 {
            rest[..digits].parse().ok()?
        } else {
            0
        };
        Some(Self {
            prefix: &pattern[..percent],
            suffix: &after[1..],
            pad,
        })
    }

    fn expand(&self, index: usize) -> String {
        format!(
            "{}{:0pad$}{}",
            self.prefix,
            index,
            self.suffix,
            pad = self.pad
        )
    }
}

fn is_manual(mode: &str) -> bool {
    mode.to_ascii_lowercase().contains("manual")
}

fn format_aperture(aperture: f64) -> String {
    if aperture == 0.0 {
        "f/unknown".to_string()
    } else {
        format!("f/{aperture}")
    }
}

/// Merge one serialized tag into the series metadata map. The first value
/// for a key wins; a later differing value is appended "; "-separated so
/// cross-exposure variation (timestamps and the like) stays visible
/// without failing the run.
fn merge_tag(metadata: &mut BTreeMap<String, String>, key: &str, value: &str) {
    if value.len() > MAX_TAG_VALUE_LEN {
        return;
    }
    match metadata.get_mut(key) {
        None => {
            metadata.insert(key.to_string(), value.to_string());
        }
        Some(current) => {
            if current != value {
                current.push_str("; ");
                current.push_str(value);
            }
        }
    }
}

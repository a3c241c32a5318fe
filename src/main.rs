use hdrstack::exposure_series::{ExifMetadataReader, ExposureSeries, RawLoaderFrameReader};
use hdrstack::logger;

use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init();

    let Some(pattern) = std::env::args().nth(1) else {
        eprintln!("usage: hdrstack <pattern, e.g. img_%d.cr2>");
        std::process::exit(2);
    };

    info!(pattern = %pattern, "Scanning for exposure series");

    let mut series = ExposureSeries::new();
    series.add(&pattern);

    series.check(&ExifMetadataReader)?;

    match series.load(&RawLoaderFrameReader) {
        Ok(()) => info!(
            exposures = series.len(),
            saturation = series.saturation,
            "Exposure series ready for merging"
        ),
        Err(e) => {
            error!("Loading failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

//! Prints per-exposure intensity statistics for a loaded series, useful for
//! eyeballing how much headroom each shot has before the saturation point.

use hdrstack::exposure_series::{ExifMetadataReader, ExposureSeries, RawLoaderFrameReader};
use hdrstack::logger;

fn main() -> anyhow::Result<()> {
    logger::init();

    let pattern = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "img_%d.cr2".to_string());

    let mut series = ExposureSeries::new();
    series.add(&pattern);
    series.check(&ExifMetadataReader)?;
    series.load(&RawLoaderFrameReader)?;

    println!(
        "Series: {} exposures, {}x{} pixels, saturation {:.4}",
        series.len(),
        series.width,
        series.height,
        series.saturation
    );

    for exp in &series.exposures {
        let Some(image) = exp.image.as_deref() else {
            continue;
        };

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut clipped = 0usize;
        for &v in image {
            min = min.min(v);
            max = max.max(v);
            sum += f64::from(v);
            if v >= series.saturation {
                clipped += 1;
            }
        }
        let mean = sum / image.len() as f64;

        println!(
            "{} ({}): range [{:.4}, {:.4}], mean {:.4}, {} clipped pixels ({:.2}%)",
            exp.path.display(),
            exp,
            min,
            max,
            mean,
            clipped,
            100.0 * clipped as f64 / image.len() as f64
        );
    }

    Ok(())
}

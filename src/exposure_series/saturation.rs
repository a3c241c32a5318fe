//! Saturation estimation

use std::cmp::Ordering;

/// Fraction of pixels that must fall at or below the saturation estimate.
pub const SATURATION_PERCENTILE: f64 = 0.999;

/// Value at the count-based 99.9th percentile of `pixels`, i.e. the element
/// that would sit at sorted index `floor(n * 0.999)`.
///
/// A high percentile instead of the true maximum keeps a handful of hot or
/// defective pixels from inflating the estimate. Selection runs in average
/// linear time on a scratch copy; the input slice is left untouched.
/// Returns `None` for an empty slice.
pub fn estimate_saturation(pixels: &[f32]) -> Option<f32> {
    if pixels.is_empty() {
        return None;
    }
    let mut scratch = pixels.to_vec();
    let index = ((scratch.len() as f64 * SATURATION_PERCENTILE) as usize).min(scratch.len() - 1);
    let (_, value, _) =
        scratch.select_nth_unstable_by(index, |a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    Some(*value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_count_based_percentile_position() {
        // 0..1000 in reverse; floor(1000 * 0.999) = 999, the maximum.
        let pixels: Vec<f32> = (0..1000).rev().map(|v| v as f32).collect();
        assert_eq!(estimate_saturation(&pixels), Some(999.0));
    }

    #[test]
    fn ignores_isolated_hot_pixels() {
        // One wildly hot pixel out of 2000 sits above the percentile cut:
        // floor(2000 * 0.999) = 1998 selects the second-largest value.
        let mut pixels: Vec<f32> = (0..1999).map(|v| v as f32 / 2048.0).collect();
        pixels.push(1000.0);
        assert_eq!(estimate_saturation(&pixels), Some(1998.0 / 2048.0));
    }

    #[test]
    fn small_buffers_pick_an_existing_value() {
        let pixels = vec![0.75, 0.25, 0.5];
        assert_eq!(estimate_saturation(&pixels), Some(0.75));
    }

    #[test]
    fn repeated_runs_agree() {
        let pixels: Vec<f32> = (0..4096).map(|v| ((v * 37) % 1000) as f32 / 1000.0).collect();
        assert_eq!(estimate_saturation(&pixels), estimate_saturation(&pixels));
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        assert_eq!(estimate_saturation(&[]), None);
    }
}

//! Decoded sensor frame

/// One decoded sensor plane with its calibration levels, before
/// normalization.
///
/// `data` may be wider than the active image area: `pitch` is the row
/// stride in samples and `offset_x`/`offset_y` locate the active area
/// inside the plane. `width`/`height` always describe the cropped active
/// area.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: usize,
    pub height: usize,
    /// Row stride of `data`, in samples.
    pub pitch: usize,
    pub offset_x: usize,
    pub offset_y: usize,
    /// Dark-noise floor of the sensor.
    pub black_level: u16,
    /// Maximum raw sample the sensor produces.
    pub white_level: u16,
    pub data: Vec<u16>,
}

impl RawFrame {
    /// Map every active-area sample to linear light:
    /// `(raw - black_level) / (white_level - black_level)`.
    ///
    /// The result is tightly packed row-major regardless of the source
    /// pitch. Samples outside the calibration range come out below 0 or
    /// above 1 and are kept as-is; clamping is the consumer's decision.
    pub fn normalize(&self) -> Vec<f32> {
        let offset = f32::from(self.black_level);
        let factor = 1.0 / (f32::from(self.white_level) - offset);

        let mut image = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let start = (self.offset_y + y) * self.pitch + self.offset_x;
            let row = &self.data[start..start + self.width];
            image.extend(row.iter().map(|&s| (f32::from(s) - offset) * factor));
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_frame(data: Vec<u16>, black_level: u16, white_level: u16) -> RawFrame {
        RawFrame {
            width: data.len(),
            height: 1,
            pitch: data.len(),
            offset_x: 0,
            offset_y: 0,
            black_level,
            white_level,
            data,
        }
    }

    #[test]
    fn maps_calibration_levels_to_unit_range() {
        let frame = plain_frame(vec![512, 768, 1024], 512, 1024);
        assert_eq!(frame.normalize(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn keeps_out_of_range_samples_unclamped() {
        let frame = plain_frame(vec![256, 1536], 512, 1024);
        assert_eq!(frame.normalize(), vec![-0.5, 2.0]);
    }

    #[test]
    fn packs_padded_rows_tight() {
        // 2x2 active area inside a 4-sample-wide plane with a 1-sample
        // border on the left and top.
        let frame = RawFrame {
            width: 2,
            height: 2,
            pitch: 4,
            offset_x: 1,
            offset_y: 1,
            black_level: 0,
            white_level: 64,
            data: vec![
                9, 9, 9, 9, //
                9, 16, 32, 9, //
                9, 48, 64, 9, //
            ],
        };
        assert_eq!(frame.normalize(), vec![0.25, 0.5, 0.75, 1.0]);
    }
}

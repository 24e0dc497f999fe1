//! Sample classification.
//!
//! Every sample is turned into an occupancy probability and thresholded:
//!
//! ```text
//! p = negate ? (max_val - sample) / max_val : sample / max_val
//! p > occupied_thresh  → Occupied  (stored as max_val)
//! p < free_thresh      → Free      (stored as 0)
//! otherwise            → Unknown   (stored as round(p * max_val))
//! ```
//!
//! Both comparisons are strict, so a sample exactly on either threshold is Unknown.

use crate::core::CellState;

use super::calibration::Calibration;
use super::classified::ClassifiedGrid;
use super::error::DecodeError;
use super::raster::{BINARY_GRAY_MAGIC, RasterHeader};

/// Decoder from raw raster samples to a [`ClassifiedGrid`].
pub struct GridDecoder;

impl GridDecoder {
    /// Decode `samples` into a classified grid.
    ///
    /// Fails with [`DecodeError::Format`] when the header declares anything but
    /// a single-channel 8-bit binary raster (including `max_val == 0`), and with
    /// [`DecodeError::SizeMismatch`] when the payload is not exactly
    /// `width * height` bytes.
    pub fn decode(
        header: &RasterHeader,
        samples: &[u8],
        calibration: &Calibration,
    ) -> Result<ClassifiedGrid, DecodeError> {
        if header.magic != BINARY_GRAY_MAGIC {
            return Err(DecodeError::Format(format!(
                "unsupported raster type '{}', only {} is supported",
                header.magic, BINARY_GRAY_MAGIC
            )));
        }
        let max_val = Self::check_max_val(header.max_val)?;

        let expected = header.sample_count();
        if samples.len() != expected {
            return Err(DecodeError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let mut states = Vec::with_capacity(expected);
        let mut values = Vec::with_capacity(expected);
        for &sample in samples {
            let (state, value) = classify(sample, max_val, calibration);
            states.push(state);
            values.push(value);
        }

        Ok(ClassifiedGrid::from_parts(
            header.width,
            header.height,
            states,
            values,
        ))
    }

    /// Validate a declared `max_val`, returning it as a sample value.
    pub fn check_max_val(max_val: u32) -> Result<u8, DecodeError> {
        match max_val {
            0 => Err(DecodeError::Format("max_val must be positive".to_string())),
            1..=255 => Ok(max_val as u8),
            _ => Err(DecodeError::Format(format!(
                "max_val {} needs 16-bit samples, only 8-bit rasters are supported",
                max_val
            ))),
        }
    }
}

/// Classify one sample, returning its state and stored value.
#[inline]
pub fn classify(sample: u8, max_val: u8, calibration: &Calibration) -> (CellState, u8) {
    let max = max_val as f64;
    let p = if calibration.negate {
        (max - sample as f64) / max
    } else {
        sample as f64 / max
    };

    if p > calibration.occupied_thresh {
        (CellState::Occupied, max_val)
    } else if p < calibration.free_thresh {
        (CellState::Free, 0)
    } else {
        (CellState::Unknown, (p * max).round().clamp(0.0, max) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WorldPoint;

    fn calibration(negate: bool, occupied: f64, free: f64) -> Calibration {
        Calibration {
            resolution: 0.05,
            origin: WorldPoint::ZERO,
            origin_yaw: 0.0,
            negate,
            occupied_thresh: occupied,
            free_thresh: free,
            raster_width: 2,
            raster_height: 1,
            max_sample_value: 255,
        }
    }

    fn header(width: usize, height: usize, max_val: u32) -> RasterHeader {
        RasterHeader {
            magic: BINARY_GRAY_MAGIC.to_string(),
            width,
            height,
            max_val,
        }
    }

    #[test]
    fn test_two_pixel_scenario() {
        let grid = GridDecoder::decode(
            &header(2, 1, 255),
            &[0, 255],
            &calibration(false, 0.65, 0.196),
        )
        .unwrap();

        assert_eq!(grid.states(), &[CellState::Free, CellState::Occupied]);
        assert_eq!(grid.to_gray_bytes(), &[0, 255]);
    }

    #[test]
    fn test_negate_inverts_probability() {
        let grid = GridDecoder::decode(
            &header(2, 1, 255),
            &[0, 255],
            &calibration(true, 0.65, 0.196),
        )
        .unwrap();

        assert_eq!(grid.states(), &[CellState::Occupied, CellState::Free]);
    }

    #[test]
    fn test_threshold_boundaries_are_unknown() {
        // 65/100 and 20/100 land exactly on the thresholds
        let cal = calibration(false, 0.65, 0.2);
        assert_eq!(classify(65, 100, &cal), (CellState::Unknown, 65));
        assert_eq!(classify(20, 100, &cal), (CellState::Unknown, 20));
        assert_eq!(classify(66, 100, &cal).0, CellState::Occupied);
        assert_eq!(classify(19, 100, &cal).0, CellState::Free);
    }

    #[test]
    fn test_unknown_stores_scaled_probability() {
        let cal = calibration(true, 0.65, 0.196);
        // p = (255 - 155) / 255 ≈ 0.392 → round(0.392 * 255) = 100
        assert_eq!(classify(155, 255, &cal), (CellState::Unknown, 100));
    }

    #[test]
    fn test_unsupported_magic() {
        let mut h = header(2, 1, 255);
        h.magic = "P2".to_string();
        let result = GridDecoder::decode(&h, &[0, 255], &calibration(false, 0.65, 0.196));
        assert!(matches!(result, Err(DecodeError::Format(_))));
    }

    #[test]
    fn test_zero_and_wide_max_val() {
        let cal = calibration(false, 0.65, 0.196);
        assert!(matches!(
            GridDecoder::decode(&header(2, 1, 0), &[0, 0], &cal),
            Err(DecodeError::Format(_))
        ));
        assert!(matches!(
            GridDecoder::decode(&header(2, 1, 65535), &[0, 0], &cal),
            Err(DecodeError::Format(_))
        ));
    }

    #[test]
    fn test_size_mismatch() {
        let result = GridDecoder::decode(
            &header(2, 2, 255),
            &[0, 255, 0],
            &calibration(false, 0.65, 0.196),
        );
        assert_eq!(
            result,
            Err(DecodeError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
    }
}

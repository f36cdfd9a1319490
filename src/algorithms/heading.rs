//! Magnetometer vector to compass heading
//!
//! Two stages:
//! 1. raw heading: `atan2(y, x)` in degrees, folded into [0, 360) and rounded
//!    to whole degrees so the displayed direction does not jitter
//! 2. device heading: a fixed device-frame offset of -90°, wrapping with
//!    +271° (not +360°) when the subtraction would go negative
//!
//! The +271 wrap is a calibration constant and is reproduced as-is. It means
//! a raw heading of 89° maps to a device heading of 360°, which downstream
//! consumers (sector classification, face rotation) fold back to 0°.

use crate::core::{MagneticSample, DEVICE_FRAME_OFFSET_DEG, DEVICE_FRAME_WRAP_DEG};

/// Both stages of a heading computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Whole degrees, [0, 360)
    pub raw: f64,
    /// Whole degrees after the device-frame offset, [0, 360]
    pub device: f64,
}

impl Heading {
    pub fn from_sample(sample: &MagneticSample) -> Self {
        let raw = raw_heading(sample);
        Self {
            raw,
            device: device_heading(raw),
        }
    }
}

/// Stage 1: rounded heading of the horizontal field vector, in [0, 359].
///
/// Angles of 359.5° and above round to a full turn and are reported as 0, not
/// 360. Stage 2 then yields 271 for them where a plain round-then-shift would
/// yield 270. Keeping the raw heading inside [0, 360) takes priority over
/// that one-degree sliver.
pub fn raw_heading(sample: &MagneticSample) -> f64 {
    let v = sample.horizontal();
    let mut angle = v.y.atan2(v.x).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }

    let rounded = angle.round();
    if rounded >= 360.0 {
        0.0
    } else {
        rounded
    }
}

/// Stage 2: apply the fixed device-frame offset
pub fn device_heading(raw_heading: f64) -> f64 {
    let shifted = raw_heading - DEVICE_FRAME_OFFSET_DEG as f64;
    if shifted >= 0.0 {
        shifted
    } else {
        raw_heading + DEVICE_FRAME_WRAP_DEG as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_raw_heading_cardinal_axes() {
        assert_eq!(raw_heading(&MagneticSample::new(1.0, 0.0)), 0.0);
        assert_eq!(raw_heading(&MagneticSample::new(0.0, 1.0)), 90.0);
        assert_eq!(raw_heading(&MagneticSample::new(-1.0, 0.0)), 180.0);
        assert_eq!(raw_heading(&MagneticSample::new(0.0, -1.0)), 270.0);
    }

    #[test]
    fn test_raw_heading_rounds_to_whole_degrees() {
        let angle = 33.4_f64.to_radians();
        let sample = MagneticSample::new(angle.cos(), angle.sin());
        assert_eq!(raw_heading(&sample), 33.0);

        let angle = 33.6_f64.to_radians();
        let sample = MagneticSample::new(angle.cos(), angle.sin());
        assert_eq!(raw_heading(&sample), 34.0);
    }

    #[test]
    fn test_raw_heading_just_below_full_turn() {
        let angle = 359.8_f64.to_radians();
        let sample = MagneticSample::new(angle.cos(), angle.sin());
        assert_eq!(raw_heading(&sample), 0.0);
    }

    #[test]
    fn test_full_turn_folds_to_zero_before_offset() {
        let angle = 359.6_f64.to_radians();
        let heading = Heading::from_sample(&MagneticSample::new(angle.cos(), angle.sin()));
        assert_eq!(heading, Heading { raw: 0.0, device: 271.0 });
    }

    #[test]
    fn test_zero_vector_reads_as_zero() {
        assert_eq!(raw_heading(&MagneticSample::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_device_heading_offset() {
        assert_eq!(device_heading(0.0), 271.0);
        assert_eq!(device_heading(90.0), 0.0);
        assert_eq!(device_heading(45.0), 316.0);
        assert_eq!(device_heading(180.0), 90.0);
        assert_eq!(device_heading(359.0), 269.0);
    }

    #[test]
    fn test_device_heading_asymmetric_wrap() {
        // +271 rather than +360
        assert_eq!(device_heading(89.0), 360.0);
        assert_eq!(device_heading(1.0), 272.0);
    }

    #[test]
    fn test_heading_from_sample() {
        let heading = Heading::from_sample(&MagneticSample::new(0.0, 1.0));
        assert_eq!(heading, Heading { raw: 90.0, device: 0.0 });
    }

    proptest! {
        #[test]
        fn prop_raw_heading_is_whole_degree_in_range(
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
        ) {
            let raw = raw_heading(&MagneticSample::new(x, y));
            prop_assert!((0.0..360.0).contains(&raw));
            prop_assert_eq!(raw, raw.trunc());
        }

        #[test]
        fn prop_device_heading_bounded(raw in 0u32..360) {
            let device = device_heading(raw as f64);
            prop_assert!((0.0..=360.0).contains(&device));
        }
    }
}

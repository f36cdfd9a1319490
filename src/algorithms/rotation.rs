//! Presentation rotations derived from heading and bearing

/// Rotation to apply to the compass face so magnetic north points screen-up.
///
/// `(360 - heading) mod 360`, always in [0, 360).
pub fn face_rotation(device_heading: f64) -> f64 {
    let rotation = (360.0 - device_heading).rem_euclid(360.0);
    if rotation >= 360.0 {
        0.0
    } else {
        rotation
    }
}

/// Rotation to apply to the target indicator.
///
/// Deliberately not wrapped: the sum may fall outside [0, 360) and
/// consumers rotate by the raw value.
pub fn target_rotation(face_rotation: f64, bearing_to_target: f64) -> f64 {
    face_rotation + bearing_to_target
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_face_rotation() {
        assert_eq!(face_rotation(0.0), 0.0);
        assert_eq!(face_rotation(90.0), 270.0);
        assert_eq!(face_rotation(271.0), 89.0);
        assert_eq!(face_rotation(360.0), 0.0);
    }

    #[test]
    fn test_target_rotation_is_not_wrapped() {
        assert_eq!(target_rotation(350.0, 58.0), 408.0);
        assert_eq!(target_rotation(10.0, -64.0), -54.0);
    }

    proptest! {
        #[test]
        fn prop_face_rotation_in_range(h in 0.0f64..=360.0) {
            let r = face_rotation(h);
            prop_assert!((0.0..360.0).contains(&r));
        }

        #[test]
        fn prop_target_rotation_is_plain_sum(
            h in 0.0f64..=360.0,
            b in -180.0f64..=180.0,
        ) {
            let face = face_rotation(h);
            prop_assert_eq!(target_rotation(face, b), face + b);
        }
    }
}

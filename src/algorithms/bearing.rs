//! Great-circle bearing and distance on a spherical Earth
//!
//! The bearing is the initial forward azimuth from the observer towards the
//! target, measured clockwise from true north. The spherical model is an
//! accepted approximation; no ellipsoidal refinement is applied.

use crate::core::{GeoPoint, EARTH_MEAN_RADIUS_KM};

/// Observers closer than this (in degrees, per axis) to the target are
/// treated as standing on it.
pub const COINCIDENT_EPSILON_DEG: f64 = 1e-9;

/// Initial great-circle bearing from `observer` to `target`, in degrees.
///
/// The result is signed, in (-180, 180]. Callers that need a value
/// compatible with a compass heading should pass it through
/// [`normalize_bearing`]. An observer standing on the target has no defined
/// bearing; this returns 0 in that case.
///
/// No range validation is performed on the inputs.
pub fn initial_bearing(observer: &GeoPoint, target: &GeoPoint) -> f64 {
    if is_coincident(observer, target) {
        return 0.0;
    }

    let phi_o = observer.latitude.to_radians();
    let phi_t = target.latitude.to_radians();
    let delta_lambda = (target.longitude - observer.longitude).to_radians();

    let y = delta_lambda.sin();
    let x = phi_o.cos() * phi_t.tan() - phi_o.sin() * delta_lambda.cos();

    let bearing = y.atan2(x).to_degrees();
    if bearing <= -180.0 {
        bearing + 360.0
    } else {
        bearing
    }
}

/// Fold a signed bearing into [0, 360)
pub fn normalize_bearing(bearing: f64) -> f64 {
    let wrapped = bearing.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Haversine distance between two points, in kilometres
pub fn great_circle_distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let phi_1 = from.latitude.to_radians();
    let phi_2 = to.latitude.to_radians();
    let d_phi = (to.latitude - from.latitude).to_radians();
    let d_lambda = (to.longitude - from.longitude).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi_1.cos() * phi_2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_MEAN_RADIUS_KM * c
}

fn is_coincident(a: &GeoPoint, b: &GeoPoint) -> bool {
    (a.latitude - b.latitude).abs() < COINCIDENT_EPSILON_DEG
        && (a.longitude - b.longitude).abs() < COINCIDENT_EPSILON_DEG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KAABA;
    use proptest::prelude::*;

    #[test]
    fn test_bearing_at_target_is_zero() {
        assert_eq!(initial_bearing(&KAABA, &KAABA), 0.0);
    }

    #[test]
    fn test_bearing_due_south_of_target() {
        let observer = GeoPoint::new(0.0, KAABA.longitude);
        assert!(initial_bearing(&observer, &KAABA).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_due_north_of_target() {
        let observer = GeoPoint::new(50.0, KAABA.longitude);
        assert!((initial_bearing(&observer, &KAABA) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_from_known_cities() {
        // New York: roughly north-east
        let new_york = GeoPoint::new(40.7128, -74.0060);
        let bearing = initial_bearing(&new_york, &KAABA);
        assert!((bearing - 58.5).abs() < 0.5, "got {}", bearing);

        // London: roughly south-east
        let london = GeoPoint::new(51.5074, -0.1278);
        let bearing = initial_bearing(&london, &KAABA);
        assert!((bearing - 119.0).abs() < 0.5, "got {}", bearing);
    }

    #[test]
    fn test_bearing_from_the_east_is_negative() {
        let jakarta = GeoPoint::new(-6.2088, 106.8456);
        let bearing = initial_bearing(&jakarta, &KAABA);
        assert!(bearing < 0.0);
        assert!((normalize_bearing(bearing) - 295.0).abs() < 1.0);
    }

    #[test]
    fn test_normalize_bearing() {
        assert_eq!(normalize_bearing(0.0), 0.0);
        assert_eq!(normalize_bearing(-90.0), 270.0);
        assert_eq!(normalize_bearing(180.0), 180.0);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert!(great_circle_distance_km(&KAABA, &KAABA).abs() < 1e-9);
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = great_circle_distance_km(&a, &b);
        assert!((d - 111.19).abs() < 0.05, "got {}", d);
    }

    proptest! {
        #[test]
        fn prop_bearing_in_signed_range(
            lat in -89.0f64..89.0,
            lon in -180.0f64..180.0,
        ) {
            let bearing = initial_bearing(&GeoPoint::new(lat, lon), &KAABA);
            prop_assert!(bearing > -180.0 && bearing <= 180.0);
        }

        #[test]
        fn prop_normalized_bearing_in_heading_range(bearing in -1.0e6f64..1.0e6) {
            let n = normalize_bearing(bearing);
            prop_assert!((0.0..360.0).contains(&n));
        }
    }
}

//! Core data types for the orientation engine

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Raw magnetometer reading in the device's horizontal plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagneticSample {
    pub x: f64,
    pub y: f64,
}

impl MagneticSample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project a 3-axis magnetometer reading onto the horizontal plane.
    ///
    /// The z component is discarded; no tilt compensation is applied.
    pub fn from_vector(field: &Vector3<f64>) -> Self {
        Self { x: field.x, y: field.y }
    }

    /// Horizontal field vector
    pub fn horizontal(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Horizontal field strength, in the sensor's native units
    pub fn magnitude(&self) -> f64 {
        self.horizontal().norm()
    }
}

impl From<Vector3<f64>> for MagneticSample {
    fn from(field: Vector3<f64>) -> Self {
        Self::from_vector(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vector_drops_vertical_component() {
        let sample = MagneticSample::from_vector(&Vector3::new(12.5, -3.0, 40.0));
        assert_eq!(sample, MagneticSample::new(12.5, -3.0));
    }

    #[test]
    fn test_magnitude() {
        let sample = MagneticSample::new(3.0, 4.0);
        assert!((sample.magnitude() - 5.0).abs() < 1e-12);
    }
}

//! Common API types and data structures

use crate::algorithms::Direction;
use crate::core::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Control-surface errors.
///
/// Sensor and permission failures are not reported here; they are data,
/// recorded in [`Lifecycle::Failed`] and the snapshot's `error_reason`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An initialization sequence is already running
    #[error("initialization already in progress")]
    Busy,
    /// No callback is registered under this handle
    #[error("no callback registered with handle {handle}")]
    CallbackNotFound { handle: u32 },
    /// Snapshot serialization failed
    #[error("failed to format snapshot: {0}")]
    Formatting(#[from] serde_json::Error),
}

/// Why an initialization attempt ended in `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    SensorUnavailable,
    LocationPermissionDenied,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::SensorUnavailable => "sensor unavailable",
            FailureReason::LocationPermissionDenied => "permission not granted",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Orchestrator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Idle,
    Initializing,
    Ready,
    Failed(FailureReason),
}

impl Lifecycle {
    pub fn is_ready(&self) -> bool {
        matches!(self, Lifecycle::Ready)
    }

    /// Idle and Initializing both count as loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Lifecycle::Idle | Lifecycle::Initializing)
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Lifecycle::Failed(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Idle => f.write_str("idle"),
            Lifecycle::Initializing => f.write_str("initializing"),
            Lifecycle::Ready => f.write_str("ready"),
            Lifecycle::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// What happened to the location fix in the current cycle.
///
/// A failed fix leaves the bearing at 0, which is indistinguishable from a
/// genuine bearing of 0 in the snapshot. This status tells them apart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum LocationStatus {
    #[default]
    NeverRequested,
    Fixed(GeoPoint),
    FixFailed { reason: String },
}

impl LocationStatus {
    pub fn position(&self) -> Option<GeoPoint> {
        match self {
            LocationStatus::Fixed(point) => Some(*point),
            _ => None,
        }
    }
}

/// The five per-sample derived values, always replaced together
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationReading {
    /// Whole degrees, [0, 360)
    pub raw_heading: f64,
    /// Whole degrees after the device-frame offset
    pub device_heading: f64,
    pub direction: Direction,
    /// [0, 360)
    pub face_rotation: f64,
    /// `face_rotation + bearing_to_target`, not wrapped
    pub target_rotation: f64,
}

impl Default for OrientationReading {
    fn default() -> Self {
        Self {
            raw_heading: 0.0,
            device_heading: 0.0,
            direction: Direction::N,
            face_rotation: 0.0,
            target_rotation: 0.0,
        }
    }
}

/// State owned by the orchestrator for one initialization cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientationState {
    /// Signed bearing to the target, (-180, 180]; 0 until a fix succeeds
    pub bearing_to_target: f64,
    /// Great-circle distance to the target, once a fix succeeds
    pub distance_to_target_km: Option<f64>,
    pub reading: OrientationReading,
    pub lifecycle: Lifecycle,
    pub location: LocationStatus,
    /// Samples applied in this cycle
    pub sample_count: u64,
}

impl OrientationState {
    /// Before the first sample the heading reads 0, which is not north
    pub fn has_sample(&self) -> bool {
        self.sample_count > 0
    }

    pub fn snapshot(&self) -> OrientationSnapshot {
        OrientationSnapshot {
            target_bearing_degrees: self.bearing_to_target,
            direction_label: self.reading.direction,
            heading_degrees: self.reading.device_heading,
            face_rotation_degrees: self.reading.face_rotation,
            target_rotation_degrees: self.reading.target_rotation,
            error_reason: self.lifecycle.failure().map(|r| r.message().to_string()),
            is_loading: self.lifecycle.is_loading(),
            heading_known: self.has_sample(),
            target_distance_km: self.distance_to_target_km,
            sample_count: self.sample_count,
        }
    }
}

/// Consumer-facing view of the orientation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientationSnapshot {
    pub target_bearing_degrees: f64,
    pub direction_label: Direction,
    pub heading_degrees: f64,
    pub face_rotation_degrees: f64,
    pub target_rotation_degrees: f64,
    pub error_reason: Option<String>,
    pub is_loading: bool,
    /// False until the first sample of the cycle has been applied
    pub heading_known: bool,
    pub target_distance_km: Option<f64>,
    pub sample_count: u64,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Multi-line human-readable text
    #[default]
    Text,
    /// One line of text
    CompactText,
    /// Single-line JSON object
    Json,
    /// Indented JSON
    PrettyJson,
    /// One CSV row
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        assert_eq!(FailureReason::SensorUnavailable.to_string(), "sensor unavailable");
        assert_eq!(
            FailureReason::LocationPermissionDenied.to_string(),
            "permission not granted"
        );
    }

    #[test]
    fn test_lifecycle_loading() {
        assert!(Lifecycle::Idle.is_loading());
        assert!(Lifecycle::Initializing.is_loading());
        assert!(!Lifecycle::Ready.is_loading());
        assert!(!Lifecycle::Failed(FailureReason::SensorUnavailable).is_loading());
    }

    #[test]
    fn test_snapshot_of_failed_state() {
        let state = OrientationState {
            lifecycle: Lifecycle::Failed(FailureReason::LocationPermissionDenied),
            ..Default::default()
        };
        let snapshot = state.snapshot();
        assert_eq!(snapshot.error_reason.as_deref(), Some("permission not granted"));
        assert!(!snapshot.is_loading);
        assert!(!snapshot.heading_known);
    }

    #[test]
    fn test_output_format_serde_names() {
        let json = serde_json::to_string(&OutputFormat::CompactText).unwrap();
        assert_eq!(json, "\"compact_text\"");
        let format: OutputFormat = serde_json::from_str("\"pretty_json\"").unwrap();
        assert_eq!(format, OutputFormat::PrettyJson);
    }
}

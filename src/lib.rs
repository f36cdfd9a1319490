//! Qibla compass engine
//!
//! Computes the great-circle bearing from the observer to the Kaaba and turns
//! a stream of magnetometer samples into a compass heading, an 8-point
//! direction label, and the rotations needed to draw a compass face and a
//! target indicator.

pub mod core;
pub mod algorithms;
pub mod hardware;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use self::core::{GeoPoint, MagneticSample, KAABA, SENSOR_INTERVAL_MS};
pub use algorithms::{Direction, Heading, classify, initial_bearing, normalize_bearing};
pub use hardware::{
    LocationProvider, SensorProvider, SensorSubscription, SampleSink, PermissionStatus,
    ProviderError, ProviderResult, MockLocationProvider, MockSensorProvider
};
pub use api::{
    OrientationOrchestrator, OrientationSnapshot, OrientationState, Lifecycle, FailureReason,
    LocationStatus, ApiError, ApiResult, OutputFormat, SnapshotFormatter, OrientationEvent,
    CallbackHandle
};
pub use utils::{CompassConfig, ConfigError, LogLevel};

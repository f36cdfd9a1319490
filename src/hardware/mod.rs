//! Boundary to the external location and magnetometer providers
//!
//! The engine never talks to platform services directly. It consumes the
//! traits defined here; platform bindings implement them, and `mock`
//! provides in-process implementations for tests and the demo binary.

pub mod location;
pub mod sensor;
pub mod mock;
pub mod error;

pub use location::{LocationProvider, PermissionStatus};
pub use sensor::{SensorProvider, SensorSubscription, SampleSink, SampleQueue, PushOutcome};
pub use mock::{MockLocationProvider, MockSensorProvider};
pub use error::{ProviderError, ProviderResult};

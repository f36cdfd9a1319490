//! Consumer-facing API
//!
//! The [`OrientationOrchestrator`] is the single stateful unit. Consumers
//! drive it with `initialize`/`reinitialize`/`teardown`, feed it samples via
//! `process_pending` or `on_sample`, and read snapshots directly or through
//! callbacks.

pub mod orchestrator;
pub mod callback;
pub mod types;
pub mod formatting;

pub use types::{
    ApiResult, ApiError, FailureReason, Lifecycle, LocationStatus, OrientationReading,
    OrientationSnapshot, OrientationState, OutputFormat
};
pub use orchestrator::OrientationOrchestrator;
pub use callback::{CallbackHandle, CallbackRegistry, EventCallback, OrientationEvent, SnapshotCallback};
pub use formatting::SnapshotFormatter;

//! Orientation orchestrator
//!
//! Owns the lifecycle (Idle → Initializing → Ready | Failed), drives the
//! external providers during initialization, and turns each magnetometer
//! sample into a new reading.
//!
//! Everything runs on the caller's thread. Samples reach the orchestrator
//! either through the bounded queue drained by [`OrientationOrchestrator::process_pending`]
//! or by calling [`OrientationOrchestrator::on_sample`] directly.

use crate::algorithms::{
    classify, face_rotation, great_circle_distance_km, initial_bearing, target_rotation, Heading,
};
use crate::api::callback::{CallbackHandle, CallbackRegistry, EventCallback, OrientationEvent, SnapshotCallback};
use crate::api::types::{
    ApiError, ApiResult, FailureReason, Lifecycle, LocationStatus, OrientationReading,
    OrientationSnapshot, OrientationState,
};
use crate::core::{GeoPoint, MagneticSample, KAABA, SENSOR_INTERVAL_MS};
use crate::hardware::{LocationProvider, SampleQueue, SensorProvider, SensorSubscription};
use crate::utils::config::CompassConfig;
use tracing::{debug, info, trace, warn};

/// Holds the live subscription and releases it exactly once
struct ActiveSubscription {
    inner: Option<Box<dyn SensorSubscription>>,
}

impl ActiveSubscription {
    fn new(subscription: Box<dyn SensorSubscription>) -> Self {
        Self {
            inner: Some(subscription),
        }
    }

    fn release(&mut self) {
        if let Some(mut subscription) = self.inner.take() {
            subscription.release();
            debug!("sensor subscription released");
        }
    }
}

impl Drop for ActiveSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Stateful engine combining location, magnetometer and the leaf
/// computations into a continuously updated orientation
pub struct OrientationOrchestrator {
    location: Box<dyn LocationProvider>,
    sensor: Box<dyn SensorProvider>,
    config: CompassConfig,
    state: OrientationState,
    subscription: Option<ActiveSubscription>,
    queue: Option<SampleQueue>,
    /// Queue drops already reported as events
    reported_drops: u64,
    callbacks: CallbackRegistry,
}

impl OrientationOrchestrator {
    /// Create an idle orchestrator; nothing is requested until
    /// [`initialize`](Self::initialize)
    pub fn new(
        location: Box<dyn LocationProvider>,
        sensor: Box<dyn SensorProvider>,
        config: CompassConfig,
    ) -> Self {
        Self {
            location,
            sensor,
            config,
            state: OrientationState::default(),
            subscription: None,
            queue: None,
            reported_drops: 0,
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Run one initialization sequence.
    ///
    /// Sensor unavailability and permission denial end the attempt in
    /// `Failed`; they are returned as the lifecycle, not as an error. A failed
    /// location fix is not fatal: the cycle still reaches `Ready` with a
    /// bearing of 0, and [`location_status`](Self::location_status) records
    /// the failure.
    ///
    /// Returns [`ApiError::Busy`] if a sequence is already running.
    pub fn initialize(&mut self) -> ApiResult<Lifecycle> {
        if self.state.lifecycle == Lifecycle::Initializing {
            return Err(ApiError::Busy);
        }

        // Initializing from Ready must not leak the previous stream
        self.release_subscription();
        self.state = OrientationState {
            lifecycle: self.state.lifecycle,
            ..OrientationState::default()
        };
        self.transition(Lifecycle::Initializing);

        if !self.sensor.is_available() {
            return Ok(self.fail(FailureReason::SensorUnavailable));
        }

        if !self.location.is_permission_granted()
            && !self.location.request_permission().is_granted()
        {
            return Ok(self.fail(FailureReason::LocationPermissionDenied));
        }

        match self.location.current_position() {
            Ok(position) => self.apply_fix(position),
            Err(err) => {
                warn!(error = %err, "location fix failed, continuing without bearing");
                self.state.location = LocationStatus::FixFailed {
                    reason: err.to_string(),
                };
                self.callbacks.notify_event(&OrientationEvent::LocationFixFailed {
                    reason: err.to_string(),
                });
            }
        }

        let (sink, queue) = SampleQueue::bounded(self.config.sample_queue_capacity);
        match self.sensor.subscribe(SENSOR_INTERVAL_MS, sink) {
            Ok(subscription) => {
                self.subscription = Some(ActiveSubscription::new(subscription));
                self.queue = Some(queue);
                self.reported_drops = 0;
                info!(interval_ms = SENSOR_INTERVAL_MS, "sensor subscription opened");
            }
            Err(err) => {
                warn!(error = %err, "sensor subscription failed");
                return Ok(self.fail(FailureReason::SensorUnavailable));
            }
        }

        self.transition(Lifecycle::Ready);
        Ok(self.state.lifecycle)
    }

    /// Apply one magnetometer sample.
    ///
    /// Ignored unless the orchestrator is `Ready`. Returns whether the
    /// sample was applied.
    pub fn on_sample(&mut self, sample: MagneticSample) -> bool {
        if !self.state.lifecycle.is_ready() {
            trace!(lifecycle = %self.state.lifecycle, "sample ignored");
            return false;
        }

        self.state.reading = reading_for(&sample, self.state.bearing_to_target);
        self.state.sample_count += 1;

        trace!(
            heading = self.state.reading.device_heading,
            direction = %self.state.reading.direction,
            field_strength = sample.magnitude(),
            "sample applied"
        );

        self.callbacks.notify_event(&OrientationEvent::SampleApplied {
            sequence: self.state.sample_count,
        });
        self.publish_snapshot();
        true
    }

    /// Apply every sample waiting in the queue, oldest first, so the state
    /// ends on the newest one.
    ///
    /// Returns the number of samples applied.
    pub fn process_pending(&mut self) -> usize {
        let (pending, dropped) = match &self.queue {
            Some(queue) => (queue.drain(), queue.dropped_count()),
            None => return 0,
        };

        if dropped > self.reported_drops {
            let count = dropped - self.reported_drops;
            self.reported_drops = dropped;
            debug!(count, "stale samples evicted from full queue");
            self.callbacks.notify_event(&OrientationEvent::SamplesDropped { count });
        }

        let mut applied = 0;
        for sample in pending {
            if self.on_sample(sample) {
                applied += 1;
            }
        }
        applied
    }

    /// Release the subscription and return to `Idle`. Safe to call in any
    /// state, any number of times.
    pub fn teardown(&mut self) {
        self.release_subscription();
        if self.state.lifecycle != Lifecycle::Idle {
            self.state = OrientationState {
                lifecycle: self.state.lifecycle,
                ..OrientationState::default()
            };
            self.transition(Lifecycle::Idle);
        }
    }

    /// Tear down and initialize again, e.g. to recover from `Failed` or to
    /// refresh the location fix
    pub fn reinitialize(&mut self) -> ApiResult<Lifecycle> {
        if self.state.lifecycle == Lifecycle::Initializing {
            return Err(ApiError::Busy);
        }
        self.teardown();
        self.initialize()
    }

    pub fn snapshot(&self) -> OrientationSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    /// Distinguishes "bearing is 0 because the fix failed" from a real 0
    pub fn location_status(&self) -> &LocationStatus {
        &self.state.location
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    pub fn register_snapshot_callback(&mut self, callback: SnapshotCallback) -> CallbackHandle {
        self.callbacks.register_snapshot_callback(callback)
    }

    pub fn register_event_callback(&mut self, callback: EventCallback) -> CallbackHandle {
        self.callbacks.register_event_callback(callback)
    }

    pub fn unregister_callback(&mut self, handle: CallbackHandle) -> ApiResult<()> {
        self.callbacks.unregister(handle)
    }

    fn apply_fix(&mut self, position: GeoPoint) {
        let bearing = initial_bearing(&position, &KAABA);
        self.state.bearing_to_target = bearing;
        self.state.distance_to_target_km = Some(great_circle_distance_km(&position, &KAABA));
        self.state.location = LocationStatus::Fixed(position);
        self.state.reading.target_rotation = target_rotation(self.state.reading.face_rotation, bearing);

        info!(
            latitude = position.latitude,
            longitude = position.longitude,
            bearing,
            "location fixed"
        );
        self.callbacks.notify_event(&OrientationEvent::LocationFixed {
            position,
            bearing_deg: bearing,
        });
    }

    fn fail(&mut self, reason: FailureReason) -> Lifecycle {
        warn!(%reason, "initialization failed");
        self.release_subscription();
        self.transition(Lifecycle::Failed(reason));
        self.state.lifecycle
    }

    fn release_subscription(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
        }
        // Samples from a released stream never reach a later cycle
        self.queue = None;
    }

    fn transition(&mut self, to: Lifecycle) {
        let from = self.state.lifecycle;
        self.state.lifecycle = to;
        info!(%from, %to, "lifecycle changed");
        self.callbacks.notify_event(&OrientationEvent::LifecycleChanged { from, to });
        self.publish_snapshot();
    }

    fn publish_snapshot(&self) {
        self.callbacks.notify_snapshot(&self.state.snapshot());
    }
}

/// Heading normalizer, sector classifier and rotation derivation for one
/// sample
fn reading_for(sample: &MagneticSample, bearing_to_target: f64) -> OrientationReading {
    let heading = Heading::from_sample(sample);
    let face = face_rotation(heading.device);
    OrientationReading {
        raw_heading: heading.raw,
        device_heading: heading.device,
        direction: classify(heading.device),
        face_rotation: face,
        target_rotation: target_rotation(face, bearing_to_target),
    }
}

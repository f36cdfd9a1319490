//! Mock providers for testing and development
//!
//! Both mocks are cheap to clone and share their state, so a test can keep
//! one handle while the orchestrator owns another.

use crate::core::{GeoPoint, MagneticSample};
use crate::hardware::{
    LocationProvider, PermissionStatus, ProviderError, ProviderResult, PushOutcome,
    SampleSink, SensorProvider, SensorSubscription,
};
use nalgebra::{Rotation2, Vector2};
use parking_lot::Mutex;
use std::sync::Arc;

/// Typical horizontal component of the Earth's field, microtesla
pub const MOCK_FIELD_STRENGTH_UT: f64 = 30.0;

#[derive(Debug)]
struct LocationState {
    permission_granted: bool,
    grant_on_request: bool,
    fix: Result<GeoPoint, String>,
    permission_requests: u32,
    position_requests: u32,
}

/// Mock geolocation service
#[derive(Debug, Clone)]
pub struct MockLocationProvider {
    state: Arc<Mutex<LocationState>>,
}

impl MockLocationProvider {
    /// Permission not yet granted, granted on request, fix at `position`
    pub fn new(position: GeoPoint) -> Self {
        Self {
            state: Arc::new(Mutex::new(LocationState {
                permission_granted: false,
                grant_on_request: true,
                fix: Ok(position),
                permission_requests: 0,
                position_requests: 0,
            })),
        }
    }

    /// Permission already granted before the engine asks
    pub fn pre_granted(position: GeoPoint) -> Self {
        let provider = Self::new(position);
        provider.state.lock().permission_granted = true;
        provider
    }

    /// The user refuses the permission prompt
    pub fn denied() -> Self {
        let provider = Self::new(GeoPoint::new(0.0, 0.0));
        provider.state.lock().grant_on_request = false;
        provider
    }

    /// Permission granted, but every fix fails with `reason`
    pub fn failing_fix(reason: &str) -> Self {
        let provider = Self::new(GeoPoint::new(0.0, 0.0));
        provider.state.lock().fix = Err(reason.to_string());
        provider
    }

    /// Change the position returned by later fixes
    pub fn set_position(&self, position: GeoPoint) {
        self.state.lock().fix = Ok(position);
    }

    /// Make later fixes fail
    pub fn fail_fixes(&self, reason: &str) {
        self.state.lock().fix = Err(reason.to_string());
    }

    /// Make later permission prompts succeed or fail
    pub fn set_grant_on_request(&self, grant: bool) {
        self.state.lock().grant_on_request = grant;
    }

    pub fn permission_requests(&self) -> u32 {
        self.state.lock().permission_requests
    }

    pub fn position_requests(&self) -> u32 {
        self.state.lock().position_requests
    }
}

impl LocationProvider for MockLocationProvider {
    fn is_permission_granted(&self) -> bool {
        self.state.lock().permission_granted
    }

    fn request_permission(&mut self) -> PermissionStatus {
        let mut state = self.state.lock();
        state.permission_requests += 1;
        if state.grant_on_request {
            state.permission_granted = true;
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn current_position(&mut self) -> ProviderResult<GeoPoint> {
        let mut state = self.state.lock();
        state.position_requests += 1;
        state
            .fix
            .clone()
            .map_err(|reason| ProviderError::PositionUnavailable { reason })
    }
}

#[derive(Debug, Default)]
struct SensorState {
    available: bool,
    refuse_subscription: bool,
    sink: Option<SampleSink>,
    active_subscription: Option<u32>,
    subscriptions_opened: u32,
    releases: u32,
    last_interval_ms: Option<u32>,
}

/// Mock magnetometer
#[derive(Debug, Clone)]
pub struct MockSensorProvider {
    state: Arc<Mutex<SensorState>>,
}

impl MockSensorProvider {
    /// An available magnetometer
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SensorState {
                available: true,
                ..Default::default()
            })),
        }
    }

    /// A device without a usable magnetometer
    pub fn unavailable() -> Self {
        let provider = Self::new();
        provider.state.lock().available = false;
        provider
    }

    /// Reports available but fails every subscribe call
    pub fn refusing_subscriptions() -> Self {
        let provider = Self::new();
        provider.state.lock().refuse_subscription = true;
        provider
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().available = available;
    }

    /// Deliver one sample to the active subscriber
    pub fn emit(&self, sample: MagneticSample) -> PushOutcome {
        match &self.state.lock().sink {
            Some(sink) => sink.push(sample),
            None => PushOutcome::Closed,
        }
    }

    /// Deliver a sample whose raw heading is `raw_heading_deg`
    pub fn emit_heading(&self, raw_heading_deg: f64) -> PushOutcome {
        self.emit(field_at(raw_heading_deg))
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.lock().active_subscription.is_some()
    }

    pub fn subscriptions_opened(&self) -> u32 {
        self.state.lock().subscriptions_opened
    }

    pub fn releases(&self) -> u32 {
        self.state.lock().releases
    }

    pub fn last_interval_ms(&self) -> Option<u32> {
        self.state.lock().last_interval_ms
    }
}

impl Default for MockSensorProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorProvider for MockSensorProvider {
    fn is_available(&self) -> bool {
        self.state.lock().available
    }

    fn subscribe(
        &mut self,
        interval_ms: u32,
        sink: SampleSink,
    ) -> ProviderResult<Box<dyn SensorSubscription>> {
        let mut state = self.state.lock();
        if !state.available {
            return Err(ProviderError::SensorUnavailable);
        }
        if state.refuse_subscription {
            return Err(ProviderError::SubscriptionFailed {
                reason: "mock refused subscription".to_string(),
            });
        }

        state.subscriptions_opened += 1;
        let id = state.subscriptions_opened;
        state.active_subscription = Some(id);
        state.last_interval_ms = Some(interval_ms);
        state.sink = Some(sink);

        Ok(Box::new(MockSubscription {
            id,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSubscription {
    id: u32,
    state: Arc<Mutex<SensorState>>,
}

impl SensorSubscription for MockSubscription {
    fn release(&mut self) {
        let mut state = self.state.lock();
        state.releases += 1;
        if state.active_subscription == Some(self.id) {
            state.active_subscription = None;
            state.sink = None;
        }
    }
}

/// Horizontal field vector that reads as `raw_heading_deg`
pub fn field_at(raw_heading_deg: f64) -> MagneticSample {
    let rotation = Rotation2::new(raw_heading_deg.to_radians());
    let field = rotation * Vector2::new(MOCK_FIELD_STRENGTH_UT, 0.0);
    MagneticSample::new(field.x, field.y)
}

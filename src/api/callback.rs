//! Snapshot and event callbacks
//!
//! Consumers that render the compass register a snapshot callback and
//! receive a fresh snapshot after every applied sample and lifecycle change.
//! Event callbacks expose diagnostics that the snapshot alone cannot show.

use crate::api::types::{ApiError, ApiResult, Lifecycle, OrientationSnapshot};
use crate::core::GeoPoint;
use std::collections::HashMap;

/// Callback function type for snapshot updates
pub type SnapshotCallback = Box<dyn Fn(&OrientationSnapshot) + Send>;

/// Callback function type for orchestrator events
pub type EventCallback = Box<dyn Fn(&OrientationEvent) + Send>;

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum OrientationEvent {
    /// Lifecycle transition
    LifecycleChanged {
        from: Lifecycle,
        to: Lifecycle,
    },
    /// Location fix obtained and bearing computed
    LocationFixed {
        position: GeoPoint,
        bearing_deg: f64,
    },
    /// Location fix failed; the cycle continues with a bearing of 0
    LocationFixFailed {
        reason: String,
    },
    /// A sample was applied to the state
    SampleApplied {
        sequence: u64,
    },
    /// The provider outran the queue and samples were discarded
    SamplesDropped {
        count: u64,
    },
}

/// Callback registration handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(u32);

impl CallbackHandle {
    fn new(id: u32) -> Self {
        CallbackHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Registered snapshot and event callbacks
#[derive(Default)]
pub struct CallbackRegistry {
    counter: u32,
    snapshot_callbacks: HashMap<CallbackHandle, SnapshotCallback>,
    event_callbacks: HashMap<CallbackHandle, EventCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_snapshot_callback(&mut self, callback: SnapshotCallback) -> CallbackHandle {
        let handle = self.next_handle();
        self.snapshot_callbacks.insert(handle, callback);
        handle
    }

    pub fn register_event_callback(&mut self, callback: EventCallback) -> CallbackHandle {
        let handle = self.next_handle();
        self.event_callbacks.insert(handle, callback);
        handle
    }

    pub fn unregister(&mut self, handle: CallbackHandle) -> ApiResult<()> {
        let removed = self.snapshot_callbacks.remove(&handle).is_some()
            || self.event_callbacks.remove(&handle).is_some();

        if removed {
            Ok(())
        } else {
            Err(ApiError::CallbackNotFound { handle: handle.id() })
        }
    }

    pub fn notify_snapshot(&self, snapshot: &OrientationSnapshot) {
        for callback in self.snapshot_callbacks.values() {
            callback(snapshot);
        }
    }

    pub fn notify_event(&self, event: &OrientationEvent) {
        for callback in self.event_callbacks.values() {
            callback(event);
        }
    }

    /// (snapshot, event) callback counts
    pub fn count(&self) -> (usize, usize) {
        (self.snapshot_callbacks.len(), self.event_callbacks.len())
    }

    fn next_handle(&mut self) -> CallbackHandle {
        self.counter += 1;
        CallbackHandle::new(self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::OrientationState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_register_and_notify() {
        let mut registry = CallbackRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        registry.register_snapshot_callback(Box::new(move |_: &OrientationSnapshot| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        registry.notify_snapshot(&OrientationState::default().snapshot());
        registry.notify_snapshot(&OrientationState::default().snapshot());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unregister() {
        let mut registry = CallbackRegistry::new();
        let snapshot_handle = registry.register_snapshot_callback(Box::new(|_: &OrientationSnapshot| {}));
        let event_handle = registry.register_event_callback(Box::new(|_: &OrientationEvent| {}));
        assert_ne!(snapshot_handle, event_handle);
        assert_eq!(registry.count(), (1, 1));

        registry.unregister(event_handle).unwrap();
        assert_eq!(registry.count(), (1, 0));

        let result = registry.unregister(event_handle);
        assert!(matches!(result, Err(ApiError::CallbackNotFound { .. })));
    }
}

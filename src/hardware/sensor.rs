//! Magnetometer provider interface and the sample queue between the
//! provider and the orchestrator

use crate::core::MagneticSample;
use crate::hardware::ProviderResult;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Abstraction over the platform magnetometer
pub trait SensorProvider {
    /// Whether a magnetometer is present and usable
    fn is_available(&self) -> bool;

    /// Start delivering samples to `sink` every `interval_ms`.
    ///
    /// Delivery stops when the returned subscription is released.
    fn subscribe(
        &mut self,
        interval_ms: u32,
        sink: SampleSink,
    ) -> ProviderResult<Box<dyn SensorSubscription>>;
}

/// Handle for an active sample stream
pub trait SensorSubscription {
    /// Stop the stream. Called exactly once by the owner.
    fn release(&mut self);
}

/// Result of pushing one sample into a [`SampleSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Sample is waiting to be applied
    Queued,
    /// Queue was full; the oldest pending sample was evicted to make room
    Displaced,
    /// The consumer side is gone
    Closed,
}

#[derive(Debug)]
struct Pending {
    samples: Mutex<VecDeque<MagneticSample>>,
    capacity: usize,
    dropped: AtomicU64,
}

/// Producer half of the bounded sample queue, handed to the provider
#[derive(Debug, Clone)]
pub struct SampleSink {
    pending: Weak<Pending>,
}

impl SampleSink {
    /// Offer a sample without blocking the provider.
    ///
    /// The newest sample always gets in; a full queue gives up its oldest.
    pub fn push(&self, sample: MagneticSample) -> PushOutcome {
        let Some(pending) = self.pending.upgrade() else {
            return PushOutcome::Closed;
        };

        let mut samples = pending.samples.lock();
        let outcome = if samples.len() >= pending.capacity {
            samples.pop_front();
            pending.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("sample queue full, evicting oldest sample");
            PushOutcome::Displaced
        } else {
            PushOutcome::Queued
        };
        samples.push_back(sample);
        outcome
    }
}

/// Consumer half of the bounded sample queue, owned by the orchestrator.
///
/// Dropping it closes every sink.
#[derive(Debug)]
pub struct SampleQueue {
    pending: Arc<Pending>,
}

impl SampleQueue {
    /// Create a queue holding at most `capacity` pending samples
    pub fn bounded(capacity: usize) -> (SampleSink, SampleQueue) {
        let pending = Arc::new(Pending {
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
            dropped: AtomicU64::new(0),
        });
        (
            SampleSink {
                pending: Arc::downgrade(&pending),
            },
            SampleQueue { pending },
        )
    }

    /// Next pending sample, oldest first
    pub fn try_next(&self) -> Option<MagneticSample> {
        self.pending.samples.lock().pop_front()
    }

    /// Take every pending sample at once, oldest first
    pub fn drain(&self) -> Vec<MagneticSample> {
        self.pending.samples.lock().drain(..).collect()
    }

    /// Samples evicted because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.pending.dropped.load(Ordering::Relaxed)
    }
}

//! # Telemetry Buffer
//!
//! Bounded, insertion-ordered storage for samples and operator events.
//!
//! Both containers evict from the front once full, so a long-running session
//! holds at most [`SAMPLE_CAPACITY`] samples and a configured number of
//! events.

use std::collections::VecDeque;

use super::{Event, Sample};

/// Maximum number of samples retained per session.
pub const SAMPLE_CAPACITY: usize = 1000;

/// Default bound on retained operator events.
pub const EVENT_CAPACITY: usize = 256;

/// Append-only bounded ring of telemetry samples.
///
/// Samples are kept strictly in insertion order. Once the ring is full, each
/// append evicts the oldest sample, so `len() <= capacity` holds after every
/// mutation.
#[derive(Debug, Clone)]
pub struct TelemetryBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl TelemetryBuffer {
    /// Create a buffer with the standard [`SAMPLE_CAPACITY`] bound.
    pub fn new() -> Self {
        Self::with_capacity(SAMPLE_CAPACITY)
    }

    /// Create a buffer with a custom bound. Zero is clamped to one so the
    /// latest sample can always be stored.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, evicting from the front if the ring is full.
    ///
    /// Amortized O(1).
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// All retained samples in insertion order.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Snapshot of the retained samples as a contiguous vector.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Drop all samples. Called when the operator switches data sources so
    /// simulated and device data never mix in one view.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded, insertion-ordered list of operator events.
///
/// The sample ring has a hard 1000-row cap; events get the same treatment so
/// a session left running for days cannot grow without bound.
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    capacity: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(EVENT_CAPACITY)),
            capacity,
        }
    }

    /// Record an event; an empty label becomes the default label.
    pub fn add_event(&mut self, timestamp_ms: i64, label: &str) {
        self.events.push_back(Event::new(timestamp_ms, label));
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    /// All retained events in insertion order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.events.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

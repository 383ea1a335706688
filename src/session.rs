//! # Session State
//!
//! The single mutable store for one operator session, owned by the host
//! loop and passed by reference into the core transforms.
//!
//! The core components themselves stay pure: everything session-scoped
//! (buffer, events, shading toggle, chosen source, window size) lives here,
//! and [`SessionState::snapshot`] recomputes every derived view from it.

use serde::Serialize;

use crate::analysis::{compute_iv_curve, HealthInputs, HealthModel, IvPoint, ThresholdModel};
use crate::config::Config;
use crate::source::SourceKind;
use crate::telemetry::buffer::{EventLog, TelemetryBuffer};
use crate::telemetry::window::select_window;
use crate::telemetry::{Event, Sample};

/// Session-scoped state: the telemetry ring, event log, and operator
/// toggles.
pub struct SessionState {
    buffer: TelemetryBuffer,
    events: EventLog,
    shading: bool,
    source_kind: SourceKind,
    window_secs: u64,
    voc_nominal: f64,
    isc_nominal: f64,
    health_model: Box<dyn HealthModel + Send>,
}

/// Per-tick derived view handed to the renderer.
///
/// Recomputed from session state on every tick; nothing here is stored.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Active data source
    pub source: SourceKind,

    /// Shading toggle state
    pub shading: bool,

    /// Most recent sample, if any
    pub latest: Option<Sample>,

    /// Samples inside the display window, oldest first
    pub window: Vec<Sample>,

    /// Synthesized IV curve for the nominal ratings and shading state
    pub iv_curve: Vec<IvPoint>,

    /// Health score from the latest sample; absent until one arrives
    pub health_score: Option<f64>,

    /// Operator events in insertion order
    pub events: Vec<Event>,
}

impl SessionState {
    /// Build session state from the operator configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            buffer: TelemetryBuffer::new(),
            events: EventLog::with_capacity(config.events.capacity),
            shading: config.source.shading,
            source_kind: config.source.kind,
            window_secs: config.sampling.window_secs,
            voc_nominal: config.panel.voc_nominal,
            isc_nominal: config.panel.isc_nominal,
            health_model: Box::new(ThresholdModel::default()),
        }
    }

    /// Swap in a different scoring policy. Callers of [`snapshot`] are
    /// unaffected.
    ///
    /// [`snapshot`]: SessionState::snapshot
    pub fn with_health_model(mut self, model: Box<dyn HealthModel + Send>) -> Self {
        self.health_model = model;
        self
    }

    /// Record one sample. This is the tick's only buffer mutation.
    pub fn record(&mut self, sample: Sample) {
        self.buffer.append(sample);
    }

    /// Flip the shading toggle, returning the new state.
    pub fn toggle_shading(&mut self) -> bool {
        self.shading = !self.shading;
        self.shading
    }

    pub fn shading(&self) -> bool {
        self.shading
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Switch the data source, clearing the buffer so simulated and device
    /// data never mix in one view. A no-op when the kind is unchanged.
    pub fn switch_source(&mut self, kind: SourceKind) {
        if self.source_kind != kind {
            self.source_kind = kind;
            self.buffer.clear();
        }
    }

    /// Mark a timestamped operator event.
    pub fn add_event(&mut self, timestamp_ms: i64, label: &str) {
        self.events.add_event(timestamp_ms, label);
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    pub fn set_window_secs(&mut self, window_secs: u64) {
        self.window_secs = window_secs;
    }

    pub fn buffer(&self) -> &TelemetryBuffer {
        &self.buffer
    }

    /// Recompute every derived view from the current state.
    pub fn snapshot(&self) -> Snapshot {
        let latest = self.buffer.latest();
        let health_score = latest.map(|sample| {
            self.health_model.score(&HealthInputs {
                current_a: sample.current,
                shading_active: self.shading,
            })
        });

        Snapshot {
            source: self.source_kind,
            shading: self.shading,
            latest,
            window: select_window(&self.buffer, self.window_secs),
            iv_curve: compute_iv_curve(self.voc_nominal, self.isc_nominal, self.shading),
            health_score,
            events: self.events.to_vec(),
        }
    }
}

//! # Sample Source Module
//!
//! Two interchangeable producers behind one capability: ask for a sample,
//! get `Some(sample)` or `None`, never an error.
//!
//! - [`simulator::SimulatedSource`] synthesizes realistic panel telemetry
//!   and never fails
//! - [`feed::SerialFeedSource`] reads one line from a serial device per
//!   call, collapsing every fault to `None` so the acquisition tick is never
//!   interrupted by a flaky device

pub mod feed;
pub mod simulator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::telemetry::Sample;

/// Which producer a session draws samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Synthetic telemetry generated in-process
    Simulated,

    /// Line-oriented feed read from a serial device
    Serial,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Simulated => write!(f, "simulated"),
            SourceKind::Serial => write!(f, "serial"),
        }
    }
}

/// Capability implemented by every sample producer.
///
/// `produce` is total over its input domain: a source signals "nothing this
/// tick" with `None` and must never propagate a device fault to the caller.
#[async_trait]
pub trait SampleSource: Send {
    /// Produce at most one sample.
    async fn produce(&mut self) -> Option<Sample>;

    /// Which kind of producer this is.
    fn kind(&self) -> SourceKind;
}

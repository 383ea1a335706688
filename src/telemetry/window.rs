//! # Window Selector
//!
//! Filters the telemetry ring down to the most recent time span requested by
//! the operator.

use super::buffer::TelemetryBuffer;
use super::Sample;

/// Select the samples inside the trailing time window
///
/// The window is anchored to the newest sample's timestamp rather than
/// wall-clock "now", which keeps the selection deterministic and testable
/// independent of real time. The cutoff is inclusive: a sample stamped
/// exactly `t_max - window_secs * 1000` is part of the window.
///
/// # Arguments
///
/// * `buffer` - The session telemetry ring
/// * `window_secs` - Trailing span to keep, in seconds
///
/// # Returns
///
/// * `Vec<Sample>` - Matching samples in insertion order; empty if the
///   buffer is empty
pub fn select_window(buffer: &TelemetryBuffer, window_secs: u64) -> Vec<Sample> {
    let Some(newest) = buffer.latest() else {
        return Vec::new();
    };

    let cutoff = newest.timestamp_ms - (window_secs as i64) * 1000;
    buffer
        .samples()
        .filter(|s| s.timestamp_ms >= cutoff)
        .copied()
        .collect()
}

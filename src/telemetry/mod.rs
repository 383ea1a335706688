//! # Telemetry Module
//!
//! Core telemetry data model and the device wire codec.
//!
//! This module handles:
//! - The [`Sample`] and [`Event`] types shared by the whole pipeline
//! - Decoding one device line into a structured sample ([`parse_line`])
//! - Formatting a sample back into the wire format ([`Sample::to_line`])
//! - The bounded sample ring and event log ([`buffer`])
//! - Time-window selection over the ring ([`window`])
//!
//! ## Wire format
//!
//! The device feed emits one sample per line, four comma-separated fields,
//! no escaping:
//!
//! ```text
//! timestamp_ms,voltage,current,temperature
//! 1000,38.2,9.1,25.0
//! ```
//!
//! [`parse_line`] is the single chokepoint for malformed-input tolerance:
//! anything that does not decode cleanly becomes `None`, never an error.

pub mod buffer;
pub mod window;

use serde::{Deserialize, Serialize};

/// Default label applied to operator events recorded without one.
pub const DEFAULT_EVENT_LABEL: &str = "Event";

/// One telemetry reading from the panel, real or simulated.
///
/// Immutable once created; timestamps are wall-clock milliseconds since the
/// Unix epoch as reported by the producing source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Acquisition time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,

    /// Module voltage in volts
    pub voltage: f64,

    /// Module current in amperes
    pub current: f64,

    /// Module temperature in degrees Celsius
    pub temperature: f64,
}

impl Sample {
    /// Construct a sample from its four fields.
    pub fn new(timestamp_ms: i64, voltage: f64, current: f64, temperature: f64) -> Self {
        Self {
            timestamp_ms,
            voltage,
            current,
            temperature,
        }
    }

    /// Format this sample as one device wire line (without the trailing
    /// newline).
    ///
    /// Parsing the result with [`parse_line`] yields a field-wise equal
    /// sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use solar_sense::telemetry::Sample;
    ///
    /// let line = Sample::new(1000, 38.2, 9.1, 25.0).to_line();
    /// assert_eq!(line, "1000,38.2,9.1,25");
    /// ```
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.timestamp_ms, self.voltage, self.current, self.temperature
        )
    }
}

/// A timestamped operator annotation.
///
/// Events are ordered by insertion, not by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Time the event was marked, milliseconds since the Unix epoch
    pub timestamp_ms: i64,

    /// Free-text label; never empty
    pub label: String,
}

impl Event {
    /// Construct an event, substituting [`DEFAULT_EVENT_LABEL`] when the
    /// label is empty after trimming.
    pub fn new(timestamp_ms: i64, label: &str) -> Self {
        let label = label.trim();
        let label = if label.is_empty() {
            DEFAULT_EVENT_LABEL.to_string()
        } else {
            label.to_string()
        };
        Self {
            timestamp_ms,
            label,
        }
    }
}

/// Decode one raw device line into a [`Sample`]
///
/// Whitespace is trimmed from the whole line and from each field before
/// parsing.
///
/// # Arguments
///
/// * `raw` - One line of feed text, with or without the trailing newline
///
/// # Returns
///
/// * `Option<Sample>` - The decoded sample, or `None` if the line is empty,
///   does not have exactly four comma-separated fields, or any field fails
///   numeric parsing
///
/// # Examples
///
/// ```
/// use solar_sense::telemetry::{parse_line, Sample};
///
/// assert_eq!(
///     parse_line("1000,38.2,9.1,25.0"),
///     Some(Sample::new(1000, 38.2, 9.1, 25.0))
/// );
/// assert_eq!(parse_line("bad,data"), None);
/// ```
pub fn parse_line(raw: &str) -> Option<Sample> {
    let line = raw.trim();
    if line.is_empty() {
        return None;
    }

    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != 4 {
        return None;
    }

    let timestamp_ms = parts[0].trim().parse::<i64>().ok()?;
    let voltage = parts[1].trim().parse::<f64>().ok()?;
    let current = parts[2].trim().parse::<f64>().ok()?;
    let temperature = parts[3].trim().parse::<f64>().ok()?;

    Some(Sample::new(timestamp_ms, voltage, current, temperature))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let sample = parse_line("1000,38.2,9.1,25.0").unwrap();
        assert_eq!(sample.timestamp_ms, 1000);
        assert_eq!(sample.voltage, 38.2);
        assert_eq!(sample.current, 9.1);
        assert_eq!(sample.temperature, 25.0);
    }

    #[test]
    fn test_parse_line_trims_whitespace() {
        let sample = parse_line("  1000 , 38.2 ,9.1, 25.0 \r\n").unwrap();
        assert_eq!(sample, Sample::new(1000, 38.2, 9.1, 25.0));
    }

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \n"), None);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(parse_line("bad,data"), None);
        assert_eq!(parse_line("1,2,3"), None);
        assert_eq!(parse_line("1,2,3,4,5"), None);
    }

    #[test]
    fn test_parse_non_numeric_field() {
        assert_eq!(parse_line("1000,volts,9.1,25.0"), None);
        assert_eq!(parse_line("10.5,38.2,9.1,25.0"), None, "timestamp must be an integer");
    }

    #[test]
    fn test_parse_negative_values_accepted() {
        // Sub-zero temperature is a legitimate field reading
        let sample = parse_line("1000,38.2,9.1,-12.5").unwrap();
        assert_eq!(sample.temperature, -12.5);
    }

    #[test]
    fn test_wire_round_trip() {
        let original = Sample::new(1_700_000_000_123, 31.847, 2.091, 24.35);
        let parsed = parse_line(&original.to_line()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_event_label_defaults_when_empty() {
        assert_eq!(Event::new(5, "").label, DEFAULT_EVENT_LABEL);
        assert_eq!(Event::new(5, "   ").label, DEFAULT_EVENT_LABEL);
        assert_eq!(Event::new(5, " cloud cover ").label, "cloud cover");
    }
}

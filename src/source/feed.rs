//! # Serial Feed Sample Source
//!
//! Reads panel telemetry from a serial device, one line per acquisition
//! tick.
//!
//! This module handles:
//! - Transient port access: the port is opened and closed inside a single
//!   `produce` call, so no stale or locked handle survives between ticks
//! - A bounded read timeout, so a stalled device cannot block the tick
//! - Collapsing every failure path (open error, timeout, EOF, read error,
//!   parse failure) to `None`
//! - Port enumeration and the startup feed-capability probe

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::timeout;
use tokio_serial::SerialPortBuilderExt;
use tracing::{debug, warn};

use super::{SampleSource, SourceKind};
use crate::telemetry::{parse_line, Sample};

/// Serial feed handler
///
/// Holds only the connection parameters; the port itself is opened
/// transiently per read.
#[derive(Debug, Clone)]
pub struct SerialFeedSource {
    port: String,
    baud_rate: u32,
    read_timeout: Duration,
}

impl SerialFeedSource {
    /// Create a feed source for the given port and rate
    ///
    /// # Arguments
    ///
    /// * `port` - Device path (e.g., "/dev/ttyUSB0")
    /// * `baud_rate` - Feed rate parameter (e.g., 9600)
    /// * `read_timeout` - Bound on one read; derived from the refresh
    ///   interval by the caller
    pub fn new(port: impl Into<String>, baud_rate: u32, read_timeout: Duration) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            read_timeout,
        }
    }

    /// Device path this source reads from
    pub fn port(&self) -> &str {
        &self.port
    }
}

#[async_trait]
impl SampleSource for SerialFeedSource {
    /// Open the port, read one line within the timeout, parse it.
    ///
    /// Never propagates an error: any fault yields `None` and the
    /// acquisition loop proceeds with no new sample this tick.
    async fn produce(&mut self) -> Option<Sample> {
        let stream = match tokio_serial::new(&self.port, self.baud_rate).open_native_async() {
            Ok(stream) => stream,
            Err(e) => {
                debug!("Failed to open serial feed {}: {}", self.port, e);
                return None;
            }
        };

        let mut reader = BufReader::new(stream);
        read_sample(&mut reader, self.read_timeout).await
        // Port handle drops here; nothing persists across ticks
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Serial
    }
}

/// Read one wire line from `reader` within `read_timeout` and decode it
///
/// Factored out of [`SerialFeedSource::produce`] so the read-and-parse flow
/// is testable against in-memory readers without hardware.
///
/// # Returns
///
/// * `Option<Sample>` - `None` on timeout, closed feed (EOF), read error,
///   or parse failure
pub async fn read_sample<R>(reader: &mut R, read_timeout: Duration) -> Option<Sample>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    match timeout(read_timeout, reader.read_line(&mut line)).await {
        Err(_) => {
            debug!("Serial read timed out after {:?}", read_timeout);
            None
        }
        Ok(Err(e)) => {
            debug!("Serial read failed: {}", e);
            None
        }
        Ok(Ok(0)) => {
            debug!("Serial feed closed (EOF)");
            None
        }
        Ok(Ok(_)) => parse_line(&line),
    }
}

/// Enumerate serial port names visible on this host
///
/// Returns an empty list when enumeration fails; enumeration trouble is a
/// capability question, not an error.
pub fn available_ports() -> Vec<String> {
    match tokio_serial::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(e) => {
            warn!("Serial port enumeration failed: {}", e);
            Vec::new()
        }
    }
}

/// Feed availability, resolved once at startup.
///
/// The serial feed is an optional collaborator: when the host has no usable
/// serial stack, everything downstream degrades to "unavailable" instead of
/// failing to initialize.
#[derive(Debug, Clone)]
pub struct FeedCapability {
    ports: Option<Vec<String>>,
}

impl FeedCapability {
    /// Probe the host serial stack once.
    pub fn probe() -> Self {
        let ports = match tokio_serial::available_ports() {
            Ok(ports) => Some(ports.into_iter().map(|p| p.port_name).collect()),
            Err(e) => {
                warn!("Serial feed unavailable: {}", e);
                None
            }
        };
        Self { ports }
    }

    /// Whether the serial stack responded to the probe.
    pub fn is_available(&self) -> bool {
        self.ports.is_some()
    }

    /// Port names seen by the probe; empty when unavailable.
    pub fn ports(&self) -> &[String] {
        self.ports.as_deref().unwrap_or(&[])
    }
}

//! # Solar Sense
//!
//! Live telemetry loop for a solar PV module.
//!
//! This binary is the host collaborator for the core pipeline: it owns the
//! session state, drives the acquisition tick at the configured refresh
//! rate, and emits one JSON snapshot line per tick on stdout for a
//! rendering front end to consume. Logs go to stderr so the snapshot
//! stream stays parseable.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Set up logging with tracing subscriber
//!    - Load operator configuration (TOML path as the first argument,
//!      built-in defaults otherwise)
//!    - Probe serial feed availability once
//!    - Construct the configured sample source
//!
//! 2. **Main Loop**
//!    - One `produce` per tick; a `None` tick carries no new sample
//!    - Append, recompute derived views, emit the snapshot line
//!    - Log status every [`STATUS_LOG_INTERVAL_TICKS`] ticks
//!    - Handle Ctrl+C for graceful shutdown
//!
//! # Examples
//!
//! Run against the shipped defaults:
//! ```bash
//! cargo run --release -- config/default.toml
//! ```
//!
//! Expected stderr output:
//! ```text
//! INFO solar_sense: Solar Sense v0.1.0 starting...
//! INFO solar_sense: Acquisition loop running (source: simulated, refresh: 1s)
//! INFO solar_sense: 30 ticks, 30 samples buffered, health 100
//! ```

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use tracing_subscriber;

mod analysis;
mod config;
mod error;
mod session;
mod source;
mod telemetry;

use config::Config;
use session::SessionState;
use source::feed::{FeedCapability, SerialFeedSource};
use source::simulator::SimulatedSource;
use source::{SampleSource, SourceKind};

/// Number of ticks between status log messages
const STATUS_LOG_INTERVAL_TICKS: u64 = 30;

/// Build the configured sample source.
///
/// A serial selection degrades to an unavailable feed (every tick yields no
/// sample) rather than failing startup; the fault is logged once here and
/// per-tick at debug level.
fn build_source(config: &Config, capability: &FeedCapability) -> Box<dyn SampleSource> {
    match config.source.kind {
        SourceKind::Simulated => Box::new(SimulatedSource::new(config.source.shading)),
        SourceKind::Serial => {
            if !capability.is_available() {
                warn!("Serial stack did not respond to probe; feed reads will yield no samples");
            } else if !capability.ports().iter().any(|p| p == &config.serial.port) {
                warn!(
                    "Configured port {} not among detected ports {:?}",
                    config.serial.port,
                    capability.ports()
                );
            }
            Box::new(SerialFeedSource::new(
                &config.serial.port,
                config.serial.baud_rate,
                Duration::from_millis(config.serial.timeout_ms),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging on stderr; stdout carries the snapshot stream
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Solar Sense v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => {
            info!("No configuration file given, using built-in defaults");
            Config::default()
        }
    };

    // Feed availability is resolved once; the loop never re-probes
    let capability = FeedCapability::probe();
    if capability.is_available() {
        debug!("Detected serial ports: {:?}", capability.ports());
    }

    let mut source = build_source(&config, &capability);
    let mut session = SessionState::new(&config);

    let mut tick_interval = interval(Duration::from_secs_f64(config.sampling.refresh_secs));

    info!(
        "Acquisition loop running (source: {}, refresh: {}s, window: {}s)",
        config.source.kind, config.sampling.refresh_secs, config.sampling.window_secs
    );
    info!("Press Ctrl+C to exit");

    let mut tick_count: u64 = 0;

    // Main acquisition loop: one sample per tick at most, then the derived
    // views are recomputed and handed to the renderer
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                match source.produce().await {
                    Some(sample) => session.record(sample),
                    None => debug!("No sample this tick"),
                }

                let snapshot = session.snapshot();
                println!("{}", serde_json::to_string(&snapshot)?);

                tick_count += 1;
                if tick_count % STATUS_LOG_INTERVAL_TICKS == 0 {
                    info!(
                        "{} ticks, {} samples buffered, health {}",
                        tick_count,
                        session.buffer().len(),
                        snapshot
                            .health_score
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "n/a".to_string())
                    );
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total ticks: {}", tick_count);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_interval_constant() {
        // At the default 1s refresh this logs every 30 seconds
        assert_eq!(STATUS_LOG_INTERVAL_TICKS, 30);
    }

    #[test]
    fn test_build_source_simulated() {
        let config = Config::default();
        let capability = FeedCapability::probe();
        let source = build_source(&config, &capability);
        assert_eq!(source.kind(), SourceKind::Simulated);
    }

    #[test]
    fn test_build_source_serial_degrades_without_hardware() {
        let mut config = Config::default();
        config.source.kind = SourceKind::Serial;
        config.serial.port = "/dev/nonexistent_solar_feed_12345".to_string();

        // Construction must succeed no matter what the host looks like;
        // produce() simply yields None later
        let capability = FeedCapability::probe();
        let source = build_source(&config, &capability);
        assert_eq!(source.kind(), SourceKind::Serial);
    }
}

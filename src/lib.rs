//! # Solar Sense Library
//!
//! Module-level solar PV telemetry: acquisition, windowing, and derived
//! diagnostics.
//!
//! This library provides the core pipeline behind the live dashboard:
//! sample production (simulated or from a serial feed), a bounded telemetry
//! buffer with operator events, time-window selection, IV-curve synthesis,
//! and health scoring. The rendering front end is an external collaborator
//! that owns session state and consumes [`session::Snapshot`] views.

pub mod analysis;
pub mod config;
pub mod error;
pub mod session;
pub mod source;
pub mod telemetry;

//! # Analysis Module
//!
//! Derived views computed from telemetry each tick: the IV-curve shape
//! approximation and the module health score.

pub mod health;
pub mod iv_curve;

pub use health::{compute_health_score, HealthInputs, HealthModel, ThresholdModel};
pub use iv_curve::{compute_iv_curve, compute_iv_curve_with, IvPoint, N_POINTS};

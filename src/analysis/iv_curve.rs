//! # IV Curve Synthesizer
//!
//! Produces a current-voltage curve from open-circuit voltage, short-circuit
//! current, and the shading flag.
//!
//! This is a shape approximation, not a diode-equation solve. The knee
//! exponent is the diagnostic signature the dashboard surfaces: a sharp knee
//! near Voc under normal operation, a flatter droop under partial shading.

use serde::{Deserialize, Serialize};

/// Number of points along the synthesized curve.
pub const N_POINTS: usize = 80;

/// Knee-sharpness exponent under normal operation.
const KNEE_EXPONENT: f64 = 4.0;

/// Knee-sharpness exponent under shading; lower means a flatter droop.
const KNEE_EXPONENT_SHADED: f64 = 2.2;

/// One point on a synthesized IV curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IvPoint {
    /// Voltage in volts
    pub voltage: f64,

    /// Current in amperes
    pub current: f64,
}

/// Synthesize an IV curve with the default point count
///
/// See [`compute_iv_curve_with`] for the algorithm and edge cases.
pub fn compute_iv_curve(voc: f64, isc: f64, shading: bool) -> Vec<IvPoint> {
    compute_iv_curve_with(voc, isc, shading, N_POINTS)
}

/// Synthesize an IV curve
///
/// Voltage is sampled uniformly from 0 to `voc` inclusive of both ends. For
/// each voltage the current is `isc * (1 - (v/voc)^k)` clamped to >= 0,
/// where the exponent `k` is 4.0 normally and 2.2 under shading. Current is
/// monotonically non-increasing in voltage by construction.
///
/// # Arguments
///
/// * `voc` - Open-circuit voltage (V)
/// * `isc` - Short-circuit current (A)
/// * `shading` - Whether the module is partially shaded
/// * `n_points` - Points along the curve; values below 2 are raised to 2 so
///   the sweep always spans both endpoints
///
/// # Returns
///
/// * `Vec<IvPoint>` - The curve, or the single degenerate point `(0, 0)`
///   when `voc` or `isc` is not positive ("no meaningful curve yet")
pub fn compute_iv_curve_with(voc: f64, isc: f64, shading: bool, n_points: usize) -> Vec<IvPoint> {
    if voc <= 0.0 || isc <= 0.0 {
        return vec![IvPoint {
            voltage: 0.0,
            current: 0.0,
        }];
    }

    let n_points = n_points.max(2);
    let k = if shading {
        KNEE_EXPONENT_SHADED
    } else {
        KNEE_EXPONENT
    };

    (0..n_points)
        .map(|idx| {
            let voltage = voc * idx as f64 / (n_points - 1) as f64;
            let x = (voltage / voc).clamp(0.0, 1.0);
            let current = (isc * (1.0 - x.powf(k))).max(0.0);
            IvPoint { voltage, current }
        })
        .collect()
}

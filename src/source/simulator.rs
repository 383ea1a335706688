//! # Simulated Sample Source
//!
//! Synthetic panel telemetry with an optional shading effect.
//!
//! The generator draws each electrical quantity from a band below its
//! nominal rating and adds uniform jitter, so consecutive samples wander the
//! way a real operating point does. Shading suppresses current far more
//! than voltage, matching single-diode behavior under partial shading.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{SampleSource, SourceKind};
use crate::telemetry::Sample;

/// Nominal open-circuit voltage of the simulated panel (V).
pub const VOC_NOMINAL: f64 = 38.0;
/// Nominal short-circuit current of the simulated panel (A).
pub const ISC_NOMINAL: f64 = 9.2;
/// Base module temperature (degrees C).
pub const T_BASE: f64 = 25.0;
/// Temperature jitter bound (degrees C).
pub const T_NOISE: f64 = 2.0;
/// Voltage jitter bound (V).
pub const V_NOISE: f64 = 0.3;
/// Current jitter bound (A).
pub const I_NOISE: f64 = 0.15;

/// Voltage multiplier under shading; voltage sags only slightly.
pub const SHADING_VOLTAGE_FACTOR: f64 = 0.92;
/// Current multiplier under shading; the dominant shading effect.
pub const SHADING_CURRENT_FACTOR: f64 = 0.25;

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Synthetic sample producer. Never returns `None`.
#[derive(Debug)]
pub struct SimulatedSource {
    shading: bool,
    rng: StdRng,
}

impl SimulatedSource {
    /// Create a generator with the given initial shading state.
    pub fn new(shading: bool) -> Self {
        Self {
            shading,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed RNG seed for deterministic output.
    pub fn seeded(shading: bool, seed: u64) -> Self {
        Self {
            shading,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn shading(&self) -> bool {
        self.shading
    }

    /// Update the shading flag; takes effect from the next sample.
    pub fn set_shading(&mut self, shading: bool) {
        self.shading = shading;
    }

    /// Generate one sample at the current wall-clock time.
    ///
    /// Voltage sits in 85-95 % of nominal Voc (x0.92 under shading) with
    /// +/-0.3 V of jitter; current sits in 80-95 % of nominal Isc (x0.25
    /// under shading) with +/-0.15 A of jitter, clamped to >= 0; temperature
    /// is 25 C +/- up to 2 C.
    pub fn generate(&mut self) -> Sample {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();

        let mut voltage = VOC_NOMINAL * (0.85 + 0.10 * self.rng.gen::<f64>());
        if self.shading {
            voltage *= SHADING_VOLTAGE_FACTOR;
        }
        voltage += (self.rng.gen::<f64>() - 0.5) * 2.0 * V_NOISE;

        let mut current = ISC_NOMINAL * (0.80 + 0.15 * self.rng.gen::<f64>());
        if self.shading {
            current *= SHADING_CURRENT_FACTOR;
        }
        current += (self.rng.gen::<f64>() - 0.5) * 2.0 * I_NOISE;
        current = current.max(0.0);

        let temperature = T_BASE + (self.rng.gen::<f64>() - 0.5) * 2.0 * T_NOISE;

        Sample::new(
            timestamp_ms,
            round_to(voltage, 3),
            round_to(current, 3),
            round_to(temperature, 2),
        )
    }
}

#[async_trait]
impl SampleSource for SimulatedSource {
    async fn produce(&mut self) -> Option<Sample> {
        Some(self.generate())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Simulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unshaded_bands() {
        let mut source = SimulatedSource::seeded(false, 42);
        for _ in 0..500 {
            let sample = source.generate();

            let v_min = VOC_NOMINAL * 0.85 - V_NOISE;
            let v_max = VOC_NOMINAL * 0.95 + V_NOISE;
            assert!(
                (v_min..=v_max).contains(&sample.voltage),
                "voltage {} outside band",
                sample.voltage
            );

            let i_min = ISC_NOMINAL * 0.80 - I_NOISE;
            let i_max = ISC_NOMINAL * 0.95 + I_NOISE;
            assert!(
                (i_min..=i_max).contains(&sample.current),
                "current {} outside band",
                sample.current
            );

            assert!((T_BASE - T_NOISE..=T_BASE + T_NOISE).contains(&sample.temperature));
        }
    }

    #[test]
    fn test_shading_suppresses_current_dominantly() {
        let mut source = SimulatedSource::seeded(true, 7);

        // Shaded current tops out well below the unshaded floor
        let shaded_i_max = ISC_NOMINAL * 0.95 * SHADING_CURRENT_FACTOR + I_NOISE;
        let unshaded_i_min = ISC_NOMINAL * 0.80 - I_NOISE;
        assert!(shaded_i_max < unshaded_i_min);

        for _ in 0..500 {
            let sample = source.generate();
            assert!(sample.current >= 0.0);
            assert!(sample.current <= shaded_i_max, "current {} too high for shading", sample.current);

            // Voltage only sags slightly
            let v_max = VOC_NOMINAL * 0.95 * SHADING_VOLTAGE_FACTOR + V_NOISE;
            assert!(sample.voltage <= v_max);
        }
    }

    #[test]
    fn test_set_shading_takes_effect() {
        let mut source = SimulatedSource::seeded(false, 3);
        assert!(!source.shading());

        source.set_shading(true);
        assert!(source.shading());

        let sample = source.generate();
        assert!(sample.current < ISC_NOMINAL * 0.5);
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let mut a = SimulatedSource::seeded(false, 99);
        let mut b = SimulatedSource::seeded(false, 99);

        let sa = a.generate();
        let sb = b.generate();
        assert_eq!(sa.voltage, sb.voltage);
        assert_eq!(sa.current, sb.current);
        assert_eq!(sa.temperature, sb.temperature);
    }

    #[test]
    fn test_timestamp_is_wall_clock() {
        let before = chrono::Utc::now().timestamp_millis();
        let sample = SimulatedSource::seeded(false, 1).generate();
        let after = chrono::Utc::now().timestamp_millis();
        assert!((before..=after).contains(&sample.timestamp_ms));
    }

    #[tokio::test]
    async fn test_produce_never_fails() {
        let mut source = SimulatedSource::seeded(false, 11);
        for _ in 0..10 {
            assert!(source.produce().await.is_some());
        }
        assert_eq!(source.kind(), SourceKind::Simulated);
    }
}

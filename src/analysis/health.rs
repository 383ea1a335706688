//! # Health Scorer
//!
//! Maps the latest reading and the shading flag to a 0-100 module health
//! score.
//!
//! The scoring policy is an explicit placeholder behind a stable seam: the
//! [`HealthModel`] trait fixes the contract (inputs in, one 0-100 score
//! out), so the threshold policy can later be replaced by a learned model
//! without touching any caller.

/// Score deducted while shading is active.
pub const PENALTY_SHADING: f64 = 35.0;

/// Score deducted while current sits below the threshold.
pub const PENALTY_LOW_CURRENT: f64 = 25.0;

/// Current (A) below which the low-current penalty applies.
pub const CURRENT_THRESHOLD_DEFAULT: f64 = 1.5;

/// Signals a health model scores from.
///
/// New optional signals extend this struct with defaulted fields; the
/// trait's contract does not change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthInputs {
    /// Latest module current (A)
    pub current_a: f64,

    /// Whether the shading toggle is active
    pub shading_active: bool,
}

/// Capability implemented by every scoring policy.
pub trait HealthModel {
    /// Map inputs to a score in [0, 100].
    fn score(&self, inputs: &HealthInputs) -> f64;
}

/// Placeholder policy: independent, additive penalties for shading and low
/// current, clamped to [0, 100] and rounded to one decimal place.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdModel {
    pub shading_penalty: f64,
    pub low_current_penalty: f64,
    pub current_threshold: f64,
}

impl ThresholdModel {
    /// The standard penalties with a custom current threshold.
    pub fn with_threshold(current_threshold: f64) -> Self {
        Self {
            current_threshold,
            ..Self::default()
        }
    }
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self {
            shading_penalty: PENALTY_SHADING,
            low_current_penalty: PENALTY_LOW_CURRENT,
            current_threshold: CURRENT_THRESHOLD_DEFAULT,
        }
    }
}

impl HealthModel for ThresholdModel {
    fn score(&self, inputs: &HealthInputs) -> f64 {
        let mut score = 100.0;
        if inputs.shading_active {
            score -= self.shading_penalty;
        }
        if inputs.current_a < self.current_threshold {
            score -= self.low_current_penalty;
        }
        (score.clamp(0.0, 100.0) * 10.0).round() / 10.0
    }
}

/// Score with the default threshold policy
///
/// # Arguments
///
/// * `current_a` - Latest module current (A)
/// * `shading_active` - Whether the shading toggle is active
///
/// # Returns
///
/// * `f64` - Score in [0, 100], one decimal place
///
/// # Examples
///
/// ```
/// use solar_sense::analysis::compute_health_score;
///
/// assert_eq!(compute_health_score(2.0, false), 100.0);
/// assert_eq!(compute_health_score(1.0, true), 40.0);
/// ```
pub fn compute_health_score(current_a: f64, shading_active: bool) -> f64 {
    ThresholdModel::default().score(&HealthInputs {
        current_a,
        shading_active,
    })
}

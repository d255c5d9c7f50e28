//! Adaptive Thinning for Display
//!
//! ## Overview
//!
//! A full roast history is thousands of samples; a chart needs a few hundred.
//! Plain decimation would keep every k-th sample and could step right over the
//! moment the operator switched mode or the heater cut out. The thinner instead
//! walks the input at a fixed stride and keeps a stride sample only when it is
//! *significantly different* from the last sample it kept:
//!
//! - bean or environment temperature moved by more than the change threshold, or
//! - the control mode or heater-enable flag differs.
//!
//! Comparing against the last *kept* sample (not the previous raw one) means a
//! slow drift is still captured once it adds up past the threshold.
//!
//! ## Guarantees
//!
//! - Input no longer than the cap is returned unchanged
//! - The first and last input samples are always in the output
//! - The output never exceeds the cap (caps below 2 are raised to 2)
//! - Flat stretches can produce far fewer points than the cap
//!
//! ```text
//! input  (len 12, cap 4 → step 3):
//!   idx:   0  1  2  3  4  5  6  7  8  9 10 11
//!   temp: 20 20 20 20 20 25 25 25 25 30 30 30
//! stride:  ^        ^        ^        ^
//! kept:    0 (first)         6 (+5°)  9 (+5°)   11 (last, replaces 9 only if over cap)
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::buffers::{DEFAULT_CHANGE_THRESHOLD_C, DEFAULT_MAX_DISPLAY_POINTS, MIN_DISPLAY_POINTS};
use crate::errors::{TelemetryError, TelemetryResult};
use crate::sample::TelemetrySample;

/// Thinning parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThinningConfig {
    /// Upper bound on output length
    pub max_points: usize,

    /// Temperature change (°C) that makes a stride sample worth keeping
    pub change_threshold: f32,
}

impl Default for ThinningConfig {
    fn default() -> Self {
        Self {
            max_points: DEFAULT_MAX_DISPLAY_POINTS,
            change_threshold: DEFAULT_CHANGE_THRESHOLD_C,
        }
    }
}

impl ThinningConfig {
    /// Reject caps that cannot hold both endpoints and unusable thresholds
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.max_points < MIN_DISPLAY_POINTS {
            return Err(TelemetryError::InvalidThinning {
                reason: "max_points must be at least 2",
            });
        }
        if !self.change_threshold.is_finite() || self.change_threshold < 0.0 {
            return Err(TelemetryError::InvalidThinning {
                reason: "change_threshold must be finite and >= 0",
            });
        }
        Ok(())
    }

    /// Thin `samples` with these parameters
    pub fn apply(&self, samples: &[TelemetrySample]) -> Vec<TelemetrySample> {
        thin(samples, self.max_points, self.change_threshold)
    }
}

/// Downsample `samples` to at most `max_points`, keeping significant transitions
pub fn thin(samples: &[TelemetrySample], max_points: usize, change_threshold: f32) -> Vec<TelemetrySample> {
    let max_points = if max_points < MIN_DISPLAY_POINTS {
        log::warn!("Thinning cap {} below {}; using {}", max_points, MIN_DISPLAY_POINTS, MIN_DISPLAY_POINTS);
        MIN_DISPLAY_POINTS
    } else {
        max_points
    };

    if samples.len() <= max_points {
        return samples.to_vec();
    }

    let last_index = samples.len() - 1;
    let step = samples.len().div_ceil(max_points);

    let mut kept = Vec::with_capacity(max_points);
    kept.push(samples[0]);
    let mut last_kept_index = 0;

    for (index, sample) in samples.iter().enumerate().step_by(step).skip(1) {
        let reference = &samples[last_kept_index];
        if is_significant(reference, sample, change_threshold) {
            kept.push(*sample);
            last_kept_index = index;
        }
    }

    if last_kept_index != last_index {
        // Stride positions never exceed the cap, but the final sample can
        if kept.len() >= max_points {
            kept.pop();
        }
        kept.push(samples[last_index]);
    }

    log::debug!(
        "Thinned {} samples to {} (cap {}, step {})",
        samples.len(),
        kept.len(),
        max_points,
        step
    );

    kept
}

fn is_significant(reference: &TelemetrySample, candidate: &TelemetrySample, threshold: f32) -> bool {
    channel_moved(reference.bean_temp, candidate.bean_temp, threshold)
        || channel_moved(reference.env_temp, candidate.env_temp, threshold)
        || reference.control_mode != candidate.control_mode
        || reference.heater_enable != candidate.heater_enable
}

/// A channel appearing or disappearing counts as movement
fn channel_moved(reference: Option<f32>, candidate: Option<f32>, threshold: f32) -> bool {
    match (reference, candidate) {
        (Some(a), Some(b)) => (a - b).abs() > threshold,
        (None, None) => false,
        _ => true,
    }
}

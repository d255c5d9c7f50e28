//! Spike suppression and exponential smoothing
//!
//! ## Spike Suppression
//!
//! Two steps, in order:
//!
//! 1. Clamp every value into a plausible band. A probe dropout shows up as a
//!    derivative of hundreds of °C/min; clamping bounds the damage.
//! 2. Centred 3-point median. A single-sample spike that survives clamping is
//!    replaced by one of its neighbours. The first and last points have only one
//!    neighbour and are left as they are.
//!
//! ## Exponential Smoothing
//!
//! ```text
//! s[0] = x[0]
//! s[i] = α·x[i] + (1 − α)·s[i−1]
//! ```
//!
//! A causal recurrence: each output depends on the previous output, so the
//! sequence is processed strictly in order.

use serde::{Deserialize, Serialize};

use super::RorPoint;
use crate::errors::{TelemetryError, TelemetryResult};

/// Plausible RoR band (°C/min)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeBand {
    /// Lower clamp bound
    pub min: f32,
    /// Upper clamp bound
    pub max: f32,
}

impl SpikeBand {
    /// Bounds must be finite with `min <= max`
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(TelemetryError::InvalidSpikeBand {
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Clamp into `band`, then apply a centred 3-point median
pub fn suppress_spikes(points: &[RorPoint], band: SpikeBand) -> Vec<RorPoint> {
    let clamped: Vec<f32> = points.iter().map(|p| p.ror.max(band.min).min(band.max)).collect();

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let ror = if i == 0 || i + 1 == points.len() {
                clamped[i]
            } else {
                median3(clamped[i - 1], clamped[i], clamped[i + 1])
            };
            RorPoint { ror, ..*point }
        })
        .collect()
}

/// Exponentially smooth the RoR values with factor `alpha`
pub fn exponential_smoothing(points: &[RorPoint], alpha: f32) -> Vec<RorPoint> {
    let mut smoothed: Vec<RorPoint> = Vec::with_capacity(points.len());

    for point in points {
        let ror = match smoothed.last() {
            Some(prev) => alpha * point.ror + (1.0 - alpha) * prev.ror,
            None => point.ror,
        };
        smoothed.push(RorPoint { ror, ..*point });
    }

    smoothed
}

fn median3(a: f32, b: f32, c: f32) -> f32 {
    a.max(b).min(a.min(b).max(c))
}

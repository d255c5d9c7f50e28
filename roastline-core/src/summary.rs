//! End-of-roast summary
//!
//! Computed once when a session completes and stored next to it. All times are
//! elapsed seconds from the first sample of the history.
//!
//! ```text
//! development_time_ratio = (total_time - first_crack_time) / total_time
//! ```

use serde::{Deserialize, Serialize};

use crate::ror::{bean_temperature_curve, derive_landmarks, LandmarkThresholds, RoastLandmarks};
use crate::sample::TelemetrySample;
use crate::traits::Seconds;

/// Session summary of a completed roast
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoastSummary {
    /// Highest bean temperature seen (°C)
    pub max_bean_temp: Option<f32>,
    /// Seconds from the first to the last sample
    pub total_time_seconds: Option<Seconds>,
    /// Elapsed seconds at first crack
    pub first_crack_time: Option<Seconds>,
    /// Share of the roast spent after first crack
    pub development_time_ratio: Option<f32>,
}

impl RoastSummary {
    /// Summarise a time-ascending telemetry history
    ///
    /// `first_crack` is an operator-marked first crack in elapsed seconds; without
    /// one, first crack is taken from the bean temperature curve.
    pub fn from_samples(
        samples: &[TelemetrySample],
        first_crack: Option<Seconds>,
        thresholds: &LandmarkThresholds,
    ) -> Self {
        let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
            return Self::default();
        };

        let total = last.timestamp - first.timestamp;
        let max_bean_temp = samples
            .iter()
            .filter_map(|s| s.bean_temp)
            .fold(None, |max: Option<f32>, t| Some(max.map_or(t, |m| m.max(t))));

        let marked = RoastLandmarks {
            first_crack,
            ..Default::default()
        };
        let first_crack_time = derive_landmarks(&bean_temperature_curve(samples), &marked, thresholds).first_crack;

        let development_time_ratio = match first_crack_time {
            Some(fc) if total > 0.0 && (0.0..=total).contains(&fc) => Some(((total - fc) / total) as f32),
            _ => None,
        };

        let summary = Self {
            max_bean_temp,
            total_time_seconds: Some(total),
            first_crack_time,
            development_time_ratio,
        };

        log::info!("Roast summary over {} samples: {:?}", samples.len(), summary);

        summary
    }
}

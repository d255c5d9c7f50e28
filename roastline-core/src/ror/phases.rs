//! Roast landmarks and per-phase RoR statistics
//!
//! ## Landmarks
//!
//! Landmarks are elapsed-time markers found on a temperature curve by threshold
//! crossing: the time of the *first* point at or above the threshold, scanning in
//! time order. A curve that never reaches a threshold leaves that landmark unset.
//!
//! Operator-marked events (a logged dry end, first crack, second crack, development
//! start or drop) are passed in as a partially filled [`RoastLandmarks`] and win
//! over the curve-derived value field by field.
//!
//! ## Phases
//!
//! ```text
//!   dry              maillard               development
//! ├──────────────┼──────────────────────┼──────────────────┤
//! 0           dry_end              first_crack           drop
//! ```
//!
//! A phase with no RoR samples reports the overall mean. An empty phase means
//! "no data", and reporting zero would read as a stalled roast.

use serde::{Deserialize, Serialize};

use super::{RorPoint, TemperaturePoint};
use crate::constants::roast::{DRY_END_TEMP_C, FIRST_CRACK_TEMP_C, SECOND_CRACK_TEMP_C};
use crate::traits::Seconds;

/// Temperatures that mark each landmark (°C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkThresholds {
    /// End of drying
    pub dry_end: f32,
    /// First crack
    pub first_crack: f32,
    /// Second crack
    pub second_crack: f32,
}

impl Default for LandmarkThresholds {
    fn default() -> Self {
        Self {
            dry_end: DRY_END_TEMP_C,
            first_crack: FIRST_CRACK_TEMP_C,
            second_crack: SECOND_CRACK_TEMP_C,
        }
    }
}

/// Named elapsed-time markers of a roast (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastLandmarks {
    /// End of the drying phase
    pub dry_end: Option<Seconds>,
    /// First crack
    pub first_crack: Option<Seconds>,
    /// Second crack
    pub second_crack: Option<Seconds>,
    /// Start of development; same instant as first crack
    pub development_start: Option<Seconds>,
    /// Last point of the curve
    pub drop: Option<Seconds>,
}

impl RoastLandmarks {
    /// Fill every unset field of `self` from `fallback`
    pub fn or(self, fallback: RoastLandmarks) -> RoastLandmarks {
        RoastLandmarks {
            dry_end: self.dry_end.or(fallback.dry_end),
            first_crack: self.first_crack.or(fallback.first_crack),
            second_crack: self.second_crack.or(fallback.second_crack),
            development_start: self.development_start.or(fallback.development_start),
            drop: self.drop.or(fallback.drop),
        }
    }

    /// Phase statistics of `ror` bucketed by these landmarks
    pub fn phase_stats(&self, ror: &[RorPoint]) -> RoastPhaseStats {
        calculate_roast_phase_stats(ror, self.dry_end, self.first_crack, self.drop)
    }
}

/// Locate landmarks on a time-ascending temperature curve
///
/// Every field set in `marked` wins over the threshold crossing (or, for
/// `drop`, the last curve point). Development start follows the resulting first
/// crack unless it is marked itself.
pub fn derive_landmarks(
    curve: &[TemperaturePoint],
    marked: &RoastLandmarks,
    thresholds: &LandmarkThresholds,
) -> RoastLandmarks {
    let first_crack = marked.first_crack.or_else(|| first_crossing(curve, thresholds.first_crack));

    let derived = RoastLandmarks {
        dry_end: first_crossing(curve, thresholds.dry_end),
        first_crack,
        second_crack: first_crossing(curve, thresholds.second_crack),
        development_start: first_crack,
        drop: curve.last().map(|p| p.time),
    };
    let landmarks = marked.or(derived);

    log::debug!("Landmarks from {} curve points: {:?}", curve.len(), landmarks);

    landmarks
}

fn first_crossing(curve: &[TemperaturePoint], threshold: f32) -> Option<Seconds> {
    curve.iter().find(|p| p.temperature >= threshold).map(|p| p.time)
}

/// Aggregate RoR statistics for a roast
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastPhaseStats {
    /// Mean RoR before dry end
    pub dry_mean: f32,
    /// Mean RoR between dry end and first crack
    pub maillard_mean: f32,
    /// Mean RoR from first crack to drop
    pub development_mean: f32,
    /// Mean RoR over the whole sequence
    pub overall_mean: f32,
    /// Largest RoR
    pub max: f32,
    /// Smallest RoR
    pub min: f32,
    /// Number of RoR samples aggregated
    pub sample_count: usize,
}

/// Running mean
#[derive(Debug, Clone, Copy, Default)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn update(&mut self, x: f32) {
        self.sum += x as f64;
        self.count += 1;
    }

    fn mean(&self) -> Option<f32> {
        (self.count > 0).then(|| (self.sum / self.count as f64) as f32)
    }
}

/// Bucket `ror` into dry / maillard / development and summarise
///
/// Times in `ror` must share the landmarks' time frame. Buckets:
/// - dry: `t < dry_end`
/// - maillard: `dry_end <= t < first_crack`
/// - development: `first_crack <= t <= drop` (no upper bound without `drop`)
///
/// Empty buckets report the overall mean. Empty input yields all zeros.
pub fn calculate_roast_phase_stats(
    ror: &[RorPoint],
    dry_end: Option<Seconds>,
    first_crack: Option<Seconds>,
    drop: Option<Seconds>,
) -> RoastPhaseStats {
    if ror.is_empty() {
        return RoastPhaseStats::default();
    }

    let mut overall = MeanAccumulator::default();
    let mut dry = MeanAccumulator::default();
    let mut maillard = MeanAccumulator::default();
    let mut development = MeanAccumulator::default();
    let mut max = f32::NEG_INFINITY;
    let mut min = f32::INFINITY;

    for point in ror {
        let t = point.time;
        overall.update(point.ror);
        max = max.max(point.ror);
        min = min.min(point.ror);

        if dry_end.is_some_and(|d| t < d) {
            dry.update(point.ror);
        }
        if let (Some(d), Some(fc)) = (dry_end, first_crack) {
            if t >= d && t < fc {
                maillard.update(point.ror);
            }
        }
        if first_crack.is_some_and(|fc| t >= fc) && drop.map_or(true, |end| t <= end) {
            development.update(point.ror);
        }
    }

    let overall_mean = overall.mean().unwrap_or_default();

    RoastPhaseStats {
        dry_mean: dry.mean().unwrap_or(overall_mean),
        maillard_mean: maillard.mean().unwrap_or(overall_mean),
        development_mean: development.mean().unwrap_or(overall_mean),
        overall_mean,
        max,
        min,
        sample_count: overall.count,
    }
}

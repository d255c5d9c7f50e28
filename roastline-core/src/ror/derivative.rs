//! Derivative estimators
//!
//! Both estimators look back `window` sample intervals from each point, so the
//! first output belongs to input index `window`.
//!
//! - **Windowed difference**: slope between the two window endpoints. Cheap and
//!   exact on straight lines, but only two samples contribute, so endpoint noise
//!   goes straight into the result.
//! - **Windowed regression**: ordinary least squares over all `window + 1` points.
//!   Every sample contributes, which roughly halves the noise for the same window.

use serde::{Deserialize, Serialize};

use super::{RorPoint, TemperaturePoint};
use crate::constants::roast::{MIN_REGRESSION_VARIANCE, SECONDS_PER_MINUTE};

/// Derivative strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeMethod {
    /// Endpoint difference over the window
    WindowedDifference,
    /// Least-squares slope over the window
    LinearRegression,
}

impl DerivativeMethod {
    /// Run this estimator
    pub fn estimate(&self, points: &[TemperaturePoint], window: usize) -> Vec<RorPoint> {
        match self {
            Self::WindowedDifference => windowed_difference(points, window),
            Self::LinearRegression => windowed_regression(points, window),
        }
    }
}

/// Endpoint-difference RoR (°C/min)
///
/// `ror[i] = (temp[i] - temp[i-w]) / ((time[i] - time[i-w]) / 60)`; points with a
/// non-positive time delta are skipped.
pub fn windowed_difference(points: &[TemperaturePoint], window: usize) -> Vec<RorPoint> {
    if points.len() <= window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(points.len() - window);

    for i in window..points.len() {
        let (start, end) = (&points[i - window], &points[i]);
        let dt = end.time - start.time;
        if dt <= 0.0 {
            log::trace!("RoR: skipping t={} (time delta {})", end.time, dt);
            continue;
        }

        let ror = (end.temperature - start.temperature) as f64 / (dt / SECONDS_PER_MINUTE);
        push_finite(&mut out, end, ror);
    }

    out
}

/// Least-squares RoR (°C/min) over the trailing `window + 1` points
///
/// Windows whose times are all identical are skipped.
pub fn windowed_regression(points: &[TemperaturePoint], window: usize) -> Vec<RorPoint> {
    if points.len() <= window {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(points.len() - window);

    for i in window..points.len() {
        match ols_slope(&points[i - window..=i]) {
            Some(slope) => push_finite(&mut out, &points[i], slope * SECONDS_PER_MINUTE),
            None => log::trace!("RoR: degenerate regression window ending at t={}", points[i].time),
        }
    }

    out
}

/// Slope of the least-squares line through `window` (°C/s)
///
/// Time is centred on its mean before accumulating, which keeps the sums small
/// when timestamps are epoch seconds.
fn ols_slope(window: &[TemperaturePoint]) -> Option<f64> {
    if window.len() < 2 {
        return None;
    }

    let n = window.len() as f64;
    let mean_t = window.iter().map(|p| p.time).sum::<f64>() / n;
    let mean_y = window.iter().map(|p| p.temperature as f64).sum::<f64>() / n;

    let (sxx, sxy) = window.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let dt = p.time - mean_t;
        (sxx + dt * dt, sxy + dt * (p.temperature as f64 - mean_y))
    });

    if sxx <= MIN_REGRESSION_VARIANCE {
        return None;
    }

    Some(sxy / sxx)
}

/// Values that overflow `f32` are dropped along with NaN and infinities
fn push_finite(out: &mut Vec<RorPoint>, at: &TemperaturePoint, ror: f64) {
    let ror = ror as f32;
    if ror.is_finite() {
        out.push(RorPoint {
            time: at.time,
            temperature: at.temperature,
            ror,
        });
    }
}

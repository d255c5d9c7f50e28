//! Rate-of-Rise Pipeline
//!
//! ## Overview
//!
//! Rate of Rise (RoR) is the derivative of bean temperature with respect to time,
//! in °C per minute. It is the signal roasters watch most closely, and also the
//! noisiest one: a thermocouple reading jittering by ±0.2 °C at 1 Hz turns into
//! ±24 °C/min of derivative noise if differentiated naively.
//!
//! The engine runs a fixed sequence of pure stages:
//!
//! ```text
//! temperatures ──→ derivative ──→ spike suppression ──→ exponential ──→ RoR points
//!                  (difference     (clamp + 3-point      smoothing
//!                   or OLS)         median, optional)
//! ```
//!
//! Each stage is exposed on its own ([`windowed_difference`], [`windowed_regression`],
//! [`suppress_spikes`], [`exponential_smoothing`]) and composed by
//! [`RateOfRiseEngine`]. Phase statistics over the result live in [`phases`].
//!
//! ## Noise vs. Latency
//!
//! | Knob             | Larger value                    | Smaller value                  |
//! |------------------|---------------------------------|--------------------------------|
//! | `window_size`    | smoother, lags turning points   | responsive, noisy              |
//! | `smoothing_alpha`| follows raw derivative closely  | heavier smoothing, more lag    |
//! | regression       | uses every point in the window  | difference uses only endpoints |
//!
//! ## Degenerate Input
//!
//! Output samples whose time delta is non-positive, or whose regression window has
//! no time variance, are omitted. The pipeline never emits NaN or infinite values.

pub mod derivative;
pub mod filters;
pub mod phases;

use serde::{Deserialize, Serialize};

use crate::constants::roast::{
    DEFAULT_ROR_WINDOW, DEFAULT_SMOOTHING_ALPHA, DEFAULT_SPIKE_MAX_PER_MIN, DEFAULT_SPIKE_MIN_PER_MIN,
};
use crate::errors::{TelemetryError, TelemetryResult};
use crate::sample::TelemetrySample;
use crate::traits::{Seconds, Timestamped};

pub use derivative::{windowed_difference, windowed_regression, DerivativeMethod};
pub use filters::{exponential_smoothing, suppress_spikes, SpikeBand};
pub use phases::{
    calculate_roast_phase_stats, derive_landmarks, LandmarkThresholds, RoastLandmarks, RoastPhaseStats,
};

/// One temperature reading on a curve (live bean temperature or a profile target)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    /// Time in seconds
    pub time: Seconds,
    /// Temperature (°C)
    pub temperature: f32,
}

impl TemperaturePoint {
    /// Create a point
    pub fn new(time: Seconds, temperature: f32) -> Self {
        Self { time, temperature }
    }

    /// Bean temperature of a telemetry sample, if it was sampled
    pub fn from_sample(sample: &TelemetrySample) -> Option<Self> {
        sample.bean_temp.map(|temperature| Self {
            time: sample.timestamp,
            temperature,
        })
    }
}

impl Timestamped for TemperaturePoint {
    fn timestamp(&self) -> Seconds {
        self.time
    }
}

/// Derived rate-of-rise sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RorPoint {
    /// Time of the temperature sample this RoR belongs to (s)
    pub time: Seconds,
    /// Temperature at that time (°C)
    pub temperature: f32,
    /// Rate of rise (°C/min)
    pub ror: f32,
}

impl Timestamped for RorPoint {
    fn timestamp(&self) -> Seconds {
        self.time
    }
}

/// Bean temperature curve of a telemetry history, in elapsed seconds
///
/// Time is rebased to the first sample of `samples` (the start of the roast).
/// Samples without a bean temperature are skipped.
pub fn bean_temperature_curve(samples: &[TelemetrySample]) -> Vec<TemperaturePoint> {
    let Some(start) = samples.first().map(|s| s.timestamp) else {
        return Vec::new();
    };

    samples
        .iter()
        .filter_map(TemperaturePoint::from_sample)
        .map(|p| TemperaturePoint::new(p.time - start, p.temperature))
        .collect()
}

/// Rate-of-rise pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RorConfig {
    /// Derivative estimator
    pub method: DerivativeMethod,

    /// Number of sample intervals the derivative spans
    pub window_size: usize,

    /// Exponential smoothing factor in (0, 1]; 1 disables smoothing
    pub smoothing_alpha: f32,

    /// Clamp band for spike suppression; `None` skips the stage
    pub spike_band: Option<SpikeBand>,
}

impl Default for RorConfig {
    fn default() -> Self {
        Self {
            method: DerivativeMethod::WindowedDifference,
            window_size: DEFAULT_ROR_WINDOW,
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            spike_band: Some(SpikeBand {
                min: DEFAULT_SPIKE_MIN_PER_MIN,
                max: DEFAULT_SPIKE_MAX_PER_MIN,
            }),
        }
    }
}

impl RorConfig {
    /// Check window, smoothing factor and spike band
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.window_size == 0 {
            return Err(TelemetryError::InvalidWindow {
                window_size: self.window_size,
            });
        }

        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(TelemetryError::InvalidSmoothing {
                alpha: self.smoothing_alpha,
            });
        }

        if let Some(band) = self.spike_band {
            band.validate()?;
        }

        Ok(())
    }
}

/// Composed derivative → spike suppression → smoothing pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateOfRiseEngine {
    config: RorConfig,
}

impl RateOfRiseEngine {
    /// Create an engine with a validated configuration
    pub fn new(config: RorConfig) -> TelemetryResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &RorConfig {
        &self.config
    }

    /// Run the full pipeline over a time-ascending temperature curve
    ///
    /// Produces one RoR point per input point after the window fills, minus any
    /// points dropped for degenerate time deltas.
    pub fn calculate(&self, points: &[TemperaturePoint]) -> Vec<RorPoint> {
        let raw = self.config.method.estimate(points, self.config.window_size);

        let despiked = match self.config.spike_band {
            Some(band) => suppress_spikes(&raw, band),
            None => raw,
        };

        let smoothed = exponential_smoothing(&despiked, self.config.smoothing_alpha);

        log::debug!(
            "RoR: {} temperature points -> {} RoR points ({:?}, window {})",
            points.len(),
            smoothed.len(),
            self.config.method,
            self.config.window_size
        );

        smoothed
    }
}

/// Validate `config` and run the RoR pipeline over `points`
pub fn calculate_ror(points: &[TemperaturePoint], config: &RorConfig) -> TelemetryResult<Vec<RorPoint>> {
    Ok(RateOfRiseEngine::new(*config)?.calculate(points))
}

//! Delta/Precision Codec for Telemetry Batches
//!
//! ## Overview
//!
//! Telemetry is shipped and stored in batches. Within a batch, consecutive samples
//! differ very little: temperatures move a few tenths of a degree per second and
//! the setpoint hardly ever moves. The codec exploits that by
//!
//! 1. storing timestamps as offsets from a fixed base timestamp,
//! 2. storing bean temperature, environment temperature and setpoint as deltas
//!    from the preceding sample, and
//! 3. rounding everything numeric to a configured precision.
//!
//! Small integers and flags (duty, mode, heater enable, gains) are copied as-is;
//! delta coding them buys nothing.
//!
//! ## Channel Rules
//!
//! | Channel                  | Stored as                                   |
//! |--------------------------|---------------------------------------------|
//! | timestamp                | `round(ts - base)`                          |
//! | bean / env / setpoint    | delta if the previous sample had it, else absolute |
//! | rate of rise             | `round(value)`                              |
//! | everything else          | copied                                      |
//!
//! Absent channels stay absent in both directions. A missing reading is never
//! turned into `0`, and a zero delta is still stored.
//!
//! ## Drift-Free Deltas
//!
//! Deltas are taken between *quantized* values:
//!
//! ```text
//! q(x)   = round(x * precision)
//! delta  = (q(cur) - q(prev)) / precision
//! decode = (q(reference) + q(delta)) / precision
//! ```
//!
//! The decoder lands on exactly `q(cur) / precision`, so rounding error never
//! accumulates along the chain. Each decoded value is within half a rounding
//! step of its source, however long the batch.
//!
//! ## Chaining Across Batches
//!
//! [`CompressionState`] is the resume token. [`DeltaCodec::encode`] starts a fresh
//! chain (first sample absolute) and returns the state after the batch;
//! [`DeltaCodec::encode_resume`] continues a chain from such a state, keeping its
//! base timestamp and delta-coding the first sample against the state's last
//! sample. The decode side mirrors both.
//!
//! ```rust
//! use roastline_core::{DeltaCodec, TelemetrySample};
//!
//! let codec = DeltaCodec::new(10.0).unwrap();
//! let samples = vec![
//!     TelemetrySample::at(1000.0).with_bean_temp(200.0),
//!     TelemetrySample::at(1001.0).with_bean_temp(205.0),
//! ];
//!
//! let (compressed, state) = codec.encode(&samples);
//! assert_eq!(compressed[1].bean_temp, Some(5.0));
//! assert_eq!(codec.decode(&compressed, &state), samples);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::codec::MAX_PRECISION;
use crate::errors::{TelemetryError, TelemetryResult};
use crate::sample::TelemetrySample;
use crate::traits::Seconds;

/// Delta-coded telemetry sample
///
/// Serialized with short keys since this is the form that goes over the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressedSample {
    /// Offset from the batch base timestamp (s)
    #[serde(rename = "t")]
    pub offset: Seconds,

    /// Bean temperature delta (or absolute at chain start)
    #[serde(rename = "bt", default, skip_serializing_if = "Option::is_none")]
    pub bean_temp: Option<f32>,

    /// Environment temperature delta (or absolute at chain start)
    #[serde(rename = "et", default, skip_serializing_if = "Option::is_none")]
    pub env_temp: Option<f32>,

    /// Setpoint delta (or absolute at chain start)
    #[serde(rename = "sp", default, skip_serializing_if = "Option::is_none")]
    pub setpoint: Option<f32>,

    /// Fan duty, copied
    #[serde(rename = "fan", default, skip_serializing_if = "Option::is_none")]
    pub fan_pwm: Option<u16>,

    /// Heater duty, copied
    #[serde(rename = "ht", default, skip_serializing_if = "Option::is_none")]
    pub heater_pwm: Option<u16>,

    /// Control mode, copied
    #[serde(rename = "m", default, skip_serializing_if = "Option::is_none")]
    pub control_mode: Option<u8>,

    /// Heater enable flag, copied
    #[serde(rename = "he", default, skip_serializing_if = "Option::is_none")]
    pub heater_enable: Option<bool>,

    /// Rate of rise, rounded
    #[serde(rename = "ror", default, skip_serializing_if = "Option::is_none")]
    pub rate_of_rise: Option<f32>,

    /// Proportional gain, copied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kp: Option<f32>,

    /// Integral gain, copied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ki: Option<f32>,

    /// Derivative gain, copied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kd: Option<f32>,
}

/// Minimal state needed to resume a delta chain
///
/// Owned by the caller and stored alongside the compressed batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionState {
    /// Timestamp every offset in the chain is relative to
    pub base_timestamp: Seconds,

    /// Last absolute sample of the chain, `None` before anything was encoded
    pub last_sample: Option<TelemetrySample>,
}

/// Stateless delta encoder/decoder at a fixed precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaCodec {
    /// Rounding steps per unit (10 = nearest 0.1)
    precision: f64,
}

impl DeltaCodec {
    /// Creates a codec rounding to `1 / precision`
    ///
    /// Precision is capped at [`MAX_PRECISION`]: decoded values are `f32`, and
    /// a finer step than the `f32` spacing at roaster temperatures would let the
    /// delta chain drift.
    pub fn new(precision: f64) -> TelemetryResult<Self> {
        if !precision.is_finite() || precision <= 0.0 || precision > MAX_PRECISION {
            return Err(TelemetryError::InvalidPrecision { precision });
        }

        Ok(Self { precision })
    }

    /// Rounding steps per unit
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Encode a batch as the start of a new chain
    ///
    /// Returns the compressed samples and the state to resume from. Empty input
    /// yields an empty batch and the neutral state.
    pub fn encode(&self, samples: &[TelemetrySample]) -> (Vec<CompressedSample>, CompressionState) {
        let Some(first) = samples.first() else {
            return (Vec::new(), CompressionState::default());
        };

        self.encode_from(samples, first.timestamp, None)
    }

    /// Encode a batch continuing the chain described by `state`
    ///
    /// With an empty state this is the same as [`DeltaCodec::encode`]. Empty
    /// input returns `state` unchanged.
    pub fn encode_resume(
        &self,
        samples: &[TelemetrySample],
        state: &CompressionState,
    ) -> (Vec<CompressedSample>, CompressionState) {
        match state.last_sample {
            None => self.encode(samples),
            Some(_) if samples.is_empty() => (Vec::new(), *state),
            Some(last) => self.encode_from(samples, state.base_timestamp, Some(last)),
        }
    }

    /// Decode a batch produced by [`DeltaCodec::encode`]
    ///
    /// Only the base timestamp of `state` is used; the batch carries its own
    /// absolute starting values.
    pub fn decode(&self, compressed: &[CompressedSample], state: &CompressionState) -> Vec<TelemetrySample> {
        self.decode_from(compressed, state.base_timestamp, None)
    }

    /// Decode a batch produced by [`DeltaCodec::encode_resume`] from `state`
    ///
    /// Deltas accumulate against `state.last_sample` and chain forward through
    /// the batch. Returns the samples and the advanced state.
    pub fn decode_resume(
        &self,
        compressed: &[CompressedSample],
        state: &CompressionState,
    ) -> (Vec<TelemetrySample>, CompressionState) {
        let samples = self.decode_from(compressed, state.base_timestamp, state.last_sample);
        let next = CompressionState {
            base_timestamp: state.base_timestamp,
            last_sample: samples.last().copied().or(state.last_sample),
        };
        (samples, next)
    }

    fn encode_from(
        &self,
        samples: &[TelemetrySample],
        base_timestamp: Seconds,
        mut previous: Option<TelemetrySample>,
    ) -> (Vec<CompressedSample>, CompressionState) {
        let mut compressed = Vec::with_capacity(samples.len());

        for sample in samples {
            let prev = previous.as_ref();
            compressed.push(CompressedSample {
                offset: self.round(sample.timestamp - base_timestamp),
                bean_temp: self.delta(sample.bean_temp, prev.and_then(|p| p.bean_temp)),
                env_temp: self.delta(sample.env_temp, prev.and_then(|p| p.env_temp)),
                setpoint: self.delta(sample.setpoint, prev.and_then(|p| p.setpoint)),
                fan_pwm: sample.fan_pwm,
                heater_pwm: sample.heater_pwm,
                control_mode: sample.control_mode,
                heater_enable: sample.heater_enable,
                rate_of_rise: sample.rate_of_rise.map(|v| self.round(v as f64) as f32),
                kp: sample.kp,
                ki: sample.ki,
                kd: sample.kd,
            });
            previous = Some(*sample);
        }

        log::debug!(
            "Encoded {} samples (base t={}, precision {})",
            compressed.len(),
            base_timestamp,
            self.precision
        );

        let state = CompressionState {
            base_timestamp,
            last_sample: previous,
        };
        (compressed, state)
    }

    fn decode_from(
        &self,
        compressed: &[CompressedSample],
        base_timestamp: Seconds,
        mut reference: Option<TelemetrySample>,
    ) -> Vec<TelemetrySample> {
        let mut samples = Vec::with_capacity(compressed.len());

        for packed in compressed {
            let prev = reference.as_ref();
            let sample = TelemetrySample {
                timestamp: base_timestamp + packed.offset,
                bean_temp: self.undelta(packed.bean_temp, prev.and_then(|p| p.bean_temp)),
                env_temp: self.undelta(packed.env_temp, prev.and_then(|p| p.env_temp)),
                setpoint: self.undelta(packed.setpoint, prev.and_then(|p| p.setpoint)),
                fan_pwm: packed.fan_pwm,
                heater_pwm: packed.heater_pwm,
                control_mode: packed.control_mode,
                heater_enable: packed.heater_enable,
                rate_of_rise: packed.rate_of_rise,
                kp: packed.kp,
                ki: packed.ki,
                kd: packed.kd,
            };
            samples.push(sample);
            reference = Some(sample);
        }

        samples
    }

    fn quantize(&self, value: f64) -> f64 {
        (value * self.precision).round()
    }

    fn round(&self, value: f64) -> f64 {
        self.quantize(value) / self.precision
    }

    /// Delta against the previous value, or the rounded absolute value when the
    /// previous sample lacks the channel
    fn delta(&self, current: Option<f32>, previous: Option<f32>) -> Option<f32> {
        let current = current? as f64;
        let stored = match previous {
            Some(prev) => (self.quantize(current) - self.quantize(prev as f64)) / self.precision,
            None => self.round(current),
        };
        Some(stored as f32)
    }

    fn undelta(&self, stored: Option<f32>, reference: Option<f32>) -> Option<f32> {
        let stored = stored? as f64;
        let value = match reference {
            Some(r) => (self.quantize(r as f64) + self.quantize(stored)) / self.precision,
            None => stored,
        };
        Some(value as f32)
    }
}

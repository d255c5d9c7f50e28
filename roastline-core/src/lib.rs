//! Telemetry time-series engine for coffee roasters
//!
//! Buffers the live sample stream from a roaster, compresses it for storage,
//! thins it for display and derives rate of rise, roast landmarks and phase
//! statistics from it.
//!
//! Key constraints:
//! - Bounded memory: the live history never exceeds its configured capacity
//! - Absent channels stay absent through every stage (never read as zero)
//! - Processing is total: bad input shrinks the output, it does not fail
//!
//! ```rust
//! use roastline_core::{bean_temperature_curve, EngineConfig, TelemetrySample};
//!
//! let config = EngineConfig::default();
//! let mut history = config.buffer::<TelemetrySample>().unwrap();
//!
//! for t in 0..120 {
//!     history.push(TelemetrySample::at(t as f64).with_bean_temp(150.0 + 0.4 * t as f32));
//! }
//!
//! let samples = history.to_vec();
//! let ror = config.ror_engine().unwrap().calculate(&bean_temperature_curve(&samples));
//! let (compressed, state) = config.codec().unwrap().encode(&samples);
//! let chart = config.thinning.apply(&samples);
//!
//! assert!(!ror.is_empty());
//! assert_eq!(compressed.len(), samples.len());
//! assert_eq!(state.base_timestamp, 0.0);
//! assert!(chart.len() <= config.thinning.max_points);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod range;
pub mod ror;
pub mod sample;
pub mod summary;
pub mod thinning;
pub mod traits;

// Public API
pub use buffer::{SharedTelemetryBuffer, TemporalRingBuffer};
pub use codec::{CompressedSample, CompressionState, DeltaCodec};
pub use config::EngineConfig;
pub use errors::{TelemetryError, TelemetryResult};
pub use range::{range_bounds, range_filter};
pub use ror::{
    bean_temperature_curve, calculate_roast_phase_stats, calculate_ror, derive_landmarks, DerivativeMethod,
    LandmarkThresholds, RateOfRiseEngine, RoastLandmarks, RoastPhaseStats, RorConfig, RorPoint, SpikeBand,
    TemperaturePoint,
};
pub use sample::TelemetrySample;
pub use summary::RoastSummary;
pub use thinning::{thin, ThinningConfig};
pub use traits::{Seconds, Timestamped};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

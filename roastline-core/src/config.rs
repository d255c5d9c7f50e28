//! Engine configuration
//!
//! One document configures every component. Missing fields fall back to the
//! defaults in [`crate::constants`], so an empty object is a valid config:
//!
//! ```rust
//! use roastline_core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "buffer_capacity": 900, "ror": { "window_size": 10 } }"#).unwrap();
//! assert_eq!(config.buffer_capacity, 900);
//! assert_eq!(config.ror.window_size, 10);
//! assert_eq!(config.thinning.max_points, 500);
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::TemporalRingBuffer;
use crate::codec::DeltaCodec;
use crate::constants::buffers::{DEFAULT_BUFFER_CAPACITY, MIN_BUFFER_CAPACITY};
use crate::constants::codec::DEFAULT_PRECISION;
use crate::errors::{TelemetryError, TelemetryResult};
use crate::ror::{LandmarkThresholds, RateOfRiseEngine, RorConfig};
use crate::thinning::ThinningConfig;
use crate::traits::Timestamped;

/// Configuration for the whole telemetry engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Live history capacity (samples)
    pub buffer_capacity: usize,

    /// Codec quantization steps per unit
    pub precision: f64,

    /// Display thinning
    pub thinning: ThinningConfig,

    /// Rate-of-rise pipeline
    pub ror: RorConfig,

    /// Landmark temperatures
    pub landmarks: LandmarkThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            precision: DEFAULT_PRECISION,
            thinning: ThinningConfig::default(),
            ror: RorConfig::default(),
            landmarks: LandmarkThresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config document
    pub fn from_json(json: &str) -> TelemetryResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| TelemetryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every component
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.buffer_capacity < MIN_BUFFER_CAPACITY {
            return Err(TelemetryError::ZeroCapacity);
        }
        self.codec()?;
        self.thinning.validate()?;
        self.ror.validate()
    }

    /// Ring buffer sized for the live history
    pub fn buffer<T: Timestamped + Clone>(&self) -> TelemetryResult<TemporalRingBuffer<T>> {
        TemporalRingBuffer::new(self.buffer_capacity)
    }

    /// Codec at the configured precision
    pub fn codec(&self) -> TelemetryResult<DeltaCodec> {
        DeltaCodec::new(self.precision)
    }

    /// RoR engine with the configured pipeline
    pub fn ror_engine(&self) -> TelemetryResult<RateOfRiseEngine> {
        RateOfRiseEngine::new(self.ror)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ror::DerivativeMethod;
    use crate::sample::TelemetrySample;

    #[test]
    fn defaults_validate() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(EngineConfig::from_json("{}").unwrap(), config);
    }

    #[test]
    fn partial_document() {
        let config = EngineConfig::from_json(
            r#"{
                "precision": 100.0,
                "ror": { "method": "linear_regression", "spike_band": null },
                "landmarks": { "first_crack": 200.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.precision, 100.0);
        assert_eq!(config.ror.method, DerivativeMethod::LinearRegression);
        assert_eq!(config.ror.spike_band, None);
        assert_eq!(config.ror.window_size, RorConfig::default().window_size);
        assert_eq!(config.landmarks.first_crack, 200.0);
        assert_eq!(config.landmarks.dry_end, LandmarkThresholds::default().dry_end);
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(EngineConfig::from_json("{ not json"), Err(TelemetryError::Config(_))));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "buffer_capacity": "large" }"#),
            Err(TelemetryError::Config(_))
        ));
    }

    #[test]
    fn invalid_values_rejected() {
        assert_eq!(
            EngineConfig::from_json(r#"{ "buffer_capacity": 0 }"#),
            Err(TelemetryError::ZeroCapacity)
        );
        assert!(matches!(
            EngineConfig::from_json(r#"{ "precision": -1.0 }"#),
            Err(TelemetryError::InvalidPrecision { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "precision": 100000.0 }"#),
            Err(TelemetryError::InvalidPrecision { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "ror": { "smoothing_alpha": 1.5 } }"#),
            Err(TelemetryError::InvalidSmoothing { .. })
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{ "thinning": { "max_points": 1 } }"#),
            Err(TelemetryError::InvalidThinning { .. })
        ));
    }

    #[test]
    fn builds_components() {
        let config = EngineConfig {
            buffer_capacity: 16,
            precision: 4.0,
            ..Default::default()
        };

        let buffer = config.buffer::<TelemetrySample>().unwrap();
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(config.codec().unwrap().precision(), 4.0);
        assert_eq!(config.ror_engine().unwrap().config(), &config.ror);
    }
}

//! Error Types for Telemetry Engine Construction and Parsing
//!
//! ## Design Philosophy
//!
//! The processing core is built from total functions: empty input yields empty output,
//! degenerate time deltas drop the affected sample, and missing channels stay missing.
//! None of that is an error. Errors are reserved for the two boundaries where a caller
//! hands us something we cannot work with at all:
//!
//! 1. **Construction**: a buffer with zero capacity, a codec precision of zero or NaN,
//!    an RoR window of zero points. These are programming or configuration mistakes,
//!    and they are rejected once, up front, instead of being re-checked per sample.
//!
//! 2. **Parsing**: a device payload or a configuration document that is not valid JSON
//!    or has the wrong shape.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use roastline_core::{TelemetryError, TemporalRingBuffer, TelemetrySample};
//!
//! fn make_history(capacity: usize) -> TemporalRingBuffer<TelemetrySample> {
//!     match TemporalRingBuffer::new(capacity) {
//!         Ok(buffer) => buffer,
//!         Err(TelemetryError::ZeroCapacity) => {
//!             // Fall back to a single-slot buffer rather than refusing to run
//!             TemporalRingBuffer::new(1).unwrap()
//!         }
//!         Err(other) => panic!("unexpected: {other}"),
//!     }
//! }
//! # let _ = make_history(0);
//! ```

use thiserror_no_std::Error;

/// Result type for engine construction and parsing
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors raised at construction and parsing boundaries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TelemetryError {
    /// Ring buffer capacity must be at least one sample
    #[error("Buffer capacity must be at least 1")]
    ZeroCapacity,

    /// Codec precision must be a finite samples-per-unit value in `(0, MAX_PRECISION]`
    #[error("Invalid codec precision {precision}: must be finite, > 0 and <= 1000")]
    InvalidPrecision {
        /// The rejected precision
        precision: f64,
    },

    /// RoR window must span at least one interval
    #[error("Invalid RoR window size {window_size}: must be >= 1")]
    InvalidWindow {
        /// The rejected window size
        window_size: usize,
    },

    /// Exponential smoothing factor outside (0, 1]
    #[error("Invalid smoothing factor {alpha}: must be in (0, 1]")]
    InvalidSmoothing {
        /// The rejected smoothing factor
        alpha: f32,
    },

    /// Spike suppression band with min above max (or non-finite bounds)
    #[error("Invalid spike band [{min}, {max}]")]
    InvalidSpikeBand {
        /// Lower clamp bound
        min: f32,
        /// Upper clamp bound
        max: f32,
    },

    /// Thinning parameters that cannot produce a meaningful output
    #[error("Invalid thinning config: {reason}")]
    InvalidThinning {
        /// What is wrong with the configuration
        reason: &'static str,
    },

    /// Device telemetry payload could not be decoded
    #[error("Malformed telemetry payload: {0}")]
    Payload(String),

    /// Engine configuration document could not be decoded
    #[error("Malformed engine config: {0}")]
    Config(String),
}

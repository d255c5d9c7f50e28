//! Roast Landmarks and Rate-of-Rise Defaults
//!
//! ## Landmark Thresholds
//!
//! Landmarks are located on a target curve by the first point at or above a
//! bean temperature threshold. The values are the usual Celsius markers for
//! specialty coffee:
//!
//! | Landmark     | Threshold | Meaning                               |
//! |--------------|-----------|---------------------------------------|
//! | Dry end      | 160 °C    | Beans turn from green to yellow       |
//! | First crack  | 196 °C    | Audible cracking, development begins  |
//! | Second crack | 224 °C    | Oils migrate to the surface           |

/// Seconds per minute, for converting per-second slopes to °C/min.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

// ===== LANDMARK THRESHOLDS =====

/// Bean temperature marking the end of the drying phase (°C).
pub const DRY_END_TEMP_C: f32 = 160.0;

/// Bean temperature at which first crack is expected (°C).
pub const FIRST_CRACK_TEMP_C: f32 = 196.0;

/// Bean temperature at which second crack is expected (°C).
pub const SECOND_CRACK_TEMP_C: f32 = 224.0;

// ===== RATE OF RISE PIPELINE =====

/// Default derivative window (sample intervals).
///
/// - 5 intervals = 5 seconds at 1 Hz
/// - Long enough to average out single-tick probe noise
/// - Short enough that the RoR crash after first crack shows up promptly
pub const DEFAULT_ROR_WINDOW: usize = 5;

/// Default exponential smoothing factor.
///
/// 0.3 weights the newest derivative at 30%, giving an effective memory of
/// roughly three samples.
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.3;

/// Default lower clamp for spike suppression (°C/min).
///
/// Beans never cool faster than this while in the drum; anything lower is a
/// probe dropout.
pub const DEFAULT_SPIKE_MIN_PER_MIN: f32 = -30.0;

/// Default upper clamp for spike suppression (°C/min).
///
/// Even at charge, bean temperature rises well below 60 °C/min once the
/// turning point has passed.
pub const DEFAULT_SPIKE_MAX_PER_MIN: f32 = 60.0;

/// Smallest time variance treated as a usable regression window (s²).
pub const MIN_REGRESSION_VARIANCE: f64 = 1e-9;

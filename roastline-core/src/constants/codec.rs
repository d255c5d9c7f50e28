//! Delta Codec Precision
//!
//! Precision is expressed as samples-per-unit: a precision of 10 rounds every
//! encoded value to the nearest 0.1, a precision of 100 to the nearest 0.01.

/// Default codec precision (steps per unit).
///
/// - Rounds temperatures and timestamps to 0.1
/// - Matches the 0.1 °C resolution the device reports
///
/// Source: device firmware telemetry resolution
pub const DEFAULT_PRECISION: f64 = 10.0;

/// Finest codec precision accepted (steps per unit).
///
/// Decoded temperatures are `f32` and become the reference for the next delta,
/// so one `f32` ulp must stay below half a rounding step. At 1000 steps per unit
/// that holds for magnitudes up to 4096.
///
/// Source: `f32` mantissa width (24 bits)
pub const MAX_PRECISION: f64 = 1000.0;

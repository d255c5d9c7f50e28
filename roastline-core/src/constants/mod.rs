//! Constants for the Roastline Telemetry Engine
//!
//! This module provides centralized, documented defaults used throughout the
//! engine. Every numeric default a config struct falls back to is defined here,
//! together with its unit and where the value comes from.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Buffers**: Ring buffer capacities and display point caps
//! - **Codec**: Delta compression precision
//! - **Roast**: Landmark thresholds and rate-of-rise pipeline defaults
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include the unit in the name (`_C`, `_SECS`, `_PER_MIN`)
//! 3. Document where a value comes from (firmware, roasting practice, measurement)

/// Buffer capacities and display limits.
pub mod buffers;

/// Delta codec precision defaults.
pub mod codec;

/// Roast landmark thresholds and rate-of-rise pipeline defaults.
pub mod roast;

// Re-export commonly used constants for convenience
pub use buffers::{DEFAULT_BUFFER_CAPACITY, DEFAULT_MAX_DISPLAY_POINTS, DEFAULT_CHANGE_THRESHOLD_C};

pub use codec::{DEFAULT_PRECISION, MAX_PRECISION};

pub use roast::{
    DRY_END_TEMP_C, FIRST_CRACK_TEMP_C, SECOND_CRACK_TEMP_C,
    DEFAULT_ROR_WINDOW, DEFAULT_SMOOTHING_ALPHA, SECONDS_PER_MINUTE,
};

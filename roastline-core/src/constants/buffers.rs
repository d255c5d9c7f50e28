//! Buffer Sizes and Display Limits
//!
//! The producer delivers roughly one sample per second, so capacities below are
//! stated both in samples and in the wall-clock span they cover at 1 Hz.

// ===== RING BUFFER SIZES =====

/// Default live-history capacity (samples).
///
/// Sized to hold a complete roast with margin:
/// - 3600 samples = 60 minutes at 1 Hz
/// - Typical roasts run 9-16 minutes, plus preheat and cooling
/// - ~300 KB with every channel present
///
/// Source: roast session lengths observed on the device fleet
pub const DEFAULT_BUFFER_CAPACITY: usize = 3600;

/// Minimum capacity accepted by the ring buffer.
pub const MIN_BUFFER_CAPACITY: usize = 1;

// ===== DISPLAY THINNING =====

/// Default maximum number of points handed to a chart.
///
/// - 500 points is more than a phone-width chart can resolve
/// - Keeps a 60 minute history under ~15% of its raw size
///
/// Source: chart rendering budget
pub const DEFAULT_MAX_DISPLAY_POINTS: usize = 500;

/// Smallest usable thinning cap.
///
/// The first and last input samples are always kept, so a cap below two
/// cannot be honoured.
pub const MIN_DISPLAY_POINTS: usize = 2;

/// Default temperature change that forces a thinned sample to be kept (°C).
///
/// - 0.5 °C is above thermocouple noise on the roaster probes
/// - Small enough that turning point and first crack plateaus survive thinning
///
/// Source: probe noise floor measurements
pub const DEFAULT_CHANGE_THRESHOLD_C: f32 = 0.5;

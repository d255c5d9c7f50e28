//! Core traits shared by the buffer and query components
//!
//! Keep them small: the buffer and range filter only ever need to know when a
//! point happened.

/// Timestamp in seconds (epoch seconds for live telemetry, elapsed seconds for curves)
pub type Seconds = f64;

/// Anything that sits at a point in time
///
/// Implemented by every point type the engine stores or queries, so the ring
/// buffer and range filter work on raw telemetry and derived RoR points alike.
pub trait Timestamped {
    /// Time of this point in seconds
    fn timestamp(&self) -> Seconds;
}

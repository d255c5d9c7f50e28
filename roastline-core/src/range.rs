//! Time-Range Queries over Chronological Sequences
//!
//! ## Algorithm
//!
//! Two independent binary searches over ascending timestamps:
//!
//! ```text
//! timestamps:  10  20  20  30  40  50
//!                  ↑           ↑
//!                  lo          hi (inclusive)
//! range(15, 40):
//!   lo = leftmost index with ts >= 15  → 1
//!   hi = rightmost index with ts <= 40 → 4
//!   result = [20, 20, 30, 40]
//! ```
//!
//! Both searches are O(log n). Bounds are inclusive on both ends.
//!
//! ## Ordering Contract
//!
//! The input must be sorted ascending by timestamp. That is the caller's job:
//! the ingestion side owns ordering, and sorting here would hide producer bugs.
//! On unsorted input the result is some contiguous slice (possibly empty) of the
//! input; it never panics.

use crate::traits::{Seconds, Timestamped};

/// Index bounds `[lo, hi)` of the points with `start <= ts <= end`
///
/// Returns `None` when no point falls in the range, including when
/// `start > end` or either bound is NaN.
pub fn range_bounds<T: Timestamped>(points: &[T], start: Seconds, end: Seconds) -> Option<(usize, usize)> {
    // also rejects NaN bounds
    if !(start <= end) {
        return None;
    }

    let lo = points.partition_point(|p| p.timestamp() < start);
    let hi = points.partition_point(|p| p.timestamp() <= end);

    (lo < hi).then_some((lo, hi))
}

/// Slice of `points` whose timestamps fall in `[start, end]`
pub fn range_filter<T: Timestamped>(points: &[T], start: Seconds, end: Seconds) -> &[T] {
    match range_bounds(points, start, end) {
        Some((lo, hi)) => &points[lo..hi],
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TelemetrySample;

    fn series(timestamps: &[f64]) -> Vec<TelemetrySample> {
        timestamps.iter().map(|&t| TelemetrySample::at(t)).collect()
    }

    fn times(points: &[TelemetrySample]) -> Vec<f64> {
        points.iter().map(|p| p.timestamp).collect()
    }

    #[test]
    fn inclusive_bounds() {
        let data = series(&[10.0, 20.0, 20.0, 30.0, 40.0, 50.0]);
        assert_eq!(times(range_filter(&data, 20.0, 40.0)), vec![20.0, 20.0, 30.0, 40.0]);
        assert_eq!(times(range_filter(&data, 15.0, 45.0)), vec![20.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn range_outside_data_is_empty() {
        let data = series(&[10.0, 20.0, 30.0]);
        assert!(range_filter(&data, 31.0, 100.0).is_empty());
        assert!(range_filter(&data, 0.0, 9.9).is_empty());
        assert!(range_filter(&data, 21.0, 29.0).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let data = series(&[10.0, 20.0, 30.0]);
        assert!(range_filter(&data, 30.0, 10.0).is_empty());
        assert_eq!(range_bounds(&data, f64::NAN, 30.0), None);
    }

    #[test]
    fn single_point_range() {
        let data = series(&[10.0, 20.0, 30.0]);
        assert_eq!(range_bounds(&data, 20.0, 20.0), Some((1, 2)));
    }

    #[test]
    fn unsorted_input_does_not_panic() {
        let data = series(&[30.0, 10.0, 50.0, 20.0]);
        let out = range_filter(&data, 15.0, 35.0);
        assert!(out.len() <= data.len());
    }
}

//! Fixed-Capacity Temporal Ring Buffer for Live Telemetry
//!
//! ## Overview
//!
//! The live view of a roast keeps the most recent samples in constant memory.
//! Samples arrive at roughly 1 Hz from the network collector; once the buffer is
//! full every push silently evicts the oldest retained sample.
//!
//! - O(1) `push` (overwrites oldest when full)
//! - O(1) access to the most recent sample
//! - O(n) ordered copy-out and range query
//! - One allocation, at construction
//!
//! ### Memory Layout
//!
//! Storage is a boxed slice of `Option<T>` plus a write cursor and a length:
//!
//! ```text
//! TemporalRingBuffer with capacity 5, after 7 pushes (A..G):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← physical slots
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2 (oldest retained sample)
//!
//! Logical view: [C, D, E, F, G]
//! ```
//!
//! Callers only ever see the logical view. There is no accessor for physical
//! slots, so slot order cannot leak out as an accidental invariant.
//!
//! ### Ordering
//!
//! Logical order is insertion order. With a well-behaved producer that is also
//! ascending timestamp order. Out-of-order pushes are kept where they land (the
//! buffer does not sort) and are reported at debug level so the producer can be
//! fixed upstream.
//!
//! ## Usage Example
//!
//! ```rust
//! use roastline_core::{TemporalRingBuffer, TelemetrySample};
//!
//! let mut history = TemporalRingBuffer::new(3).unwrap();
//! for t in 0..5 {
//!     history.push(TelemetrySample::at(t as f64).with_bean_temp(150.0 + t as f32));
//! }
//!
//! assert_eq!(history.len(), 3);
//! let temps: Vec<_> = history.iter().filter_map(|s| s.bean_temp).collect();
//! assert_eq!(temps, vec![152.0, 153.0, 154.0]);
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use crate::constants::buffers::MIN_BUFFER_CAPACITY;
use crate::errors::{TelemetryError, TelemetryResult};
use crate::range::range_filter;
use crate::traits::{Seconds, Timestamped};

/// Fixed-capacity circular store of timestamped points
///
/// ## Internal Invariants
///
/// - `write_pos < capacity` (next write position is always valid)
/// - `len <= capacity` (never claim to have more items than capacity)
/// - Slots `0..len` are `Some` while the buffer is filling; all slots are
///   `Some` once it is full
///
/// ## Thread Safety
///
/// This type is not thread-safe on its own. Use [`SharedTelemetryBuffer`] when
/// the ingestion task and readers live on different threads.
#[derive(Debug, Clone)]
pub struct TemporalRingBuffer<T> {
    /// Storage slots, `None` until first written
    data: Box<[Option<T>]>,

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of retained points
    len: usize,
}

impl<T: Timestamped + Clone> TemporalRingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` points
    ///
    /// Fails with [`TelemetryError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> TelemetryResult<Self> {
        if capacity < MIN_BUFFER_CAPACITY {
            return Err(TelemetryError::ZeroCapacity);
        }

        Ok(Self {
            data: (0..capacity).map(|_| None).collect(),
            write_pos: 0,
            len: 0,
        })
    }

    /// Appends a point, evicting the oldest one when full
    pub fn push(&mut self, point: T) {
        if let Some(latest) = self.latest() {
            if point.timestamp() < latest.timestamp() {
                log::debug!(
                    "Out-of-order push: t={} after t={}",
                    point.timestamp(),
                    latest.timestamp()
                );
            }
        }

        self.data[self.write_pos] = Some(point);
        self.write_pos = (self.write_pos + 1) % self.capacity();

        if self.len < self.capacity() {
            self.len += 1;
        }
    }

    /// Number of retained points
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of retained points
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Most recently pushed point
    pub fn latest(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 {
            self.capacity() - 1
        } else {
            self.write_pos - 1
        };

        self.data[idx].as_ref()
    }

    /// Iterate over points from oldest to newest
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            buffer: self,
            index: 0,
        }
    }

    /// Ordered copy of every retained point
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }

    /// Ordered copy of the points with `start <= timestamp <= end`
    pub fn range(&self, start: Seconds, end: Seconds) -> Vec<T> {
        range_filter(&self.to_vec(), start, end).to_vec()
    }

    /// Drops every point and rewinds the write cursor; capacity is unchanged
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = None);
        self.write_pos = 0;
        self.len = 0;
    }

    /// Gets a point by its logical index (0 = oldest, len-1 = newest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]
    /// Mapping: logical[i] = physical[(write_pos + i) % capacity]
    /// ```
    fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let physical = if self.is_full() {
            (self.write_pos + index) % self.capacity()
        } else {
            index
        };

        self.data[physical].as_ref()
    }
}

/// Iterator over ring buffer contents in logical order
pub struct RingIter<'a, T> {
    buffer: &'a TemporalRingBuffer<T>,
    index: usize,
}

impl<'a, T: Timestamped + Clone> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// Cloneable handle to a ring buffer shared between one writer and many readers
///
/// Reads never hand out references into the buffer; they copy out a consistent
/// snapshot under the read lock. A poisoned lock is recovered: every mutation
/// leaves the buffer in a valid state, so a panicking reader cannot corrupt it.
#[derive(Debug, Clone)]
pub struct SharedTelemetryBuffer<T> {
    inner: Arc<RwLock<TemporalRingBuffer<T>>>,
}

impl<T: Timestamped + Clone> SharedTelemetryBuffer<T> {
    /// Creates a shared buffer holding at most `capacity` points
    pub fn new(capacity: usize) -> TelemetryResult<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(TemporalRingBuffer::new(capacity)?)),
        })
    }

    /// Appends a point (ingestion path)
    pub fn push(&self, point: T) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(point);
    }

    /// Ordered snapshot of every retained point
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).to_vec()
    }

    /// Ordered snapshot of the points in `[start, end]`
    pub fn range(&self, start: Seconds, end: Seconds) -> Vec<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .range(start, end)
    }

    /// Copy of the most recent point
    pub fn latest(&self) -> Option<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .latest()
            .cloned()
    }

    /// Number of retained points
    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the buffer (new session on the same device)
    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

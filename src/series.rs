//! Bounded, time-ordered sample buffers, one per sensor parameter.
//!
//! Each buffer is a FIFO ring over `(timestamp, observed, predicted)`
//! readings: appends go to the tail, and once the retention cap is reached
//! every append evicts exactly one sample from the head. Consumers never
//! touch the live deque; they read owned snapshots.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One reading in a parameter series.
///
/// `value` is the observed track; `predicted` is the lower-noise companion
/// rendered as the forecast overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Epoch seconds.
    pub ts: u64,
    pub value: f64,
    pub predicted: f64,
}

/// Capacity-bounded, append-only series for one parameter key.
///
/// Invariants: samples are non-decreasing in `ts` (insertion order is
/// chronological order) and `len() <= retention_cap` at all times.
#[derive(Debug, Clone)]
pub struct SeriesBuffer {
    key: String,
    samples: VecDeque<Sample>,
    retention_cap: usize,
}

impl SeriesBuffer {
    pub fn new(key: &str, retention_cap: usize) -> Self {
        Self {
            key: key.to_string(),
            samples: VecDeque::with_capacity(retention_cap.min(4096)),
            retention_cap,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn retention_cap(&self) -> usize {
        self.retention_cap
    }

    /// Append at the tail, evicting the head when the cap is exceeded.
    ///
    /// Eviction is normal operation, not an error. A timestamp older than
    /// the stored tail is a programming error and fails fast.
    pub fn append(&mut self, sample: Sample) {
        if let Some(last) = self.samples.back() {
            assert!(
                sample.ts >= last.ts,
                "out-of-order append on '{}': {} < {}",
                self.key,
                sample.ts,
                last.ts
            );
        }
        if self.samples.len() >= self.retention_cap {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Owned copy of the current contents, oldest first.
    ///
    /// Later mutation of the buffer does not affect a returned snapshot;
    /// readers must use this rather than holding the live buffer across a
    /// tick boundary.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Most recent sample, or `None` when empty.
    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Sample `offset_from_end` positions before the tail (0 = latest,
    /// 24 = "24 samples ago"). Out of range yields `None`, never a panic.
    pub fn sample_at(&self, offset_from_end: usize) -> Option<Sample> {
        let len = self.samples.len();
        if offset_from_end >= len {
            return None;
        }
        self.samples.get(len - 1 - offset_from_end).copied()
    }

    /// Drop all samples, keeping the key and cap. Used on regeneration.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

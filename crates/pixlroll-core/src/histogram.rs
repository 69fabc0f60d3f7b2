// File: crates/pixlroll-core/src/histogram.rs
// Summary: Circular buffer of recent samples and its top-down cumulative distribution.

use crate::error::{PixlError, Result};
use crate::types::SampleRange;

/// Keeps the last `capacity` raw sample values.
#[derive(Clone, Debug)]
pub struct Histogram {
    samples: Vec<i32>,
    pos: usize,
    // slots written so far, saturates at capacity
    filled: usize,
}

impl Histogram {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PixlError::options("histogram capacity must be at least 1"));
        }
        Ok(Self { samples: vec![0; capacity], pos: 0, filled: 0 })
    }

    pub fn capacity(&self) -> usize { self.samples.len() }

    /// Number of slots holding a sample.
    pub fn len(&self) -> usize { self.filled }

    pub fn is_empty(&self) -> bool { self.filled == 0 }

    /// True once every slot has been written at least once.
    pub fn is_full(&self) -> bool { self.filled == self.samples.len() }

    /// Overwrite the oldest slots with `values`, in order.
    pub fn add_data(&mut self, values: &[i32]) {
        let cap = self.samples.len();
        for &v in values {
            self.samples[self.pos] = v;
            self.pos = (self.pos + 1) % cap;
        }
        self.filled = (self.filled + values.len()).min(cap);
    }

    /// Fraction of the buffer at or above each value of `range`, one entry per
    /// value from `lo` to `hi`.
    ///
    /// Counts are divided by the capacity, not by the number of samples seen,
    /// so the curve reads low until the buffer has filled once. Samples outside
    /// `range` are not counted.
    pub fn calculate(&self, range: SampleRange) -> Vec<f32> {
        let mut counts = vec![0u64; range.bins()];
        for &v in &self.samples[..self.written_slots()] {
            if let Some(i) = range.index_of(v) {
                counts[i] += 1;
            }
        }

        let scale = 1.0 / self.samples.len() as f64;
        let mut out = vec![0.0f32; counts.len()];
        let mut above = 0u64;
        for i in (0..counts.len()).rev() {
            above += counts[i];
            out[i] = (above as f64 * scale) as f32;
        }
        out
    }

    // Until the first wrap the written slots are exactly the prefix [0, filled).
    fn written_slots(&self) -> usize {
        if self.is_full() { self.samples.len() } else { self.filled }
    }
}

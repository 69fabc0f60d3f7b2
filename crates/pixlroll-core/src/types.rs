// File: crates/pixlroll-core/src/types.rs
// Summary: Shared types and constants (plot sizes, margins, sample range).

use crate::error::{PixlError, Result};
use crate::geometry::clamp;

/// Default logical plot width in pixels (one column per sample).
pub const PLOT_WIDTH: i32 = 1000;
/// Default logical plot height in pixels (one row per scroll event).
pub const PLOT_HEIGHT: i32 = 600;

/// Height of the colored legend strip.
pub const LEGEND_STRIP: i32 = 10;
/// Height of the legend block: strip, tick marks and tick labels.
pub const LEGEND_HEIGHT: i32 = 28;
/// Height of the cumulative histogram strip.
pub const HISTOGRAM_HEIGHT: i32 = 80;
/// Width of the timestamp gutter to the right of the plot.
pub const TIMESTAMP_GUTTER: i32 = 48;
/// Default spacing between timestamp labels, in seconds.
pub const TIMESTAMP_INTERVAL_SECS: i64 = 60;
/// Longest accepted timestamp interval, one week.
pub const MAX_TIMESTAMP_INTERVAL_SECS: i64 = 7 * 24 * 60 * 60;
/// Largest plot side; keeps plot plus gutter inside raster limits.
pub const MAX_PLOT_SIDE: i32 = 16_384;

/// Legend ticks land on values divisible by this.
pub const TICK_EVERY: i32 = 10;

/// Reserved screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    pub const fn new(right: u32, bottom: u32) -> Self {
        Self { right, bottom }
    }
}

/// Inclusive range of sample values, `lo <= hi`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleRange {
    lo: i32,
    hi: i32,
}

impl SampleRange {
    pub fn new(lo: i32, hi: i32) -> Result<Self> {
        if lo > hi {
            return Err(PixlError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Signed 8-bit domain, [-128, 127].
    pub const fn int8() -> Self { Self { lo: i8::MIN as i32, hi: i8::MAX as i32 } }
    /// Unsigned 8-bit domain, [0, 255].
    pub const fn uint8() -> Self { Self { lo: 0, hi: u8::MAX as i32 } }

    pub const fn lo(&self) -> i32 { self.lo }
    pub const fn hi(&self) -> i32 { self.hi }

    /// Number of distinct integer values, `hi - lo + 1`.
    pub const fn bins(&self) -> usize { (self.hi as i64 - self.lo as i64 + 1) as usize }

    pub const fn contains(&self, v: i32) -> bool { v >= self.lo && v <= self.hi }

    /// Nearest in-range value.
    pub fn clamp(&self, v: i32) -> i32 { clamp(v, self.lo, self.hi) }

    /// Position of `v` inside the range, 0.0 at `lo` and 1.0 at `hi`.
    /// A single-value range maps everything to 0.0.
    pub fn normalize(&self, v: i32) -> f32 {
        let span = self.hi as i64 - self.lo as i64;
        if span == 0 {
            return 0.0;
        }
        ((v as i64 - self.lo as i64) as f64 / span as f64) as f32
    }

    /// Offset of an in-range value from `lo`, usable as a table index.
    pub(crate) fn index_of(&self, v: i32) -> Option<usize> {
        if self.contains(v) { Some((v as i64 - self.lo as i64) as usize) } else { None }
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<i32> { self.lo..=self.hi }
}

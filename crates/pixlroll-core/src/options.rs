// File: crates/pixlroll-core/src/options.rs
// Summary: Plot configuration: range, palette, plot size, overlays and scroll discipline.

use chrono::Duration;

use crate::colormap::Palette;
use crate::error::{PixlError, Result};
use crate::scroll::ScrollMode;
use crate::theme::Theme;
use crate::types::{
    SampleRange, MAX_PLOT_SIDE, MAX_TIMESTAMP_INTERVAL_SECS, PLOT_HEIGHT, PLOT_WIDTH, TIMESTAMP_INTERVAL_SECS,
};

/// Which decorations are drawn around the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlays {
    pub legend: bool,
    pub histogram: bool,
    pub timestamps: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self { legend: true, histogram: false, timestamps: false }
    }
}

#[derive(Clone, Debug)]
pub struct PlotOptions {
    pub range: SampleRange,
    pub palette: Palette,
    /// Logical plot size; one column per sample, one row per scroll event.
    pub plot_width: i32,
    pub plot_height: i32,
    /// Number of recent samples behind the histogram; required when
    /// `overlays.histogram` is set.
    pub histogram_capacity: Option<usize>,
    pub timestamp_interval: Duration,
    pub scroll_mode: ScrollMode,
    pub overlays: Overlays,
    /// Text for legend ticks and timestamps. Off gives font-independent output.
    pub draw_labels: bool,
    pub theme: Theme,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            range: SampleRange::int8(),
            palette: Palette::Rainbow,
            plot_width: PLOT_WIDTH,
            plot_height: PLOT_HEIGHT,
            histogram_capacity: None,
            timestamp_interval: Duration::seconds(TIMESTAMP_INTERVAL_SECS),
            scroll_mode: ScrollMode::Blit,
            overlays: Overlays::default(),
            draw_labels: true,
            theme: Theme::dark(),
        }
    }
}

impl PlotOptions {
    /// Enable the histogram overlay over the last `capacity` samples.
    pub fn with_histogram(mut self, capacity: usize) -> Self {
        self.histogram_capacity = Some(capacity);
        self.overlays.histogram = true;
        self
    }

    pub fn with_timestamps(mut self, interval: Duration) -> Self {
        self.timestamp_interval = interval;
        self.overlays.timestamps = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.plot_width <= 0 || self.plot_height <= 0 {
            return Err(PixlError::options(format!(
                "plot size must be positive, got {}x{}",
                self.plot_width, self.plot_height
            )));
        }
        if self.plot_width > MAX_PLOT_SIDE || self.plot_height > MAX_PLOT_SIDE {
            return Err(PixlError::options(format!(
                "plot size {}x{} exceeds {MAX_PLOT_SIDE} pixels per side",
                self.plot_width, self.plot_height
            )));
        }
        match (self.overlays.histogram, self.histogram_capacity) {
            (true, None) => return Err(PixlError::options("histogram overlay needs a capacity")),
            (_, Some(0)) => return Err(PixlError::options("histogram capacity must be at least 1")),
            _ => {}
        }
        if self.overlays.timestamps {
            if self.timestamp_interval <= Duration::zero() {
                return Err(PixlError::options("timestamp interval must be positive"));
            }
            if self.timestamp_interval.num_seconds() > MAX_TIMESTAMP_INTERVAL_SECS {
                return Err(PixlError::options(format!(
                    "timestamp interval {}s exceeds {MAX_TIMESTAMP_INTERVAL_SECS}s",
                    self.timestamp_interval.num_seconds()
                )));
            }
        }
        Ok(())
    }
}

// File: crates/pixlroll-core/src/plotter.rs
// Summary: The plot context: owns buffer, histogram and compositor, tracks screen damage, renders frames.
// Notes:
// - Not shared between threads: hosts own one per window and call `add_data`
//   and `frame_rgba8` from the thread running the event loop.

use chrono::{DateTime, Local};
use skia_safe as skia;

use crate::compositor::{raster_rgba, read_rgba8, Compositor};
use crate::error::Result;
use crate::geometry::RectI32;
use crate::histogram::Histogram;
use crate::options::PlotOptions;
use crate::scroll::{AddSummary, ScrollBuffer};
use crate::surface::SurfaceHooks;

#[derive(Clone, Copy, Debug, Default)]
struct Pending {
    full: bool,
    band: Option<RectI32>,
    histogram: bool,
}

pub struct Plotter {
    scroll: ScrollBuffer,
    histogram: Option<Histogram>,
    compositor: Compositor,
    size: (i32, i32),
    // persistent frame at `size`, patched in place between full repaints
    frame: Option<skia::Surface>,
    pending: Pending,
    attached: bool,
}

impl Plotter {
    pub fn new(opts: &PlotOptions) -> Result<Self> {
        let scroll = ScrollBuffer::new(opts)?;
        let histogram = match (opts.overlays.histogram, opts.histogram_capacity) {
            (true, Some(capacity)) => Some(Histogram::new(capacity)?),
            _ => None,
        };
        let compositor = Compositor::new(opts);
        let mut plotter = Self {
            scroll,
            histogram,
            compositor,
            size: (0, 0),
            frame: None,
            pending: Pending { full: true, ..Pending::default() },
            attached: false,
        };
        plotter.size = plotter.natural_size();
        tracing::info!(
            palette = %opts.palette,
            lo = opts.range.lo(),
            hi = opts.range.hi(),
            histogram = ?opts.histogram_capacity,
            timestamps = opts.overlays.timestamps,
            "plotter ready"
        );
        Ok(plotter)
    }

    /// Surface size showing the plot at 1:1 with all margins.
    pub fn natural_size(&self) -> (i32, i32) {
        let (w, h) = self.scroll.plot_size();
        let m = self.compositor.margins(&self.scroll);
        (w + m.right as i32, h + m.bottom as i32)
    }

    pub fn size(&self) -> (i32, i32) { self.size }
    pub fn scroll(&self) -> &ScrollBuffer { &self.scroll }
    pub fn scroll_mut(&mut self) -> &mut ScrollBuffer { &mut self.scroll }
    pub fn histogram(&self) -> Option<&Histogram> { self.histogram.as_ref() }
    pub fn compositor(&self) -> &Compositor { &self.compositor }

    /// Feed one batch to the buffer and, when enabled, the histogram.
    pub fn add_data(&mut self, samples: &[i32]) -> AddSummary {
        self.add_data_at(samples, Local::now())
    }

    pub fn add_data_at(&mut self, samples: &[i32], now: DateTime<Local>) -> AddSummary {
        let summary = self.scroll.add_data_at(samples, now);
        if let Some(h) = self.histogram.as_mut() {
            h.add_data(samples);
            self.pending.histogram |= !samples.is_empty();
        }
        if let Some(dirty) = self.scroll.take_dirty() {
            if let Some(screen) = self.compositor.screen_rect(self.size, &self.scroll, dirty) {
                self.pending.band = Some(self.pending.band.map_or(screen, |b| b.union(&screen)));
            }
        }
        summary
    }

    pub fn needs_redraw(&self) -> bool {
        self.pending.full || self.pending.band.is_some() || self.pending.histogram
    }

    /// Screen area the next frame will repaint.
    pub fn damage(&self) -> Option<RectI32> {
        let (w, h) = self.size;
        if self.pending.full {
            return Some(RectI32::from_ltwh(0, 0, w, h));
        }
        let strip = if self.pending.histogram {
            self.compositor.layout(self.size, &self.scroll).histogram
        } else {
            None
        };
        match (self.pending.band, strip) {
            (Some(b), Some(s)) => Some(b.union(&s)),
            (b, s) => b.or(s),
        }
    }

    /// Bring the persistent frame up to date and return it as RGBA8888.
    /// Only damaged regions are repainted unless the size changed.
    pub fn frame_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (self.size.0.max(1), self.size.1.max(1));
        let mut frame = match self.frame.take() {
            Some(f) if f.width() == w && f.height() == h => f,
            _ => {
                self.pending.full = true;
                raster_rgba(w, h)?
            }
        };

        let pending = std::mem::take(&mut self.pending);
        let canvas = frame.canvas();
        if pending.full {
            self.compositor.render(canvas, (w, h), &mut self.scroll, self.histogram.as_ref());
        } else {
            if let Some(band) = pending.band {
                self.compositor.render_region(canvas, (w, h), &mut self.scroll, band);
            }
            if let (true, Some(hist)) = (pending.histogram, self.histogram.as_ref()) {
                self.compositor.render_histogram(canvas, (w, h), &self.scroll, hist);
            }
        }

        let out = read_rgba8(&mut frame);
        self.frame = Some(frame);
        out
    }
}

impl SurfaceHooks for Plotter {
    fn on_attach(&mut self) {
        if self.attached {
            tracing::debug!("surface attached again; ignoring");
            return;
        }
        self.attached = true;
        self.scroll.clear();
        let _ = self.scroll.take_dirty();
        self.pending.full = true;
    }

    fn on_resize(&mut self, width: i32, height: i32) {
        let size = (width.max(1), height.max(1));
        if size == self.size {
            return;
        }
        tracing::debug!(width = size.0, height = size.1, "surface resized");
        self.size = size;
        self.frame = None;
        self.pending.full = true;
    }

    fn render(&mut self, canvas: &skia::Canvas) {
        self.compositor.render(canvas, self.size, &mut self.scroll, self.histogram.as_ref());
    }
}

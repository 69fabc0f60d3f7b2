// File: crates/pixlroll-core/src/scroll.rs
// Summary: Offscreen waterfall buffer: per-sample pixel writes, row scrolling and the timestamp gutter.
// Notes:
// - The backing raster is `plot_width + gutter` pixels wide. The gutter is part of
//   the same surface, so stamped labels scroll together with the data rows.
// - All dirty rectangles are in buffer pixels; the compositor maps them to the screen.

use chrono::{DateTime, Duration, Local};
use skia_safe as skia;

use crate::colormap::ColorMap;
use crate::error::{PixlError, Result};
use crate::geometry::RectI32;
use crate::options::PlotOptions;
use crate::text::{TextShaper, LABEL_SIZE};
use crate::types::TIMESTAMP_GUTTER;

/// How history makes room for a new row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollMode {
    /// New data enters on the bottom row; on each scroll the whole buffer is
    /// blitted one row up. A true waterfall.
    #[default]
    Blit,
    /// Legacy fallback for back ends that cannot self-blit: a write row walks
    /// down and wraps, pre-clearing the row ahead of it.
    Wipe,
}

/// What one call to [`ScrollBuffer::add_data`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddSummary {
    pub written: usize,
    /// Samples that fell outside the declared range and were clamped.
    pub clamped: usize,
    pub scrolls: usize,
    /// Timestamp labels stamped during this call, oldest first.
    pub stamps: Vec<DateTime<Local>>,
}

#[derive(Debug)]
struct TimestampGutter {
    width: i32,
    interval: Duration,
    // last labelled instant; set on the first batch
    boundary: Option<DateTime<Local>>,
    // the next boundary is not representable; no more labels
    exhausted: bool,
}

pub struct ScrollBuffer {
    surface: skia::Surface,
    colormap: ColorMap,
    mode: ScrollMode,
    plot_width: i32,
    plot_height: i32,
    background: skia::Color,
    stamp_color: skia::Color,
    cursor_x: i32,
    cursor_y: i32,
    scrolls: u64,
    dirty: Option<RectI32>,
    gutter: Option<TimestampGutter>,
    text: Option<TextShaper>,
}

impl ScrollBuffer {
    pub fn new(opts: &PlotOptions) -> Result<Self> {
        opts.validate()?;
        let gutter = opts.overlays.timestamps.then(|| TimestampGutter {
            width: TIMESTAMP_GUTTER,
            interval: opts.timestamp_interval,
            boundary: None,
            exhausted: false,
        });
        let gutter_width = gutter.as_ref().map_or(0, |g| g.width);

        let mut surface = skia::surfaces::raster_n32_premul((opts.plot_width + gutter_width, opts.plot_height))
            .ok_or_else(|| {
                PixlError::surface(format!(
                    "failed to create {}x{} raster surface",
                    opts.plot_width + gutter_width,
                    opts.plot_height
                ))
            })?;
        surface.canvas().clear(opts.theme.background);

        let text = (gutter.is_some() && opts.draw_labels).then(TextShaper::new);
        tracing::debug!(
            width = opts.plot_width,
            height = opts.plot_height,
            gutter = gutter_width,
            mode = ?opts.scroll_mode,
            "created scroll buffer"
        );

        Ok(Self {
            surface,
            colormap: ColorMap::build(opts.range, opts.palette),
            mode: opts.scroll_mode,
            plot_width: opts.plot_width,
            plot_height: opts.plot_height,
            background: opts.theme.background,
            stamp_color: opts.theme.timestamp,
            cursor_x: 0,
            cursor_y: 0,
            scrolls: 0,
            dirty: None,
            gutter,
            text,
        })
    }

    pub fn colormap(&self) -> &ColorMap { &self.colormap }
    pub fn mode(&self) -> ScrollMode { self.mode }
    pub fn plot_size(&self) -> (i32, i32) { (self.plot_width, self.plot_height) }
    pub fn gutter_width(&self) -> i32 { self.gutter.as_ref().map_or(0, |g| g.width) }
    /// Full backing surface size, plot plus gutter.
    pub fn buffer_size(&self) -> (i32, i32) { (self.plot_width + self.gutter_width(), self.plot_height) }
    pub fn background(&self) -> skia::Color { self.background }

    /// Next column to be written.
    pub fn cursor_x(&self) -> i32 { self.cursor_x }
    /// Row currently being written.
    pub fn cursor_y(&self) -> i32 {
        match self.mode {
            ScrollMode::Blit => self.plot_height - 1,
            ScrollMode::Wipe => self.cursor_y,
        }
    }
    /// Scroll events since creation.
    pub fn scroll_count(&self) -> u64 { self.scrolls }

    /// Append samples using the current wall-clock time for timestamps.
    pub fn add_data(&mut self, samples: &[i32]) -> AddSummary {
        self.add_data_at(samples, Local::now())
    }

    /// Append samples one pixel at a time, scrolling whenever the row is full.
    /// `now` drives the timestamp gutter.
    pub fn add_data_at(&mut self, samples: &[i32], now: DateTime<Local>) -> AddSummary {
        let mut summary = AddSummary::default();
        if let Some(g) = self.gutter.as_mut() {
            g.boundary.get_or_insert(now);
        }

        let range = self.colormap.range();
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(false);
        paint.set_blend_mode(skia::BlendMode::Src);

        let mut span_start = self.cursor_x;
        for &v in samples {
            if !range.contains(v) {
                summary.clamped += 1;
            }
            paint.set_color(self.colormap.lookup_clamped(v).to_color());
            let row = self.cursor_y();
            let px = skia::Rect::from_xywh(self.cursor_x as f32, row as f32, 1.0, 1.0);
            self.surface.canvas().draw_rect(px, &paint);
            summary.written += 1;

            self.cursor_x += 1;
            if self.cursor_x >= self.plot_width {
                self.mark_dirty(RectI32::from_ltrb(span_start, row, self.plot_width, row + 1));
                self.scroll(now, &mut summary);
                span_start = 0;
            }
        }
        if self.cursor_x > span_start {
            let row = self.cursor_y();
            self.mark_dirty(RectI32::from_ltrb(span_start, row, self.cursor_x, row + 1));
        }

        if summary.clamped > 0 {
            tracing::trace!(clamped = summary.clamped, lo = range.lo(), hi = range.hi(), "clamped out-of-range samples");
        }
        summary
    }

    fn scroll(&mut self, now: DateTime<Local>, summary: &mut AddSummary) {
        self.cursor_x = 0;
        self.scrolls += 1;
        summary.scrolls += 1;

        let (full_w, h) = self.buffer_size();
        let row = match self.mode {
            ScrollMode::Blit => {
                let snapshot = self.surface.image_snapshot();
                let mut paint = skia::Paint::default();
                paint.set_blend_mode(skia::BlendMode::Src);
                self.surface.canvas().draw_image(&snapshot, (0.0, -1.0), Some(&paint));
                self.clear_row(h - 1);
                self.mark_dirty(RectI32::from_ltwh(0, 0, full_w, h));
                h - 1
            }
            ScrollMode::Wipe => {
                let finished = self.cursor_y;
                self.cursor_y = (self.cursor_y + 1) % h;
                let ahead = (self.cursor_y + 1) % h;
                self.clear_row(ahead);
                if ahead > finished {
                    self.mark_dirty(RectI32::from_ltrb(0, finished, full_w, ahead + 1));
                } else {
                    self.mark_dirty(RectI32::from_ltwh(0, 0, full_w, h));
                }
                self.cursor_y
            }
        };
        tracing::trace!(scrolls = self.scrolls, row, "scrolled");

        self.maybe_stamp(row, now, summary);
    }

    // At most one label per scroll event; the boundary moves by exactly one
    // interval so a late tick does not push later labels off the grid.
    fn maybe_stamp(&mut self, row: i32, now: DateTime<Local>, summary: &mut AddSummary) {
        let Some(g) = self.gutter.as_mut() else { return };
        let Some(boundary) = g.boundary.filter(|_| !g.exhausted) else { return };
        let Some(next) = boundary.checked_add_signed(g.interval) else {
            tracing::warn!(boundary = %boundary, "timestamp boundary overflows; gutter stops stamping");
            g.exhausted = true;
            return;
        };
        if now < next {
            return;
        }
        g.boundary = Some(next);
        summary.stamps.push(next);
        tracing::debug!(at = %next.format("%H:%M:%S"), row, "stamped timestamp");
        self.draw_stamp(row, next);
    }

    fn draw_stamp(&mut self, row: i32, at: DateTime<Local>) {
        let x0 = self.plot_width as f32;
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(false);
        paint.set_color(self.stamp_color);
        let canvas = self.surface.canvas();
        canvas.draw_rect(skia::Rect::from_xywh(x0, row as f32, 4.0, 1.0), &paint);
        if let Some(text) = &self.text {
            let label = at.format("%H:%M").to_string();
            text.draw_left(canvas, &label, x0 + 6.0, (row + 1) as f32, LABEL_SIZE, self.stamp_color);
        }
    }

    fn clear_row(&mut self, y: i32) {
        let (full_w, _) = self.buffer_size();
        let mut paint = skia::Paint::default();
        paint.set_blend_mode(skia::BlendMode::Src);
        paint.set_color(self.background);
        self.surface.canvas().draw_rect(skia::Rect::from_xywh(0.0, y as f32, full_w as f32, 1.0), &paint);
    }

    fn mark_dirty(&mut self, r: RectI32) {
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(&r),
            None => r,
        });
    }

    /// Region changed since the last call, in buffer pixels.
    pub fn take_dirty(&mut self) -> Option<RectI32> {
        self.dirty.take()
    }

    /// Paint the whole buffer with the background and mark it dirty.
    pub fn clear(&mut self) {
        self.surface.canvas().clear(self.background);
        let (w, h) = self.buffer_size();
        self.mark_dirty(RectI32::from_ltwh(0, 0, w, h));
    }

    /// Immutable copy of the current buffer contents for blitting.
    pub fn snapshot(&mut self) -> skia::Image {
        self.surface.image_snapshot()
    }

    /// Color of the buffer pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<skia::Color> {
        let (w, h) = self.buffer_size();
        if x < 0 || y < 0 || x >= w || y >= h {
            return None;
        }
        let info = skia::ImageInfo::new((1, 1), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let mut px = [0u8; 4];
        if !self.surface.read_pixels(&info, &mut px, 4, (x, y)) {
            return None;
        }
        Some(skia::Color::from_argb(px[3], px[0], px[1], px[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleRange;

    fn small(mode: ScrollMode) -> ScrollBuffer {
        let mut opts = PlotOptions::default();
        opts.range = SampleRange::new(0, 9).unwrap();
        opts.plot_width = 3;
        opts.plot_height = 4;
        opts.scroll_mode = mode;
        ScrollBuffer::new(&opts).unwrap()
    }

    #[test]
    fn partial_row_marks_only_written_span() {
        let mut sb = small(ScrollMode::Blit);
        sb.add_data(&[1, 2]);
        assert_eq!(sb.take_dirty(), Some(RectI32::from_ltrb(0, 3, 2, 4)));
        sb.add_data(&[3]);
        // the row completed, so the whole buffer moved
        assert_eq!(sb.take_dirty(), Some(RectI32::from_ltwh(0, 0, 3, 4)));
        assert_eq!(sb.take_dirty(), None);
    }

    #[test]
    fn wipe_dirty_band_covers_finished_and_cleared_rows() {
        let mut sb = small(ScrollMode::Wipe);
        sb.add_data(&[1, 2, 3]);
        assert_eq!(sb.cursor_y(), 1);
        assert_eq!(sb.take_dirty(), Some(RectI32::from_ltrb(0, 0, 3, 3)));
    }

    #[test]
    fn stamping_stops_when_the_next_boundary_overflows() {
        use chrono::{NaiveDateTime, TimeZone};

        let mut opts = PlotOptions::default().with_timestamps(Duration::days(7));
        opts.plot_width = 2;
        opts.plot_height = 4;
        opts.draw_labels = false;
        let mut sb = ScrollBuffer::new(&opts).unwrap();

        let near_end = Local.from_utc_datetime(&(NaiveDateTime::MAX - Duration::days(2)));
        let summary = sb.add_data_at(&[0, 0, 0, 0], near_end);
        assert_eq!(summary.scrolls, 2);
        assert!(summary.stamps.is_empty());
        assert!(sb.gutter.as_ref().unwrap().exhausted);

        let summary = sb.add_data_at(&[0, 0], near_end);
        assert_eq!(summary.scrolls, 1);
        assert!(summary.stamps.is_empty());
    }

    #[test]
    fn wipe_band_wrapping_marks_full_height() {
        let mut sb = small(ScrollMode::Wipe);
        sb.add_data(&[0; 9]);
        let _ = sb.take_dirty();
        // cursor wraps from the last row back to row 0
        sb.add_data(&[0; 3]);
        assert_eq!(sb.cursor_y(), 0);
        assert_eq!(sb.take_dirty(), Some(RectI32::from_ltwh(0, 0, 3, 4)));
    }
}

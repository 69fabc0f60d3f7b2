// File: crates/pixlroll-core/src/compositor.rs
// Summary: Scales the scroll buffer onto a Skia canvas and draws legend, histogram and gutter.
// Notes:
// - Screen layout, top to bottom: plot (+ gutter on the right), histogram strip, legend.
// - Margins are unscaled screen pixels; only the plot area follows the surface size.

use skia_safe as skia;

use crate::colormap::ColorMap;
use crate::error::{PixlError, Result};
use crate::geometry::RectI32;
use crate::grid::gridlines;
use crate::histogram::Histogram;
use crate::options::{Overlays, PlotOptions};
use crate::scroll::ScrollBuffer;
use crate::text::{TextShaper, LABEL_SIZE};
use crate::theme::Theme;
use crate::types::{Margins, HISTOGRAM_HEIGHT, LEGEND_HEIGHT, LEGEND_STRIP, TICK_EVERY};

/// Where everything lands on a surface of a given size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub margins: Margins,
    /// Scaled plot columns.
    pub plot: RectI32,
    pub gutter: Option<RectI32>,
    pub histogram: Option<RectI32>,
    pub legend: Option<RectI32>,
    pub sx: f32,
    pub sy: f32,
}

impl Layout {
    /// Everything above the histogram and legend, gutter included.
    pub fn band(&self) -> RectI32 {
        RectI32::from_ltwh(0, 0, self.width, self.plot.height())
    }
}

pub struct Compositor {
    theme: Theme,
    overlays: Overlays,
    text: Option<TextShaper>,
}

impl Compositor {
    pub fn new(opts: &PlotOptions) -> Self {
        let text = (opts.draw_labels && opts.overlays.legend).then(TextShaper::new);
        Self { theme: opts.theme, overlays: opts.overlays, text }
    }

    pub fn theme(&self) -> &Theme { &self.theme }

    /// Screen space reserved outside the scaled plot.
    pub fn margins(&self, scroll: &ScrollBuffer) -> Margins {
        let mut bottom = 0;
        if self.overlays.legend { bottom += LEGEND_HEIGHT; }
        if self.overlays.histogram { bottom += HISTOGRAM_HEIGHT; }
        Margins::new(scroll.gutter_width().max(0) as u32, bottom as u32)
    }

    pub fn layout(&self, size: (i32, i32), scroll: &ScrollBuffer) -> Layout {
        let (width, height) = (size.0.max(1), size.1.max(1));
        let margins = self.margins(scroll);
        let plot_w = (width - margins.right as i32).max(0);
        let plot_h = (height - margins.bottom as i32).max(0);
        let (buf_w, buf_h) = scroll.plot_size();

        let gutter = (margins.right > 0).then(|| RectI32::from_ltwh(plot_w, 0, margins.right as i32, plot_h));
        let histogram = self.overlays.histogram.then(|| RectI32::from_ltwh(0, plot_h, plot_w, HISTOGRAM_HEIGHT));
        let legend = self.overlays.legend.then(|| RectI32::from_ltrb(0, height - LEGEND_HEIGHT, plot_w, height));

        Layout {
            width,
            height,
            margins,
            plot: RectI32::from_ltwh(0, 0, plot_w, plot_h),
            gutter,
            histogram,
            legend,
            sx: plot_w as f32 / buf_w as f32,
            sy: plot_h as f32 / buf_h as f32,
        }
    }

    /// Full repaint of a `size` surface.
    pub fn render(&self, canvas: &skia::Canvas, size: (i32, i32), scroll: &mut ScrollBuffer, histogram: Option<&Histogram>) {
        let layout = self.layout(size, scroll);
        canvas.clear(self.theme.background);

        let image = scroll.snapshot();
        self.blit(canvas, &layout, &image, scroll);

        if let (Some(strip), Some(h)) = (layout.histogram, histogram) {
            self.draw_histogram(canvas, strip, h, scroll.colormap());
        }
        if let Some(strip) = layout.legend {
            self.draw_legend(canvas, strip, scroll.colormap());
        }
    }

    /// Map a dirty rectangle in buffer pixels to the screen band it covers.
    /// The result never reaches into the histogram or legend.
    pub fn screen_rect(&self, size: (i32, i32), scroll: &ScrollBuffer, dirty: RectI32) -> Option<RectI32> {
        let layout = self.layout(size, scroll);
        let (buf_w, _) = scroll.plot_size();
        let map_x = |x: i32| -> f32 {
            if x <= buf_w {
                x as f32 * layout.sx
            } else {
                (layout.plot.right + (x - buf_w)) as f32
            }
        };
        let screen = RectI32::from_ltrb(
            map_x(dirty.left).floor() as i32,
            (dirty.top as f32 * layout.sy).floor() as i32,
            map_x(dirty.right).ceil() as i32,
            (dirty.bottom as f32 * layout.sy).ceil() as i32,
        );
        screen.intersect(&layout.band())
    }

    /// Repaint only `band` (screen pixels) of the plot and gutter. Cost follows
    /// the band size, not the surface size.
    pub fn render_region(&self, canvas: &skia::Canvas, size: (i32, i32), scroll: &mut ScrollBuffer, band: RectI32) {
        let layout = self.layout(size, scroll);
        let Some(band) = band.intersect(&layout.band()) else { return };

        canvas.save();
        canvas.clip_rect(band.to_skia(), skia::ClipOp::Intersect, false);
        let mut bg = skia::Paint::default();
        bg.set_color(self.theme.background);
        canvas.draw_rect(band.to_skia(), &bg);
        let image = scroll.snapshot();
        self.blit(canvas, &layout, &image, scroll);
        canvas.restore();
    }

    /// Render a full frame offscreen and return `(rgba, width, height, stride)`.
    pub fn render_to_rgba8(
        &self,
        size: (i32, i32),
        scroll: &mut ScrollBuffer,
        histogram: Option<&Histogram>,
    ) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (size.0.max(1), size.1.max(1));
        let mut surface = raster_rgba(w, h)?;
        self.render(surface.canvas(), (w, h), scroll, histogram);
        read_rgba8(&mut surface)
    }

    /// Clear and redraw just the histogram strip, if it is shown.
    pub fn render_histogram(&self, canvas: &skia::Canvas, size: (i32, i32), scroll: &ScrollBuffer, histogram: &Histogram) {
        let layout = self.layout(size, scroll);
        let Some(strip) = layout.histogram else { return };
        let mut bg = skia::Paint::default();
        bg.set_color(self.theme.background);
        canvas.draw_rect(strip.to_skia(), &bg);
        self.draw_histogram(canvas, strip, histogram, scroll.colormap());
    }

    fn blit(&self, canvas: &skia::Canvas, layout: &Layout, image: &skia::Image, scroll: &ScrollBuffer) {
        let (buf_w, buf_h) = scroll.plot_size();
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(false);

        let src = skia::Rect::from_wh(buf_w as f32, buf_h as f32);
        canvas.draw_image_rect(image, Some((&src, skia::canvas::SrcRectConstraint::Strict)), layout.plot.to_skia(), &paint);

        // The gutter keeps its pixel width and only follows the vertical scale
        // so labels stay aligned with their rows.
        if let Some(gutter) = layout.gutter {
            let gw = scroll.gutter_width() as f32;
            let src = skia::Rect::from_xywh(buf_w as f32, 0.0, gw, buf_h as f32);
            canvas.draw_image_rect(image, Some((&src, skia::canvas::SrcRectConstraint::Strict)), gutter.to_skia(), &paint);
        }
    }

    fn draw_legend(&self, canvas: &skia::Canvas, strip: RectI32, cmap: &ColorMap) {
        let range = cmap.range();
        let cell = strip.width() as f32 / range.bins() as f32;

        let mut fill = skia::Paint::default();
        fill.set_anti_alias(false);
        let mut tick = skia::Paint::default();
        tick.set_color(self.theme.tick);
        tick.set_stroke_width(1.0);

        let top = strip.top as f32;
        for (i, v) in range.iter().enumerate() {
            let Ok(rgb) = cmap.lookup(v) else { continue };
            let x = strip.left as f32 + i as f32 * cell;
            fill.set_color(rgb.to_color());
            // one pixel of overlap hides seams between fractional cells
            canvas.draw_rect(skia::Rect::from_xywh(x, top, cell + 1.0, LEGEND_STRIP as f32), &fill);

            if v.rem_euclid(TICK_EVERY) == 0 {
                let cx = (x + cell * 0.5).floor() + 0.5;
                let y0 = top + LEGEND_STRIP as f32;
                canvas.draw_line((cx, y0), (cx, y0 + 4.0), &tick);
                if let Some(text) = &self.text {
                    text.draw_centered(canvas, &v.to_string(), cx, y0 + 4.0 + LABEL_SIZE, LABEL_SIZE, self.theme.label);
                }
            }
        }
    }

    fn draw_histogram(&self, canvas: &skia::Canvas, strip: RectI32, h: &Histogram, cmap: &ColorMap) {
        let range = cmap.range();
        let fractions = h.calculate(range);
        let cell = strip.width() as f32 / fractions.len() as f32;

        canvas.save();
        canvas.clip_rect(strip.to_skia(), skia::ClipOp::Intersect, false);
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(false);
        for (i, (frac, v)) in fractions.iter().zip(range.iter()).enumerate() {
            let height = frac * strip.height() as f32;
            if height <= 0.0 {
                continue;
            }
            fill.set_color(cmap.lookup_clamped(v).to_color());
            let x = strip.left as f32 + i as f32 * cell;
            canvas.draw_rect(skia::Rect::from_xywh(x, strip.top as f32, cell + 1.0, height), &fill);
        }

        let mut grid = skia::Paint::default();
        grid.set_color(self.theme.grid);
        grid.set_stroke_width(1.0);
        // the bottom edge would sit on the legend
        for y in gridlines(strip.top, strip.bottom, 10).into_iter().take(10) {
            let y = y.floor() + 0.5;
            canvas.draw_line((strip.left as f32, y), (strip.right as f32, y), &grid);
        }
        canvas.restore();
    }
}

fn rgba_info(w: i32, h: i32) -> skia::ImageInfo {
    skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Premul, None)
}

/// Offscreen RGBA8888 raster of `w` x `h` pixels.
pub(crate) fn raster_rgba(w: i32, h: i32) -> Result<skia::Surface> {
    let info = rgba_info(w, h);
    skia::surfaces::raster(&info, Some(info.min_row_bytes()), None)
        .ok_or_else(|| PixlError::surface(format!("failed to create {w}x{h} frame")))
}

/// Copy a whole raster surface out as tightly packed RGBA8888 rows.
pub(crate) fn read_rgba8(surface: &mut skia::Surface) -> Result<(Vec<u8>, u32, u32, usize)> {
    let (w, h) = (surface.width(), surface.height());
    let info = rgba_info(w, h);
    let stride = w as usize * 4;
    let mut px = vec![0u8; stride * h as usize];
    if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
        return Err(PixlError::surface("reading frame pixels failed"));
    }
    Ok((px, w as u32, h as u32, stride))
}

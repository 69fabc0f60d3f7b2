// File: crates/pixlroll-core/src/colormap.rs
// Summary: Value-to-color lookup tables built once per palette and sample range.

use std::fmt;
use std::str::FromStr;

use skia_safe as skia;

use crate::error::{PixlError, Result};
use crate::types::SampleRange;

/// Values in this half-open band are drawn in color by the `rssi` palette;
/// everything else is grayscale. Signal strength in dBm on an 8-bit signed scale.
pub const RSSI_ACTIVE_BAND: (i32, i32) = (-100, -20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Full hue sweep at constant brightness.
    Rainbow,
    /// Shifted hue sweep with brightness ramp; color only inside [`RSSI_ACTIVE_BAND`].
    Rssi,
}

impl Palette {
    pub const fn name(&self) -> &'static str {
        match self {
            Palette::Rainbow => "rainbow",
            Palette::Rssi => "rssi",
        }
    }
}

impl FromStr for Palette {
    type Err = PixlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rainbow" => Ok(Palette::Rainbow),
            "rssi" => Ok(Palette::Rssi),
            _ => Err(PixlError::UnknownPalette(s.to_string())),
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// RGB triple with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Opaque 8-bit color, rounded to nearest.
    pub fn to_color(&self) -> skia::Color {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        skia::Color::from_argb(255, q(self.r), q(self.g), q(self.b))
    }
}

/// HSV to RGB. Hue wraps around the color wheel, saturation and value are
/// clamped to [0, 1] so every output component stays in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    if s == 0.0 {
        return Rgb::new(v, v, v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = (h.floor() as i32).rem_euclid(6);
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

/// Dense lookup table from every value in a [`SampleRange`] to its color.
#[derive(Clone, Debug)]
pub struct ColorMap {
    range: SampleRange,
    palette: Palette,
    table: Vec<Rgb>,
}

impl ColorMap {
    pub fn build(range: SampleRange, palette: Palette) -> Self {
        let table = range
            .iter()
            .map(|v| {
                let n = range.normalize(v);
                match palette {
                    Palette::Rainbow => hsv_to_rgb(n, 1.0, 0.5),
                    Palette::Rssi => {
                        let (band_lo, band_hi) = RSSI_ACTIVE_BAND;
                        let s = if v >= band_lo && v < band_hi { 1.0 } else { 0.0 };
                        hsv_to_rgb(n - 0.1, s, n * 3.0)
                    }
                }
            })
            .collect::<Vec<_>>();
        tracing::debug!(palette = %palette, lo = range.lo(), hi = range.hi(), entries = table.len(), "built colormap");
        Self { range, palette, table }
    }

    pub fn range(&self) -> SampleRange { self.range }
    pub fn palette(&self) -> Palette { self.palette }

    /// Precomputed color for `v`. Fails for values outside the range; callers
    /// clamp external data before getting here.
    pub fn lookup(&self, v: i32) -> Result<Rgb> {
        self.range
            .index_of(v)
            .map(|i| self.table[i])
            .ok_or(PixlError::OutOfRange { value: v, lo: self.range.lo(), hi: self.range.hi() })
    }

    /// Color for `v` after clamping it into the range. Never fails.
    pub fn lookup_clamped(&self, v: i32) -> Rgb {
        let i = self.range.index_of(self.range.clamp(v)).unwrap_or(0);
        self.table[i]
    }
}

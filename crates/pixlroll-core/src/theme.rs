// File: crates/pixlroll-core/src/theme.rs
// Summary: Colors for everything that is not sample data (background, ticks, labels, gridlines).

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Plot background; vacated rows are cleared to this.
    pub background: skia::Color,
    /// Histogram gridlines. Meant to be faint, so usually translucent.
    pub grid: skia::Color,
    pub tick: skia::Color,
    pub label: skia::Color,
    /// Timestamp text and tick in the gutter.
    pub timestamp: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 0, 0, 0),
            grid: skia::Color::from_argb(64, 255, 255, 255),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            label: skia::Color::from_argb(255, 235, 235, 245),
            timestamp: skia::Color::from_argb(255, 200, 200, 210),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(64, 0, 0, 0),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            label: skia::Color::from_argb(255, 20, 20, 30),
            timestamp: skia::Color::from_argb(255, 60, 60, 70),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(96, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            timestamp: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::dark() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    tracing::warn!(name, "unknown theme, using dark");
    Theme::dark()
}

// File: crates/pixlroll-core/src/lib.rs
// Summary: Core library entry point; exports the scrolling waterfall plot and its parts.

pub mod colormap;
pub mod compositor;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod histogram;
pub mod options;
pub mod plotter;
pub mod scroll;
pub mod source;
pub mod surface;
pub mod text;
pub mod theme;
pub mod types;

pub use colormap::{ColorMap, Palette, Rgb};
pub use compositor::{Compositor, Layout};
pub use error::{PixlError, Result};
pub use geometry::RectI32;
pub use histogram::Histogram;
pub use options::{Overlays, PlotOptions};
pub use plotter::Plotter;
pub use scroll::{AddSummary, ScrollBuffer, ScrollMode};
pub use source::{decode, BlockReader, Decoded, SampleFormat};
pub use surface::SurfaceHooks;
pub use text::TextShaper;
pub use theme::Theme;
pub use types::SampleRange;

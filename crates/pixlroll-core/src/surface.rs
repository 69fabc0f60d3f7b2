// File: crates/pixlroll-core/src/surface.rs
// Summary: Toolkit-neutral display hooks; any window binding drives a plot through these three calls.

use skia_safe as skia;

pub trait SurfaceHooks {
    /// Called once, when the display surface first exists.
    fn on_attach(&mut self);
    /// The surface changed size; the next render uses the new size.
    fn on_resize(&mut self, width: i32, height: i32);
    /// Repaint the whole surface.
    fn render(&mut self, canvas: &skia::Canvas);
}

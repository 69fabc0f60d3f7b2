// File: crates/pixlroll-core/tests/plotter.rs
// Purpose: Plot context wiring: histogram feed, damage tracking and surface hooks.

use pixlroll_core::types::{HISTOGRAM_HEIGHT, LEGEND_HEIGHT};
use pixlroll_core::{PlotOptions, Plotter, SampleRange, SurfaceHooks};

fn opts() -> PlotOptions {
    let mut o = PlotOptions::default().with_histogram(20);
    o.range = SampleRange::new(0, 9).unwrap();
    o.plot_width = 10;
    o.plot_height = 6;
    o.draw_labels = false;
    o
}

#[test]
fn natural_size_includes_margins() {
    let p = Plotter::new(&opts()).unwrap();
    assert_eq!(p.natural_size(), (10, 6 + LEGEND_HEIGHT + HISTOGRAM_HEIGHT));
    assert_eq!(p.size(), p.natural_size());
}

#[test]
fn batches_reach_the_histogram() {
    let mut p = Plotter::new(&opts()).unwrap();
    p.add_data(&[3, 4, 5]);
    assert_eq!(p.histogram().map(|h| h.len()), Some(3));

    let no_hist = {
        let mut o = opts();
        o.overlays.histogram = false;
        o.histogram_capacity = None;
        Plotter::new(&o).unwrap()
    };
    assert!(no_hist.histogram().is_none());
}

#[test]
fn first_frame_is_full_then_only_damage() {
    let mut p = Plotter::new(&opts()).unwrap();
    p.on_attach();
    let (w, h) = p.size();
    assert!(p.needs_redraw());
    assert_eq!(p.damage().map(|d| (d.width(), d.height())), Some((w, h)));

    let (px, fw, fh, _) = p.frame_rgba8().unwrap();
    assert_eq!((fw as i32, fh as i32), (w, h));
    assert_eq!(px.len(), (w * h * 4) as usize);
    assert!(!p.needs_redraw());

    // a partial row damages the bottom plot row and the histogram strip only
    p.add_data(&[1, 2]);
    let damage = p.damage().unwrap();
    assert_eq!(damage.top, 5);
    assert_eq!(damage.bottom, 6 + HISTOGRAM_HEIGHT);
    p.frame_rgba8().unwrap();
    assert!(p.damage().is_none());
}

#[test]
fn patched_frame_matches_a_full_repaint() {
    let mut p = Plotter::new(&opts()).unwrap();
    p.on_attach();
    p.frame_rgba8().unwrap();
    for i in 0..25 {
        p.add_data(&[i % 10, (i * 3) % 10]);
        p.frame_rgba8().unwrap();
    }
    let (patched, ..) = p.frame_rgba8().unwrap();

    let size = p.size();
    p.on_resize(size.0 + 1, size.1);
    p.on_resize(size.0, size.1);
    let (full, ..) = p.frame_rgba8().unwrap();
    assert_eq!(patched, full);
}

#[test]
fn resize_forces_full_repaint() {
    let mut p = Plotter::new(&opts()).unwrap();
    p.frame_rgba8().unwrap();
    assert!(!p.needs_redraw());

    p.on_resize(40, 200);
    assert!(p.needs_redraw());
    let (_, w, h, _) = p.frame_rgba8().unwrap();
    assert_eq!((w, h), (40, 200));

    // same size again is a no-op
    p.on_resize(40, 200);
    assert!(!p.needs_redraw());
}

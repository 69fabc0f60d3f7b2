// File: crates/pixlroll-core/tests/scroll.rs
// Purpose: Scroll buffer behavior: cursor wrap, clamping, vacated rows, timestamps, wipe fallback.

use chrono::{Duration, Local};
use pixlroll_core::{PlotOptions, SampleRange, ScrollBuffer, ScrollMode};

fn opts(range: SampleRange, width: i32, height: i32) -> PlotOptions {
    let mut o = PlotOptions::default();
    o.range = range;
    o.plot_width = width;
    o.plot_height = height;
    o.draw_labels = false;
    o
}

#[test]
fn single_sample_batches_wrap_after_one_row() {
    let mut sb = ScrollBuffer::new(&opts(SampleRange::int8(), 16, 8)).unwrap();
    for i in 0..16 {
        assert_eq!(sb.cursor_x(), i);
        sb.add_data(&[i - 8]);
    }
    assert_eq!(sb.cursor_x(), 0);
    assert_eq!(sb.scroll_count(), 1);
}

#[test]
fn out_of_range_sample_draws_like_the_bound() {
    let range = SampleRange::new(-20, 40).unwrap();
    let mut a = ScrollBuffer::new(&opts(range, 4, 2)).unwrap();
    let mut b = ScrollBuffer::new(&opts(range, 4, 2)).unwrap();

    let sa = a.add_data(&[40 + 50]);
    let sb = b.add_data(&[40]);
    assert_eq!(sa.clamped, 1);
    assert_eq!(sb.clamped, 0);
    assert_eq!(a.pixel(0, 1), b.pixel(0, 1));

    let sa = a.add_data(&[-20 - 50]);
    b.add_data(&[-20]);
    assert_eq!(sa.clamped, 1);
    assert_eq!(a.pixel(1, 1), b.pixel(1, 1));
}

#[test]
fn add_data_never_surfaces_out_of_range() {
    // extreme values go through the clamp, so the only fallible lookup is never reached
    let mut sb = ScrollBuffer::new(&opts(SampleRange::new(0, 3).unwrap(), 5, 3)).unwrap();
    let summary = sb.add_data(&[i32::MIN, -1, 4, i32::MAX, 2]);
    assert_eq!(summary.written, 5);
    assert_eq!(summary.clamped, 4);
    assert_eq!(summary.scrolls, 1);
}

#[test]
fn one_row_of_int8_scrolls_and_clears_the_vacated_row() {
    let mut sb = ScrollBuffer::new(&opts(SampleRange::int8(), 4, 3)).unwrap();
    let samples = [-128, 0, 127, -50];
    let summary = sb.add_data(&samples);

    assert_eq!(summary.written, 4);
    assert_eq!(summary.scrolls, 1);
    assert_eq!(sb.cursor_x(), 0);

    // the finished row moved up by one, the bottom row is blank again
    let cmap = sb.colormap().clone();
    for (x, v) in samples.iter().enumerate() {
        assert_eq!(sb.pixel(x as i32, 1), Some(cmap.lookup(*v).unwrap().to_color()), "column {x}");
        assert_eq!(sb.pixel(x as i32, 2), Some(sb.background()), "vacated column {x}");
    }
}

#[test]
fn history_moves_up_one_row_per_scroll() {
    let mut sb = ScrollBuffer::new(&opts(SampleRange::uint8(), 2, 4)).unwrap();
    sb.add_data(&[10, 10]);
    sb.add_data(&[200, 200]);
    let cmap = sb.colormap().clone();
    assert_eq!(sb.pixel(0, 1), Some(cmap.lookup(10).unwrap().to_color()));
    assert_eq!(sb.pixel(0, 2), Some(cmap.lookup(200).unwrap().to_color()));
    assert_eq!(sb.pixel(0, 3), Some(sb.background()));
}

#[test]
fn timestamps_follow_the_interval_grid() {
    let o = opts(SampleRange::int8(), 4, 32).with_timestamps(Duration::seconds(60));
    let mut sb = ScrollBuffer::new(&o).unwrap();
    assert!(sb.gutter_width() > 0);

    let t0 = Local::now();
    let mut stamps = Vec::new();
    // one row every 10 simulated seconds, 130 seconds in total
    for tick in 0..=13 {
        let summary = sb.add_data_at(&[0, 1, 2, 3], t0 + Duration::seconds(tick * 10));
        assert_eq!(summary.scrolls, 1);
        assert!(summary.stamps.len() <= 1, "tick {tick} stamped {:?}", summary.stamps);
        stamps.extend(summary.stamps);
    }

    assert_eq!(stamps.len(), 2);
    assert_eq!(stamps[0], t0 + Duration::seconds(60));
    assert_eq!(stamps[1] - stamps[0], Duration::seconds(60));
}

#[test]
fn late_scroll_stamps_once_and_keeps_the_grid() {
    let o = opts(SampleRange::int8(), 2, 8).with_timestamps(Duration::seconds(60));
    let mut sb = ScrollBuffer::new(&o).unwrap();
    let t0 = Local::now();
    sb.add_data_at(&[0], t0);

    // a stall of five intervals still yields a single label
    let summary = sb.add_data_at(&[0], t0 + Duration::seconds(300));
    assert_eq!(summary.stamps, vec![t0 + Duration::seconds(60)]);
    let summary = sb.add_data_at(&[0, 0], t0 + Duration::seconds(301));
    assert_eq!(summary.stamps, vec![t0 + Duration::seconds(120)]);
}

#[test]
fn no_gutter_without_timestamps() {
    let sb = ScrollBuffer::new(&opts(SampleRange::int8(), 10, 10)).unwrap();
    assert_eq!(sb.gutter_width(), 0);
    assert_eq!(sb.buffer_size(), (10, 10));
}

#[test]
fn wipe_mode_walks_the_write_row_down() {
    let mut o = opts(SampleRange::uint8(), 2, 3);
    o.scroll_mode = ScrollMode::Wipe;
    let mut sb = ScrollBuffer::new(&o).unwrap();
    let cmap = sb.colormap().clone();

    assert_eq!(sb.cursor_y(), 0);
    sb.add_data(&[5, 5]);
    assert_eq!(sb.cursor_y(), 1);
    assert_eq!(sb.pixel(0, 0), Some(cmap.lookup(5).unwrap().to_color()));
    // the row after the new write row is pre-cleared
    assert_eq!(sb.pixel(0, 2), Some(sb.background()));

    sb.add_data(&[6, 6, 7, 7]);
    assert_eq!(sb.cursor_y(), 0);
    assert_eq!(sb.scroll_count(), 3);
    // rows 0 and 1 were each cleared as the row ahead of the write row
    assert_eq!(sb.pixel(0, 2), Some(cmap.lookup(7).unwrap().to_color()));
    assert_eq!(sb.pixel(0, 1), Some(sb.background()));
    assert_eq!(sb.pixel(0, 0), Some(sb.background()));
}

#[test]
fn clear_resets_pixels_and_marks_everything() {
    let mut sb = ScrollBuffer::new(&opts(SampleRange::int8(), 3, 3)).unwrap();
    sb.add_data(&[1]);
    let _ = sb.take_dirty();
    sb.clear();
    assert_eq!(sb.pixel(0, 2), Some(sb.background()));
    assert_eq!(sb.take_dirty().map(|d| (d.width(), d.height())), Some((3, 3)));
}

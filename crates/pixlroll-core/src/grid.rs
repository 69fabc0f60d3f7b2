// File: crates/pixlroll-core/src/grid.rs
// Summary: Evenly spaced positions for gridlines.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Pixel rows splitting `[top, bottom]` into `parts` equal bands, both edges included.
pub fn gridlines(top: i32, bottom: i32, parts: usize) -> Vec<f32> {
    linspace(top as f64, bottom as f64, parts + 1).into_iter().map(|y| y as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_of_a_strip() {
        let ys = gridlines(100, 200, 10);
        assert_eq!(ys.len(), 11);
        assert_eq!(ys[0], 100.0);
        assert_eq!(ys[1], 110.0);
        assert_eq!(ys[10], 200.0);
    }
}

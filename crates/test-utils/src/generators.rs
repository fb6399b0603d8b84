//! Synthetic scan generators.
//!
//! Heights are produced in meters and overlay channels in instrument
//! units, the same way a microscope export stores them, so tests go
//! through the real unit conversions.

use afm_common::Grid;

/// Creates a grid with predictable values.
///
/// Each cell value is `col * 1000 + row`, so a misplaced sample is easy
/// to spot: `grid.get(col, row) == col * 1000 + row`.
///
/// # Example
///
/// ```
/// use test_utils::create_indexed_grid;
///
/// let grid = create_indexed_grid(3, 2);
/// assert_eq!(grid.get(1, 0), Some(1000.0));
/// assert_eq!(grid.get(0, 1), Some(1.0));
/// ```
pub fn create_indexed_grid(cols: usize, rows: usize) -> Grid {
    let mut data = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            data.push((col * 1000 + row) as f64);
        }
    }
    Grid::new(data, rows, cols).expect("shape matches data length")
}

/// Creates a tilted-plane topography in meters.
///
/// Height rises by `step_nm` nanometers per column, so after the
/// meters-to-nanometers conversion column `i` sits at `i * step_nm`.
pub fn create_tilted_plane(cols: usize, rows: usize, step_nm: f64) -> Grid {
    let mut data = Vec::with_capacity(cols * rows);
    for _row in 0..rows {
        for col in 0..cols {
            data.push(col as f64 * step_nm * 1e-9);
        }
    }
    Grid::new(data, rows, cols).expect("shape matches data length")
}

/// Creates a topography with a gaussian bump in the middle, in meters.
///
/// The bump peaks at `peak_nm` nanometers over a flat substrate.
pub fn create_bump_topography(cols: usize, rows: usize, peak_nm: f64) -> Grid {
    let mut data = Vec::with_capacity(cols * rows);
    let cx = (cols as f64 - 1.0) / 2.0;
    let cy = (rows as f64 - 1.0) / 2.0;
    let sigma = (cols.min(rows) as f64 / 4.0).max(1.0);

    for row in 0..rows {
        for col in 0..cols {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let h = peak_nm * (-(dx * dx + dy * dy) / (2.0 * sigma * sigma)).exp();
            data.push(h * 1e-9);
        }
    }
    Grid::new(data, rows, cols).expect("shape matches data length")
}

/// Creates an overlay that ramps linearly from `min` to `max` along X.
pub fn create_overlay_ramp(cols: usize, rows: usize, min: f64, max: f64) -> Grid {
    let mut data = Vec::with_capacity(cols * rows);
    let denom = (cols.max(2) - 1) as f64;
    for _row in 0..rows {
        for col in 0..cols {
            data.push(min + (max - min) * col as f64 / denom);
        }
    }
    Grid::new(data, rows, cols).expect("shape matches data length")
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(cols: usize, rows: usize, value: f64) -> Grid {
    Grid::new(vec![value; cols * rows], rows, cols).expect("shape matches data length")
}

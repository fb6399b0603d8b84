//! Write grids back out in the instrument export format.

use afm_common::Grid;
use std::fmt::Write;

/// Render a grid as text readable by [`crate::parse_grid_text`].
///
/// Dimension headers are written in English and only when present.
/// Values use the shortest representation that parses back to the same
/// `f64`.
pub fn write_grid_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.shape().len() * 12 + 64);

    if let Some(width) = grid.width_physical {
        let _ = writeln!(out, "# Width: {} um", width);
    }
    if let Some(height) = grid.height_physical {
        let _ = writeln!(out, "# Height: {} um", height);
    }

    for row in grid.row_iter() {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}", value);
        }
        out.push('\n');
    }

    out
}

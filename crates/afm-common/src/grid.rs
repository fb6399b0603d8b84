//! Measurement grids exported by the microscope.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ParseError, ParseResult};

/// Dimensions of a grid in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (Y samples)
    pub rows: usize,
    /// Number of columns (X samples)
    pub cols: usize,
}

impl GridShape {
    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Check if the shape has no samples.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A rectangular grid of measured values.
///
/// Values are stored row-major: row `j` holds the X samples at Y index `j`.
/// The physical scan size comes from the file header and is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    values: Vec<f64>,
    shape: GridShape,
    /// Physical scan width (micrometers), if the header carried one
    pub width_physical: Option<f64>,
    /// Physical scan height (micrometers), if the header carried one
    pub height_physical: Option<f64>,
}

impl Grid {
    /// Build a grid from flat row-major values.
    ///
    /// Returns `None` if `values.len()` does not match the shape.
    pub fn new(values: Vec<f64>, rows: usize, cols: usize) -> Option<Self> {
        if values.len() != rows * cols {
            return None;
        }
        Some(Self {
            values,
            shape: GridShape { rows, cols },
            width_physical: None,
            height_physical: None,
        })
    }

    /// Build a grid from individual rows.
    ///
    /// `line_numbers[i]` is the source line of `rows[i]` and is only used
    /// to report a ragged row.
    pub fn from_rows(rows: Vec<Vec<f64>>, line_numbers: &[usize]) -> ParseResult<Self> {
        let expected = match rows.first() {
            Some(first) => first.len(),
            None => return Err(ParseError::NoData),
        };

        let mut values = Vec::with_capacity(expected * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ParseError::RaggedGrid {
                    line: line_numbers.get(i).copied().unwrap_or(i + 1),
                    expected,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            shape: GridShape {
                rows: rows.len(),
                cols: expected,
            },
            values,
            width_physical: None,
            height_physical: None,
        })
    }

    /// Attach physical dimensions.
    pub fn with_dimensions(mut self, width: Option<f64>, height: Option<f64>) -> Self {
        self.width_physical = width;
        self.height_physical = height;
        self
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Flat row-major values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at column `i`, row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.shape.cols || j >= self.shape.rows {
            return None;
        }
        self.values.get(j * self.shape.cols + i).copied()
    }

    /// Iterate over rows as slices.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics; an empty grid has no rows to yield anyway
        self.values.chunks_exact(self.shape.cols.max(1))
    }

    /// Copy the grid into nested rows, each element transformed by `f`.
    pub fn map_rows<F>(&self, f: F) -> Vec<Vec<f64>>
    where
        F: Fn(f64) -> f64,
    {
        self.row_iter()
            .map(|row| row.iter().map(|&v| f(v)).collect())
            .collect()
    }
}

/// Minimum and maximum finite values, or `None` if there are none.
pub fn finite_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `count` evenly spaced samples from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Axis coordinates for `count` samples spanning `extent`.
///
/// Falls back to sample indices when the physical extent is unknown.
pub fn axis_coordinates(extent: Option<f64>, count: usize) -> Vec<f64> {
    match extent {
        Some(extent) => linspace(0.0, extent, count),
        None => (0..count).map(|i| i as f64).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let grid = Grid::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], &[1, 2]).unwrap();
        assert_eq!(grid.shape(), GridShape { rows: 2, cols: 3 });
        assert_eq!(grid.get(2, 1), Some(6.0));
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_from_rows_ragged_reports_line() {
        let err = Grid::from_rows(vec![vec![1.0, 2.0], vec![1.0, 2.0, 3.0]], &[3, 5]).unwrap_err();
        assert_eq!(
            err,
            ParseError::RaggedGrid {
                line: 5,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(Grid::from_rows(Vec::new(), &[]).unwrap_err(), ParseError::NoData);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0, 5.0, 6);
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(linspace(0.0, 5.0, 1), vec![0.0]);
        assert!(linspace(0.0, 5.0, 0).is_empty());
    }

    #[test]
    fn test_axis_coordinates_fallback() {
        assert_eq!(axis_coordinates(None, 3), vec![0.0, 1.0, 2.0]);
        assert_eq!(axis_coordinates(Some(2.0), 3), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_finite_range_skips_nan() {
        let grid = Grid::new(vec![f64::NAN, -2.0, 3.0, f64::INFINITY], 2, 2).unwrap();
        assert_eq!(finite_range(grid.values()), Some((-2.0, 3.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }
}

//! Shared test utilities for the AFM surface viewer workspace.
//!
//! This crate provides:
//! - Synthetic topography and overlay generators
//! - Grid file fixtures (English/Spanish headers, malformed files)
//! - Approximate equality assertions for floating-point data
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Assert two numbers are within `epsilon` of each other.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert two slices have the same length and match element-wise within
/// `epsilon`. NaN only matches NaN.
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f64] = &$left[..];
        let right: &[f64] = &$right[..];
        assert_eq!(left.len(), right.len(), "slice lengths differ");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            if l.is_nan() || r.is_nan() {
                assert!(l.is_nan() && r.is_nan(), "index {}: {:?} vs {:?}", i, l, r);
                continue;
            }
            let diff = (l - r).abs();
            if diff > $epsilon as f64 {
                panic!("index {}: {:?} vs {:?} (diff {:?})", i, l, r, diff);
            }
        }
    }};
}

//! Surface rendering for microscopy scans.
//!
//! - Surface plot construction (topography geometry, overlay coloring)
//! - Named colorscale palettes
//! - Plotly figure / HTML export
//! - PNG previews

pub mod colorscale;
pub mod plotly;
pub mod png;
pub mod surface;

pub use colorscale::Color;
pub use surface::{render_overlay, render_topography, OverlayParams, SurfacePlotSpec};

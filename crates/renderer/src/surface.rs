//! 3D surface plot construction.
//!
//! The topography always provides the surface geometry. An overlay channel
//! only changes the surface color: its values are converted to display units,
//! clipped to the requested range and mapped through the palette.

use afm_common::channel::{HEIGHT_TO_NM, Z_TITLE};
use afm_common::grid::{axis_coordinates, finite_range};
use afm_common::{ChannelPreset, ClipRange, Colorscale, Grid, RenderError, RenderResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colorscale::{map_value, Color};

/// Colorbar title of a topography-only plot.
pub const HEIGHT_COLORBAR_TITLE: &str = "Height (nm)";

/// Titles of the three scene axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAxes {
    pub x_title: String,
    pub y_title: String,
    pub z_title: String,
}

impl SceneAxes {
    pub fn with_z_title(z_title: impl Into<String>) -> Self {
        Self {
            x_title: "X (µm)".to_string(),
            y_title: "Y (µm)".to_string(),
            z_title: z_title.into(),
        }
    }
}

impl Default for SceneAxes {
    fn default() -> Self {
        Self::with_z_title(Z_TITLE)
    }
}

/// Figure margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self { l: 0, r: 0, b: 0, t: 40 }
    }
}

/// A renderable 3D surface description.
///
/// `z` and `surface_color` are indexed `[row][col]`, matching `y` and `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePlotSpec {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Heights in nanometers
    pub z: Vec<Vec<f64>>,
    /// Per-cell color values; `None` colors by height
    pub surface_color: Option<Vec<Vec<f64>>>,
    pub colorscale: Colorscale,
    /// Fixed color range; `None` spans the data
    pub color_range: Option<ClipRange>,
    pub colorbar_title: String,
    pub axes: SceneAxes,
    pub margin: Margin,
}

impl SurfacePlotSpec {
    /// Values that drive the surface color.
    pub fn color_values(&self) -> &[Vec<f64>] {
        self.surface_color.as_deref().unwrap_or(&self.z)
    }

    /// Range the palette is stretched over.
    pub fn effective_color_range(&self) -> Option<(f64, f64)> {
        if let Some(range) = self.color_range {
            return Some((range.min, range.max));
        }
        finite_range(self.color_values().iter().flatten())
    }

    /// Resolve every cell to an RGBA color. NaN cells are transparent.
    pub fn face_colors(&self) -> Vec<Vec<Color>> {
        let (min, max) = self.effective_color_range().unwrap_or((0.0, 1.0));
        self.color_values()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| map_value(self.colorscale, v, min, max))
                    .collect()
            })
            .collect()
    }

    /// Grid dimensions as (rows, cols).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.y.len(), self.x.len())
    }
}

/// Display parameters for an overlay render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayParams {
    pub colorscale: Colorscale,
    pub clip: ClipRange,
    /// Multiplier applied to overlay values before clipping
    pub unit_factor: f64,
    pub colorbar_title: String,
    pub z_axis_title: String,
}

impl OverlayParams {
    /// Parameters for a channel preset with its default clip range.
    pub fn from_preset(preset: &ChannelPreset, colorscale: Colorscale) -> Self {
        Self {
            colorscale,
            clip: preset.default_clip,
            unit_factor: preset.unit_factor,
            colorbar_title: preset.colorbar_title.clone(),
            z_axis_title: preset.z_axis_title.clone(),
        }
    }

    /// Ad-hoc parameters for a channel without a preset.
    pub fn new(
        colorscale: Colorscale,
        clip: ClipRange,
        unit_factor: f64,
        colorbar_title: impl Into<String>,
    ) -> Self {
        Self {
            colorscale,
            clip,
            unit_factor,
            colorbar_title: colorbar_title.into(),
            z_axis_title: Z_TITLE.to_string(),
        }
    }

    pub fn with_clip(mut self, clip: ClipRange) -> Self {
        self.clip = clip;
        self
    }

    pub fn with_colorbar_title(mut self, title: impl Into<String>) -> Self {
        self.colorbar_title = title.into();
        self
    }

    pub fn with_unit_factor(mut self, unit_factor: f64) -> Self {
        self.unit_factor = unit_factor;
        self
    }
}

/// Surface geometry shared by every plot of the same topography.
fn geometry(topography: &Grid) -> RenderResult<(Vec<f64>, Vec<f64>, Vec<Vec<f64>>)> {
    if topography.shape().is_empty() {
        return Err(RenderError::EmptyGrid);
    }
    let x = axis_coordinates(topography.width_physical, topography.cols());
    let y = axis_coordinates(topography.height_physical, topography.rows());
    let z = topography.map_rows(|v| v * HEIGHT_TO_NM);
    Ok((x, y, z))
}

/// Plot the topography alone, colored by height.
pub fn render_topography(topography: &Grid, colorscale: Colorscale) -> RenderResult<SurfacePlotSpec> {
    let (x, y, z) = geometry(topography)?;

    debug!(
        rows = topography.rows(),
        cols = topography.cols(),
        colorscale = %colorscale,
        "Rendering topography"
    );

    Ok(SurfacePlotSpec {
        x,
        y,
        z,
        surface_color: None,
        colorscale,
        color_range: None,
        colorbar_title: HEIGHT_COLORBAR_TITLE.to_string(),
        axes: SceneAxes::default(),
        margin: Margin::default(),
    })
}

/// Plot the topography colored by an overlay channel.
///
/// Each color value is `clip(overlay * unit_factor, clip.min, clip.max)`.
/// The overlay must have exactly the topography's shape and the unit factor
/// must be finite and non-zero.
pub fn render_overlay(
    topography: &Grid,
    overlay: &Grid,
    params: &OverlayParams,
) -> RenderResult<SurfacePlotSpec> {
    params.clip.validate()?;
    if !params.unit_factor.is_finite() || params.unit_factor == 0.0 {
        return Err(RenderError::InvalidUnitFactor(params.unit_factor));
    }
    if topography.shape() != overlay.shape() {
        return Err(RenderError::ShapeMismatch {
            topography: topography.shape(),
            overlay: overlay.shape(),
        });
    }

    let (x, y, z) = geometry(topography)?;

    let mut clipped = 0usize;
    let factor = params.unit_factor;
    let clip = params.clip;
    let surface_color: Vec<Vec<f64>> = overlay
        .row_iter()
        .map(|row| {
            row.iter()
                .map(|&v| {
                    let converted = v * factor;
                    let c = clip.clip(converted);
                    if c != converted && !converted.is_nan() {
                        clipped += 1;
                    }
                    c
                })
                .collect()
        })
        .collect();

    let total = overlay.shape().len();
    if clipped == total {
        warn!(
            clip_min = clip.min,
            clip_max = clip.max,
            "Every overlay value lies outside the clip range; surface will be flat-colored"
        );
    } else {
        debug!(clipped, total, "Clipped overlay values");
    }

    Ok(SurfacePlotSpec {
        x,
        y,
        z,
        surface_color: Some(surface_color),
        colorscale: params.colorscale,
        color_range: Some(clip),
        colorbar_title: params.colorbar_title.clone(),
        axes: SceneAxes::with_z_title(params.z_axis_title.clone()),
        margin: Margin::default(),
    })
}

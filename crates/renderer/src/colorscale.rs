//! Palette definitions and scalar-to-color mapping.
//!
//! Each palette is the color list plotly.py resolves the name to, with the
//! colors spread evenly over [0, 1]. Figures carry these stops explicitly so
//! a preview image and the interactive plot agree.

use afm_common::Colorscale;
use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// CSS `rgb(r,g,b)` notation, as Plotly colorscales expect.
    pub fn to_css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A palette anchor: position in [0, 1] and its color.
pub type ColorStop = (f64, Color);

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::rgb(r, g, b)
}

const VIRIDIS: &[Color] = &[
    rgb(68, 1, 84),
    rgb(72, 40, 120),
    rgb(62, 73, 137),
    rgb(49, 104, 142),
    rgb(38, 130, 142),
    rgb(31, 158, 137),
    rgb(53, 183, 121),
    rgb(110, 206, 88),
    rgb(181, 222, 43),
    rgb(253, 231, 37),
];

const PLASMA: &[Color] = &[
    rgb(13, 8, 135),
    rgb(70, 3, 159),
    rgb(114, 1, 168),
    rgb(156, 23, 158),
    rgb(189, 55, 134),
    rgb(216, 87, 107),
    rgb(237, 121, 83),
    rgb(251, 159, 58),
    rgb(253, 202, 38),
    rgb(240, 249, 33),
];

const INFERNO: &[Color] = &[
    rgb(0, 0, 4),
    rgb(27, 12, 65),
    rgb(74, 12, 107),
    rgb(120, 28, 109),
    rgb(165, 44, 96),
    rgb(207, 68, 70),
    rgb(237, 105, 37),
    rgb(251, 155, 6),
    rgb(247, 209, 61),
    rgb(252, 255, 164),
];

const MAGMA: &[Color] = &[
    rgb(0, 0, 4),
    rgb(24, 15, 61),
    rgb(68, 15, 118),
    rgb(114, 31, 129),
    rgb(158, 47, 127),
    rgb(205, 64, 113),
    rgb(241, 96, 93),
    rgb(253, 150, 104),
    rgb(254, 202, 141),
    rgb(252, 253, 191),
];

const CIVIDIS: &[Color] = &[
    rgb(0, 34, 78),
    rgb(18, 53, 112),
    rgb(59, 73, 108),
    rgb(87, 93, 109),
    rgb(112, 113, 115),
    rgb(138, 134, 120),
    rgb(165, 156, 116),
    rgb(195, 179, 105),
    rgb(225, 204, 85),
    rgb(254, 232, 56),
];

// ColorBrewer sequential, light to dark
const GREENS: &[Color] = &[
    rgb(247, 252, 245),
    rgb(229, 245, 224),
    rgb(199, 233, 192),
    rgb(161, 217, 155),
    rgb(116, 196, 118),
    rgb(65, 171, 93),
    rgb(35, 139, 69),
    rgb(0, 109, 44),
    rgb(0, 68, 27),
];

const BLUES: &[Color] = &[
    rgb(247, 251, 255),
    rgb(222, 235, 247),
    rgb(198, 219, 239),
    rgb(158, 202, 225),
    rgb(107, 174, 214),
    rgb(66, 146, 198),
    rgb(33, 113, 181),
    rgb(8, 81, 156),
    rgb(8, 48, 107),
];

const REDS: &[Color] = &[
    rgb(255, 245, 240),
    rgb(254, 224, 210),
    rgb(252, 187, 161),
    rgb(252, 146, 114),
    rgb(251, 106, 74),
    rgb(239, 59, 44),
    rgb(203, 24, 29),
    rgb(165, 15, 21),
    rgb(103, 0, 13),
];

const GREYS: &[Color] = &[
    rgb(255, 255, 255),
    rgb(240, 240, 240),
    rgb(217, 217, 217),
    rgb(189, 189, 189),
    rgb(150, 150, 150),
    rgb(115, 115, 115),
    rgb(82, 82, 82),
    rgb(37, 37, 37),
    rgb(0, 0, 0),
];

const TURBO: &[Color] = &[
    rgb(48, 18, 59),
    rgb(65, 69, 171),
    rgb(70, 117, 237),
    rgb(57, 162, 252),
    rgb(27, 207, 212),
    rgb(36, 236, 166),
    rgb(97, 252, 108),
    rgb(164, 252, 59),
    rgb(209, 232, 52),
    rgb(243, 198, 58),
    rgb(254, 155, 45),
    rgb(243, 99, 21),
    rgb(217, 56, 6),
    rgb(177, 25, 1),
    rgb(122, 4, 2),
];

const PICNIC: &[Color] = &[
    rgb(0, 0, 255),
    rgb(51, 153, 255),
    rgb(102, 204, 255),
    rgb(153, 204, 255),
    rgb(204, 204, 255),
    rgb(255, 255, 255),
    rgb(255, 204, 255),
    rgb(255, 153, 255),
    rgb(255, 102, 204),
    rgb(255, 102, 102),
    rgb(255, 0, 0),
];

const JET: &[Color] = &[
    rgb(0, 0, 131),
    rgb(0, 60, 170),
    rgb(5, 255, 255),
    rgb(255, 255, 0),
    rgb(250, 0, 0),
    rgb(128, 0, 0),
];

const HOT: &[Color] = &[
    rgb(0, 0, 0),
    rgb(230, 0, 0),
    rgb(255, 210, 0),
    rgb(255, 255, 255),
];

/// Colors of a palette, from position 0 to position 1.
pub fn palette(scale: Colorscale) -> &'static [Color] {
    match scale {
        Colorscale::Viridis => VIRIDIS,
        Colorscale::Plasma => PLASMA,
        Colorscale::Inferno => INFERNO,
        Colorscale::Magma => MAGMA,
        Colorscale::Cividis => CIVIDIS,
        Colorscale::Greens => GREENS,
        Colorscale::Blues => BLUES,
        Colorscale::Reds => REDS,
        Colorscale::Greys => GREYS,
        Colorscale::Turbo => TURBO,
        Colorscale::Picnic => PICNIC,
        Colorscale::Jet => JET,
        Colorscale::Hot => HOT,
    }
}

/// Palette colors paired with their evenly spaced positions.
pub fn stops(scale: Colorscale) -> impl Iterator<Item = ColorStop> {
    let colors = palette(scale);
    let last = (colors.len() - 1) as f64;
    colors
        .iter()
        .enumerate()
        .map(move |(i, &color)| (i as f64 / last, color))
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f64 * t_inv + b as f64 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Sample a palette at normalized position `t`.
///
/// `t` is clamped to [0, 1]; NaN maps to a transparent color.
pub fn sample(scale: Colorscale, t: f64) -> Color {
    if t.is_nan() {
        return Color::transparent();
    }
    let colors = palette(scale);
    let segments = colors.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * segments as f64;

    let lower = (scaled.floor() as usize).min(segments - 1);
    interpolate_color(colors[lower], colors[lower + 1], scaled - lower as f64)
}

/// Map a value to a color, normalizing over `[min, max]`.
///
/// A degenerate range maps every finite value to the palette midpoint.
pub fn map_value(scale: Colorscale, value: f64, min: f64, max: f64) -> Color {
    if value.is_nan() {
        return Color::transparent();
    }
    let range = max - min;
    let normalized = if range.abs() <= f64::EPSILON * max.abs().max(min.abs()).max(1.0) {
        0.5
    } else {
        (value - min) / range
    };
    sample(scale, normalized)
}

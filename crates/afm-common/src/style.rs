//! Named colorscales available for surface coloring.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A palette name from the fixed set offered to the user.
///
/// Names match the Plotly built-in colorscales so an exported figure
/// can reference them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colorscale {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Greens,
    Blues,
    Reds,
    Greys,
    Turbo,
    Picnic,
    Jet,
    Hot,
}

impl Colorscale {
    /// All palettes in menu order.
    pub const ALL: [Colorscale; 13] = [
        Colorscale::Viridis,
        Colorscale::Plasma,
        Colorscale::Inferno,
        Colorscale::Magma,
        Colorscale::Cividis,
        Colorscale::Greens,
        Colorscale::Blues,
        Colorscale::Reds,
        Colorscale::Greys,
        Colorscale::Turbo,
        Colorscale::Picnic,
        Colorscale::Jet,
        Colorscale::Hot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Colorscale::Viridis => "Viridis",
            Colorscale::Plasma => "Plasma",
            Colorscale::Inferno => "Inferno",
            Colorscale::Magma => "Magma",
            Colorscale::Cividis => "Cividis",
            Colorscale::Greens => "Greens",
            Colorscale::Blues => "Blues",
            Colorscale::Reds => "Reds",
            Colorscale::Greys => "Greys",
            Colorscale::Turbo => "Turbo",
            Colorscale::Picnic => "Picnic",
            Colorscale::Jet => "Jet",
            Colorscale::Hot => "Hot",
        }
    }
}

impl Default for Colorscale {
    /// Topography mode defaults to Hot.
    fn default() -> Self {
        Colorscale::Hot
    }
}

impl fmt::Display for Colorscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colorscale {
    type Err = String;

    /// Case-insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colorscale::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Colorscale::ALL.iter().map(|c| c.name()).collect();
                format!("Unknown colorscale '{}'. Supported: {}", s, names.join(", "))
            })
    }
}

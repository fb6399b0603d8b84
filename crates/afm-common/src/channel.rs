//! Overlay channels and their display presets.
//!
//! Every overlay mode renders the same way; they only differ by unit
//! conversion, clip range and labels. Those differences live in the
//! [`ChannelPreset`] table below instead of in separate render paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{RenderError, RenderResult};

/// Meters to nanometers; applied to topography heights.
pub const HEIGHT_TO_NM: f64 = 1e9;

/// Z-axis title shared by topography, KPFM and PeakForce views.
pub const Z_TITLE: &str = "Z (nm)";

/// Z-axis title used by the C-AFM and MFM views.
pub const HEIGHT_TITLE: &str = "Height (nm)";

/// Inclusive bounds overlay values are clipped to before color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub min: f64,
    pub max: f64,
}

impl ClipRange {
    /// Create a validated range. Both bounds must be finite and ordered.
    pub fn new(min: f64, max: f64) -> RenderResult<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> RenderResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(RenderError::InvalidClipRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Clamp a value into the range. NaN passes through unchanged.
    pub fn clip(&self, value: f64) -> f64 {
        if value.is_nan() {
            value
        } else {
            value.max(self.min).min(self.max)
        }
    }

    pub fn contains(&self, other: &ClipRange) -> bool {
        other.min >= self.min && other.max <= self.max
    }
}

/// Mechanical properties recorded by PeakForce Tapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeakForceProperty {
    Stiffness,
    Adhesion,
    Indentation,
    Dissipation,
    Deformation,
}

impl PeakForceProperty {
    pub const ALL: [PeakForceProperty; 5] = [
        PeakForceProperty::Stiffness,
        PeakForceProperty::Adhesion,
        PeakForceProperty::Indentation,
        PeakForceProperty::Dissipation,
        PeakForceProperty::Deformation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PeakForceProperty::Stiffness => "Stiffness",
            PeakForceProperty::Adhesion => "Adhesion",
            PeakForceProperty::Indentation => "Indentation",
            PeakForceProperty::Dissipation => "Dissipation",
            PeakForceProperty::Deformation => "Deformation",
        }
    }

    /// Display unit, conversion factor and default clip range.
    pub fn units(&self) -> (&'static str, f64, (f64, f64)) {
        match self {
            PeakForceProperty::Stiffness => ("GPa", 1e-9, (0.0, 50.0)),
            PeakForceProperty::Adhesion => ("nN", 1e9, (0.0, 500.0)),
            PeakForceProperty::Indentation => ("nm", 1e9, (0.0, 500.0)),
            PeakForceProperty::Dissipation => ("keV", 1e-3, (0.0, 100.0)),
            PeakForceProperty::Deformation => ("nm", 1e9, (0.0, 100.0)),
        }
    }
}

/// The quantity carried by an overlay grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Kelvin Probe Force Microscopy surface potential (V)
    Potential,
    /// Conductive AFM current (A, shown in nA)
    Current,
    /// Magnetic Force Microscopy phase (deg)
    Phase,
    /// PeakForce Tapping mechanical property
    PeakForce(PeakForceProperty),
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 8] = [
        ChannelKind::Potential,
        ChannelKind::Current,
        ChannelKind::Phase,
        ChannelKind::PeakForce(PeakForceProperty::Stiffness),
        ChannelKind::PeakForce(PeakForceProperty::Adhesion),
        ChannelKind::PeakForce(PeakForceProperty::Indentation),
        ChannelKind::PeakForce(PeakForceProperty::Dissipation),
        ChannelKind::PeakForce(PeakForceProperty::Deformation),
    ];

    /// Lowercase key used on the command line and in preset files.
    pub fn key(&self) -> &'static str {
        match self {
            ChannelKind::Potential => "potential",
            ChannelKind::Current => "current",
            ChannelKind::Phase => "phase",
            ChannelKind::PeakForce(PeakForceProperty::Stiffness) => "stiffness",
            ChannelKind::PeakForce(PeakForceProperty::Adhesion) => "adhesion",
            ChannelKind::PeakForce(PeakForceProperty::Indentation) => "indentation",
            ChannelKind::PeakForce(PeakForceProperty::Dissipation) => "dissipation",
            ChannelKind::PeakForce(PeakForceProperty::Deformation) => "deformation",
        }
    }

    /// Name of the instrument mode that produces this channel.
    pub fn mode_name(&self) -> &'static str {
        match self {
            ChannelKind::Potential => "Kelvin Probe Force Microscopy (KPFM)",
            ChannelKind::Current => "Conductive Atomic Force Microscopy (C-AFM)",
            ChannelKind::Phase => "Magnetic Force Microscopy (MFM)",
            ChannelKind::PeakForce(_) => "PeakForce Tapping",
        }
    }

    /// Built-in display preset for this channel.
    pub fn preset(&self) -> ChannelPreset {
        match self {
            ChannelKind::Potential => ChannelPreset {
                colorbar_title: "Surface Potential (V)".to_string(),
                unit: "V".to_string(),
                unit_factor: 1.0,
                default_clip: ClipRange { min: 0.0, max: 1.0 },
                slider_range: ClipRange { min: 0.0, max: 10.0 },
                z_axis_title: Z_TITLE.to_string(),
            },
            ChannelKind::Current => ChannelPreset {
                colorbar_title: "Electric Current (nA)".to_string(),
                unit: "nA".to_string(),
                unit_factor: 1e9,
                default_clip: ClipRange { min: 0.0, max: 0.7 },
                slider_range: ClipRange { min: 0.0, max: 10.0 },
                z_axis_title: HEIGHT_TITLE.to_string(),
            },
            ChannelKind::Phase => ChannelPreset {
                colorbar_title: "Phase (deg)".to_string(),
                unit: "deg".to_string(),
                unit_factor: 1.0,
                default_clip: ClipRange { min: 0.0, max: 15.0 },
                slider_range: ClipRange { min: -30.0, max: 30.0 },
                z_axis_title: HEIGHT_TITLE.to_string(),
            },
            ChannelKind::PeakForce(property) => {
                let (unit, factor, (lo, hi)) = property.units();
                let range = ClipRange { min: lo, max: hi };
                ChannelPreset {
                    colorbar_title: format!("{} ({})", property.name(), unit),
                    unit: unit.to_string(),
                    unit_factor: factor,
                    default_clip: range,
                    slider_range: range,
                    z_axis_title: Z_TITLE.to_string(),
                }
            }
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let alias = match wanted.as_str() {
            "kpfm" => "potential",
            "c-afm" | "cafm" => "current",
            "mfm" => "phase",
            other => other,
        };
        ChannelKind::ALL
            .iter()
            .copied()
            .find(|c| c.key() == alias)
            .ok_or_else(|| {
                let keys: Vec<&str> = ChannelKind::ALL.iter().map(|c| c.key()).collect();
                format!("Unknown channel '{}'. Supported: {}", s, keys.join(", "))
            })
    }
}

/// How an overlay channel is converted, clipped and labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPreset {
    /// Colorbar title, quantity plus unit
    pub colorbar_title: String,
    /// Display unit after conversion
    pub unit: String,
    /// Multiplier from instrument units to display units
    pub unit_factor: f64,
    /// Clip range used when the caller does not pick one
    pub default_clip: ClipRange,
    /// Range a caller's clip bounds are expected to stay within
    pub slider_range: ClipRange,
    /// Title of the vertical scene axis
    pub z_axis_title: String,
}

impl ChannelPreset {
    /// Check the preset is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if !self.unit_factor.is_finite() || self.unit_factor == 0.0 {
            return Err(format!("unit_factor must be finite and non-zero, got {}", self.unit_factor));
        }
        self.default_clip.validate().map_err(|e| e.to_string())?;
        self.slider_range.validate().map_err(|e| e.to_string())?;
        if !self.slider_range.contains(&self.default_clip) {
            return Err(format!(
                "default clip [{}, {}] lies outside slider range [{}, {}]",
                self.default_clip.min, self.default_clip.max, self.slider_range.min, self.slider_range.max
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_presets_are_valid() {
        for channel in ChannelKind::ALL {
            channel.preset().validate().unwrap();
        }
    }

    #[test]
    fn test_peakforce_table() {
        let stiffness = ChannelKind::PeakForce(PeakForceProperty::Stiffness).preset();
        assert_eq!(stiffness.colorbar_title, "Stiffness (GPa)");
        assert_eq!(stiffness.unit_factor, 1e-9);
        assert_eq!(stiffness.default_clip, ClipRange { min: 0.0, max: 50.0 });

        let dissipation = ChannelKind::PeakForce(PeakForceProperty::Dissipation).preset();
        assert_eq!(dissipation.unit, "keV");
        assert_eq!(dissipation.unit_factor, 1e-3);
        assert_eq!(dissipation.default_clip.max, 100.0);
    }

    #[test]
    fn test_phase_default_inside_slider() {
        let phase = ChannelKind::Phase.preset();
        assert_eq!(phase.slider_range, ClipRange { min: -30.0, max: 30.0 });
        assert_eq!(phase.default_clip, ClipRange { min: 0.0, max: 15.0 });
        assert_eq!(phase.z_axis_title, HEIGHT_TITLE);
    }

    #[test]
    fn test_channel_aliases() {
        assert_eq!("kpfm".parse::<ChannelKind>(), Ok(ChannelKind::Potential));
        assert_eq!("C-AFM".parse::<ChannelKind>(), Ok(ChannelKind::Current));
        assert_eq!(
            "Adhesion".parse::<ChannelKind>(),
            Ok(ChannelKind::PeakForce(PeakForceProperty::Adhesion))
        );
        assert!("friction".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn test_clip_range_rejects_inverted() {
        assert!(ClipRange::new(1.0, 0.0).is_err());
        assert!(ClipRange::new(f64::NAN, 1.0).is_err());
        assert!(ClipRange::new(0.5, 0.5).is_ok());
    }

    #[test]
    fn test_clip_keeps_nan() {
        let range = ClipRange { min: 0.0, max: 1.0 };
        assert_eq!(range.clip(-1.0), 0.0);
        assert_eq!(range.clip(0.5), 0.5);
        assert_eq!(range.clip(2.0), 1.0);
        assert!(range.clip(f64::NAN).is_nan());
    }
}

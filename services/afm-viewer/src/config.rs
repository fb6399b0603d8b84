//! Resolve display parameters from command-line options and presets.

use std::path::Path;

use afm_common::{ChannelKind, ChannelPreset, ClipRange, Colorscale, PresetConfig};
use anyhow::{Context, Result};
use renderer::OverlayParams;
use tracing::{debug, info, warn};

/// Load preset overrides, or the built-in table when no file is given.
pub fn load_presets(path: Option<&Path>) -> Result<PresetConfig> {
    match path {
        Some(path) => {
            let config = PresetConfig::from_file(path)
                .with_context(|| format!("Failed to load presets from {}", path.display()))?;
            info!(
                path = %path.display(),
                overrides = config.channels.len(),
                "Loaded channel presets"
            );
            Ok(config)
        }
        None => {
            debug!("Using built-in channel presets");
            Ok(PresetConfig::default())
        }
    }
}

/// Caller overrides on top of a channel preset.
#[derive(Debug, Clone, Default)]
pub struct OverlayOverrides {
    pub clip_min: Option<f64>,
    pub clip_max: Option<f64>,
    pub unit_factor: Option<f64>,
    pub colorbar_title: Option<String>,
}

/// Build overlay parameters for `channel`.
///
/// Missing clip bounds fall back to the preset's defaults. Bounds outside the
/// preset's slider range are accepted with a warning.
pub fn overlay_params(
    channel: ChannelKind,
    preset: &ChannelPreset,
    colorscale: Colorscale,
    overrides: &OverlayOverrides,
) -> Result<OverlayParams> {
    let clip = ClipRange::new(
        overrides.clip_min.unwrap_or(preset.default_clip.min),
        overrides.clip_max.unwrap_or(preset.default_clip.max),
    )
    .with_context(|| format!("Invalid clip range for {} channel", channel))?;

    if !preset.slider_range.contains(&clip) {
        warn!(
            channel = %channel,
            clip_min = clip.min,
            clip_max = clip.max,
            range_min = preset.slider_range.min,
            range_max = preset.slider_range.max,
            "Clip range extends past the usual range for this channel"
        );
    }

    let mut params = OverlayParams::from_preset(preset, colorscale).with_clip(clip);
    if let Some(factor) = overrides.unit_factor {
        anyhow::ensure!(
            factor.is_finite() && factor != 0.0,
            "Unit factor must be finite and non-zero, got {}",
            factor
        );
        params = params.with_unit_factor(factor);
    }
    if let Some(title) = &overrides.colorbar_title {
        params = params.with_colorbar_title(title.clone());
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use afm_common::PeakForceProperty;
    use std::io::Write;

    #[test]
    fn test_defaults_come_from_preset() {
        let channel = ChannelKind::Phase;
        let params = overlay_params(
            channel,
            &channel.preset(),
            Colorscale::Viridis,
            &OverlayOverrides::default(),
        )
        .unwrap();
        assert_eq!(params.clip, ClipRange { min: 0.0, max: 15.0 });
        assert_eq!(params.unit_factor, 1.0);
        assert_eq!(params.colorbar_title, "Phase (deg)");
    }

    #[test]
    fn test_overrides_apply() {
        let channel = ChannelKind::PeakForce(PeakForceProperty::Dissipation);
        let overrides = OverlayOverrides {
            clip_min: Some(10.0),
            clip_max: None,
            unit_factor: Some(1.0),
            colorbar_title: Some("Dissipation (eV)".to_string()),
        };
        let params = overlay_params(channel, &channel.preset(), Colorscale::Hot, &overrides).unwrap();
        assert_eq!(params.clip, ClipRange { min: 10.0, max: 100.0 });
        assert_eq!(params.unit_factor, 1.0);
        assert_eq!(params.colorbar_title, "Dissipation (eV)");
    }

    #[test]
    fn test_inverted_clip_is_error() {
        let channel = ChannelKind::Potential;
        let overrides = OverlayOverrides {
            clip_min: Some(5.0),
            clip_max: Some(1.0),
            ..Default::default()
        };
        let err = overlay_params(channel, &channel.preset(), Colorscale::Hot, &overrides).unwrap_err();
        assert!(err.to_string().contains("potential"));
    }

    #[test]
    fn test_zero_unit_factor_is_error() {
        let channel = ChannelKind::Current;
        let overrides = OverlayOverrides {
            unit_factor: Some(0.0),
            ..Default::default()
        };
        assert!(overlay_params(channel, &channel.preset(), Colorscale::Hot, &overrides).is_err());
    }

    #[test]
    fn test_load_presets_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"version\": \"1.0\", \"channels\": {{}}}}").unwrap();
        let config = load_presets(Some(file.path())).unwrap();
        assert!(config.channels.is_empty());
        assert!(load_presets(None).unwrap().channels.is_empty());
    }
}

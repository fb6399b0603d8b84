//! Channel preset configuration.
//!
//! The built-in table covers every supported channel. A JSON file can
//! override individual entries, for example to widen the current clip
//! range for a more conductive sample:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "channels": {
//!     "current": {
//!       "colorbar_title": "Electric Current (nA)",
//!       "unit": "nA",
//!       "unit_factor": 1e9,
//!       "default_clip": { "min": 0.0, "max": 2.5 },
//!       "slider_range": { "min": 0.0, "max": 10.0 },
//!       "z_axis_title": "Height (nm)"
//!     }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::channel::{ChannelKind, ChannelPreset};
use crate::error::ConfigError;

/// Root preset configuration; channels are keyed by [`ChannelKind::key`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetConfig {
    /// Version of the preset schema
    #[serde(default = "default_version")]
    pub version: String,

    /// Per-channel overrides
    #[serde(default)]
    pub channels: HashMap<String, ChannelPreset>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            channels: HashMap::new(),
        }
    }
}

impl PresetConfig {
    /// Load preset overrides from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate preset overrides from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every key must be a channel key (aliases are not accepted here) and
    /// every preset must be consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, preset) in &self.channels {
            if !ChannelKind::ALL.iter().any(|c| c.key() == key) {
                return Err(ConfigError::UnknownChannel(key.clone()));
            }
            preset.validate().map_err(|message| ConfigError::InvalidPreset {
                channel: key.clone(),
                message,
            })?;
        }
        Ok(())
    }

    /// Preset for a channel: the override if present, else the built-in one.
    pub fn preset(&self, channel: ChannelKind) -> ChannelPreset {
        self.channels
            .get(channel.key())
            .cloned()
            .unwrap_or_else(|| channel.preset())
    }

    /// The effective table for all channels, in menu order.
    pub fn table(&self) -> Vec<(ChannelKind, ChannelPreset)> {
        ChannelKind::ALL
            .iter()
            .map(|&channel| (channel, self.preset(channel)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::ClipRange;

    #[test]
    fn test_empty_config_uses_builtins() {
        let config = PresetConfig::from_json("{}").unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.preset(ChannelKind::Current), ChannelKind::Current.preset());
        assert_eq!(config.table().len(), ChannelKind::ALL.len());
    }

    #[test]
    fn test_override_replaces_entry() {
        let json = r#"{
            "channels": {
                "current": {
                    "colorbar_title": "Current (pA)",
                    "unit": "pA",
                    "unit_factor": 1e12,
                    "default_clip": { "min": 0.0, "max": 200.0 },
                    "slider_range": { "min": 0.0, "max": 1000.0 },
                    "z_axis_title": "Height (nm)"
                }
            }
        }"#;
        let config = PresetConfig::from_json(json).unwrap();
        let preset = config.preset(ChannelKind::Current);
        assert_eq!(preset.unit, "pA");
        assert_eq!(preset.default_clip, ClipRange { min: 0.0, max: 200.0 });
        // untouched channels keep their built-in preset
        assert_eq!(config.preset(ChannelKind::Phase), ChannelKind::Phase.preset());
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let mut config = PresetConfig::default();
        config
            .channels
            .insert("friction".to_string(), ChannelKind::Potential.preset());
        assert!(matches!(config.validate(), Err(ConfigError::UnknownChannel(k)) if k == "friction"));
    }

    #[test]
    fn test_default_clip_outside_slider_rejected() {
        let mut preset = ChannelKind::Potential.preset();
        preset.default_clip = ClipRange { min: 0.0, max: 20.0 };
        let mut config = PresetConfig::default();
        config.channels.insert("potential".to_string(), preset);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPreset { .. })));
    }
}

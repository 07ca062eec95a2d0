use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional JSON override file (native only)
pub const CONFIG_ENV_VAR: &str = "CURSOR_GLOW_CONFIG";

pub mod presets {
    use super::EngineConfig;

    /// Smooth trailing ring with a soft magnetic pull
    /// Tweak ring_factor (0.08-0.2): lower = longer lag behind the pointer
    pub const SILKY: EngineConfig = EngineConfig {
        ring_factor: 0.13,
        trail_factor: 0.35,
        trail_length: 6,
        magnetic_radius: 90.0,
        magnetic_strength: 0.4,
        ripple_lifetime_ms: 650,
        ripple_cap: 5,
        press_scale: 0.7,
        ring_size: 36.0,
        hover_ring_size: 56.0,
        text_bar_size: [4.0, 28.0],
        dot_size: 8.0,
        glow_size: 400.0,
        ripple_max_diameter: 80.0,
        rest_position: [-400.0, -400.0],
        force_hover: None,
    };

    /// Tight tracking, short tail
    pub const SNAPPY: EngineConfig = EngineConfig {
        ring_factor: 0.3,
        trail_factor: 0.55,
        trail_length: 4,
        magnetic_radius: 70.0,
        magnetic_strength: 0.3,
        ..SILKY
    };

    /// Heavy drift with a long tail, like a glow blob that barely keeps up
    pub const LAZY: EngineConfig = EngineConfig {
        ring_factor: 0.07,
        trail_factor: 0.25,
        trail_length: 7,
        magnetic_strength: 0.5,
        ripple_lifetime_ms: 700,
        ripple_cap: 6,
        ..SILKY
    };
}

/// Tuning constants for the cursor engine.
///
/// Fixed at construction; the app inserts it once and never mutates it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fraction of the remaining distance the ring covers per tick
    pub ring_factor: f32,
    /// Same, for each trail node chasing its predecessor
    pub trail_factor: f32,
    pub trail_length: usize,
    /// Attraction radius around a hovered target's center (px)
    pub magnetic_radius: f32,
    /// Maximum pull toward the center, in (0, 1)
    pub magnetic_strength: f32,
    pub ripple_lifetime_ms: u64,
    /// Maximum concurrent ripples; the oldest is dropped beyond this
    pub ripple_cap: usize,
    /// Ring scale while the primary button is held
    pub press_scale: f32,
    pub ring_size: f32,
    pub hover_ring_size: f32,
    pub text_bar_size: [f32; 2],
    pub dot_size: f32,
    pub glow_size: f32,
    pub ripple_max_diameter: f32,
    /// Where every follower waits before the first pointer move (off-screen)
    pub rest_position: [f32; 2],
    /// Override the detected hover capability
    pub force_hover: Option<bool>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        presets::SILKY
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read config {}: {}", path.display(), source)
            }
            ConfigError::Parse(err) => write!(f, "Malformed config: {}", err),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid config value `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing keys fall back to [`presets::SILKY`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load the file named by [`CONFIG_ENV_VAR`]; `Ok(None)` when unset
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path)).map(Some),
            None => Ok(None),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn unit_open(value: f32) -> bool {
            value > 0.0 && value < 1.0
        }

        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !unit_open(self.ring_factor) {
            return invalid("ring_factor", "must be in (0, 1)");
        }
        if !unit_open(self.trail_factor) {
            return invalid("trail_factor", "must be in (0, 1)");
        }
        if !unit_open(self.magnetic_strength) {
            return invalid("magnetic_strength", "must be in (0, 1)");
        }
        if !(self.magnetic_radius > 0.0) {
            return invalid("magnetic_radius", "must be positive");
        }
        if self.trail_length == 0 {
            return invalid("trail_length", "must be at least 1");
        }
        if self.ripple_cap == 0 {
            return invalid("ripple_cap", "must be at least 1");
        }
        if self.ripple_lifetime_ms == 0 {
            return invalid("ripple_lifetime_ms", "must be non-zero");
        }
        if !(self.press_scale > 0.0) {
            return invalid("press_scale", "must be positive");
        }
        Ok(())
    }

    pub fn ripple_lifetime(&self) -> Duration {
        Duration::from_millis(self.ripple_lifetime_ms)
    }

    pub fn rest(&self) -> Vec2 {
        Vec2::from_array(self.rest_position)
    }

    pub fn text_bar(&self) -> Vec2 {
        Vec2::from_array(self.text_bar_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../config/cursor_glow.json");

    #[test]
    fn test_presets_are_valid() {
        for preset in [presets::SILKY, presets::SNAPPY, presets::LAZY] {
            assert!(preset.validate().is_ok(), "{:?}", preset);
        }
    }

    #[test]
    fn test_sample_file_parses() {
        let config = EngineConfig::from_json(SAMPLE).expect("sample config should parse");
        assert_eq!(config.ring_factor, 0.13);
        assert_eq!(config.ripple_cap, 5);
        assert_eq!(config.force_hover, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "trail_length": 3 }"#).unwrap();
        assert_eq!(config.trail_length, 3);
        assert_eq!(config.magnetic_radius, presets::SILKY.magnetic_radius);
    }

    #[test]
    fn test_rejects_out_of_range_factor() {
        let err = EngineConfig::from_json(r#"{ "ring_factor": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "ring_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_cap() {
        let err = EngineConfig::from_json(r#"{ "ripple_cap": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("ripple_cap"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

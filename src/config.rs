use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::brush::{BrushSettings, validate_width};
use crate::error::ConfigError;
use crate::input::InputSource;

/// What the engine does with a held sample when no stroke has begun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeldWithoutBegin {
    /// Drop the sample. Strokes start only on an explicit press.
    #[default]
    Ignore,
    /// Start a stroke implicitly and record the sample as its first point.
    BeginStroke,
}

/// Tunables for stroke capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// A new point is recorded only if it is farther than this from the previous one
    pub min_point_distance: f32,
    /// Distance from the viewpoint at which points are placed
    pub standoff: f32,
    pub held_without_begin: HeldWithoutBegin,
    /// Brush in effect at startup
    pub brush: BrushSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_point_distance: 0.01,
            standoff: 0.5,
            held_without_begin: HeldWithoutBegin::default(),
            brush: BrushSettings::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_point_distance.is_finite() || self.min_point_distance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_point_distance must be a non-negative number, got {}",
                self.min_point_distance
            )));
        }
        if !self.standoff.is_finite() || self.standoff <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "standoff must be positive, got {}",
                self.standoff
            )));
        }
        validate_width(self.brush.width).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Settings for the demo shell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub input_source: InputSource,
    /// Image to use as the colour swatch; a generated palette is used if unset
    pub swatch_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.engine.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "standoff": 1.5 }"#).unwrap();
        assert_eq!(config.standoff, 1.5);
        assert_eq!(config.min_point_distance, 0.01);
        assert_eq!(config.held_without_begin, HeldWithoutBegin::Ignore);
        assert_eq!(config.brush, BrushSettings::default());
    }

    #[test]
    fn test_policy_and_brush_parse() {
        let json = r#"{
            "held_without_begin": "begin_stroke",
            "brush": { "width": 0.02, "color": [0, 0, 255, 255] }
        }"#;
        let config = EngineConfig::from_json_str(json).unwrap();
        assert_eq!(config.held_without_begin, HeldWithoutBegin::BeginStroke);
        assert_eq!(config.brush.width, 0.02);
        assert_eq!(config.brush.color, Color32::BLUE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for json in [
            r#"{ "standoff": 0.0 }"#,
            r#"{ "min_point_distance": -0.5 }"#,
            r#"{ "brush": { "width": -1.0 } }"#,
        ] {
            assert!(matches!(
                EngineConfig::from_json_str(json),
                Err(ConfigError::Invalid(_))
            ));
        }
        assert!(matches!(
            EngineConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_app_config_flattens_engine() {
        let json = r#"{ "input_source": "touch", "standoff": 0.8 }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.input_source, InputSource::Touch);
        assert_eq!(config.engine.standoff, 0.8);
        assert!(config.swatch_path.is_none());
    }
}

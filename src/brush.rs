use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Multiplier from world-space brush width to the UI size of the brush preview.
pub const PREVIEW_SCALE: f32 = 2000.0;

/// Current brush width and colour.
///
/// The engine copies these into a stroke when the stroke starts, so changing
/// them never affects a stroke that is already in progress or finished.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Line width in world units
    pub width: f32,
    pub color: Color32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            width: 0.01,
            color: Color32::RED,
        }
    }
}

impl BrushSettings {
    pub fn new(width: f32, color: Color32) -> Result<Self, EngineError> {
        validate_width(width)?;
        Ok(Self { width, color })
    }

    /// Diameter of the brush preview widget in UI points
    pub fn preview_diameter(&self) -> f32 {
        self.width * PREVIEW_SCALE
    }
}

pub(crate) fn validate_width(width: f32) -> Result<(), EngineError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidBrushWidth(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_brush() {
        let brush = BrushSettings::default();
        assert_eq!(brush.width, 0.01);
        assert_eq!(brush.color, Color32::RED);
        assert!((brush.preview_diameter() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_bad_width() {
        assert!(BrushSettings::new(0.0, Color32::RED).is_err());
        assert!(BrushSettings::new(-1.0, Color32::RED).is_err());
        assert!(BrushSettings::new(f32::NAN, Color32::RED).is_err());
        assert!(BrushSettings::new(0.02, Color32::BLUE).is_ok());
    }
}

use egui::Color32;

use crate::error::EngineError;

/// Result type for command dispatch
pub type CommandResult = Result<(), EngineError>;

/// Requests the UI can make of the engine.
///
/// Widgets produce these instead of reaching into engine state, so the engine
/// never needs to know which widget a change came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Colour for strokes started from now on
    SetBrushColor(Color32),
    /// Width in world units for strokes started from now on
    SetBrushWidth(f32),
    /// Remove the most recently finished stroke
    UndoLast,
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::SetBrushColor(_) => "Set Brush Color",
            Command::SetBrushWidth(_) => "Set Brush Width",
            Command::UndoLast => "Undo",
        }
    }
}

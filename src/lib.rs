#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod color_picker;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod panels;
pub mod projection;
pub mod renderer;
pub mod store;
pub mod stroke;

pub use app::SketchApp;
pub use brush::BrushSettings;
pub use color_picker::{ColorPick, ColorSampler, ImageBuffer, LocalSpace, ScreenRectWidget, Swatch};
pub use command::{Command, CommandResult};
pub use config::{AppConfig, EngineConfig, HeldWithoutBegin};
pub use engine::{GestureState, HeldOutcome, StrokeEngine};
pub use error::{ConfigError, EngineError, PickError};
pub use input::{GesturePhase, InputSource, PointerSample, PointerSampler};
pub use projection::{PerspectiveCamera, Projector, ViewFrame};
pub use renderer::StrokeRenderer;
pub use store::StrokeStore;
pub use stroke::{ActiveStroke, Stroke, StrokeId};

use egui::{Context, Order, Pos2, Rect};
use serde::{Deserialize, Serialize};

mod mouse;
mod touch;

pub use mouse::MouseSampler;
pub use touch::TouchSampler;

/// Where in a gesture a pointer sample falls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// The pointer went down this tick
    Began,
    /// The pointer is still down
    Held,
    /// The pointer was released this tick
    Ended,
}

/// One tick of pointer input, independent of the device it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// The position in screen coordinates
    pub position: Pos2,
    pub phase: GesturePhase,
    /// Whether the position is covered by UI that should receive the press instead
    pub over_blocking_surface: bool,
}

/// Turns a platform input source into per-tick [`PointerSample`]s.
pub trait PointerSampler {
    fn name(&self) -> &'static str;

    /// Update the area that accepts drawing (e.g. when the window is resized)
    fn set_canvas_rect(&mut self, rect: Rect);

    /// Read this tick's input. Returns `None` when no gesture is in progress.
    fn sample(&mut self, ctx: &Context) -> Option<PointerSample>;
}

/// Which sampler the shell drives the engine with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    #[default]
    Mouse,
    Touch,
}

pub fn sampler_for(source: InputSource) -> Box<dyn PointerSampler> {
    match source {
        InputSource::Mouse => Box::new(MouseSampler::new()),
        InputSource::Touch => Box::new(TouchSampler::new()),
    }
}

/// A position is blocked when it is outside the canvas or under a floating
/// UI layer such as a window.
pub(crate) fn is_over_blocking_surface(ctx: &Context, canvas: Option<Rect>, pos: Pos2) -> bool {
    let outside_canvas = canvas.is_some_and(|rect| !rect.contains(pos));
    let covered = ctx
        .layer_id_at(pos)
        .is_some_and(|layer| layer.order != Order::Background);
    outside_canvas || covered
}

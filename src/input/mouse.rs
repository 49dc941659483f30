use egui::{Context, Pos2, Rect};

use super::{GesturePhase, PointerSample, PointerSampler, is_over_blocking_surface};

/// Samples the primary mouse button.
///
/// Edges are derived from the button level seen on consecutive ticks. A press
/// and release that both fall within one frame leave the level unchanged and
/// are not reported at all.
#[derive(Debug, Default)]
pub struct MouseSampler {
    was_down: bool,
    last_pos: Option<Pos2>,
    canvas_rect: Option<Rect>,
}

impl MouseSampler {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance(&mut self, down: bool, pos: Option<Pos2>) -> Option<(Pos2, GesturePhase)> {
        if pos.is_some() {
            self.last_pos = pos;
        }
        // A press without a known position can't start anything yet
        let pos = self.last_pos?;
        let phase = classify(self.was_down, down);
        self.was_down = down;
        phase.map(|phase| (pos, phase))
    }
}

fn classify(was_down: bool, down: bool) -> Option<GesturePhase> {
    match (was_down, down) {
        (false, true) => Some(GesturePhase::Began),
        (true, true) => Some(GesturePhase::Held),
        (true, false) => Some(GesturePhase::Ended),
        (false, false) => None,
    }
}

impl PointerSampler for MouseSampler {
    fn name(&self) -> &'static str {
        "Mouse"
    }

    fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    fn sample(&mut self, ctx: &Context) -> Option<PointerSample> {
        let (down, pos) = ctx.input(|i| (i.pointer.primary_down(), i.pointer.latest_pos()));
        let (position, phase) = self.advance(down, pos)?;
        Some(PointerSample {
            position,
            phase,
            over_blocking_surface: is_over_blocking_surface(ctx, self.canvas_rect, position),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_press_hold_release() {
        let mut sampler = MouseSampler::new();
        let p = pos2(10.0, 20.0);

        assert_eq!(sampler.advance(false, Some(p)), None);
        assert_eq!(sampler.advance(true, Some(p)), Some((p, GesturePhase::Began)));
        assert_eq!(
            sampler.advance(true, Some(pos2(11.0, 20.0))),
            Some((pos2(11.0, 20.0), GesturePhase::Held))
        );
        // Released after the pointer left: report the last known position
        assert_eq!(
            sampler.advance(false, None),
            Some((pos2(11.0, 20.0), GesturePhase::Ended))
        );
        assert_eq!(sampler.advance(false, None), None);
    }

    #[test]
    fn test_press_without_position_waits() {
        let mut sampler = MouseSampler::new();
        assert_eq!(sampler.advance(true, None), None);

        let p = pos2(5.0, 5.0);
        assert_eq!(sampler.advance(true, Some(p)), Some((p, GesturePhase::Began)));
    }

    #[test]
    fn test_click_inside_one_frame_is_not_reported() {
        let mut sampler = MouseSampler::new();
        let p = pos2(3.0, 4.0);

        // The button is up on both ticks, so no edge is seen
        assert_eq!(sampler.advance(false, Some(p)), None);
        assert_eq!(sampler.advance(false, Some(p)), None);
    }
}

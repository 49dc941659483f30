use std::collections::VecDeque;

use egui::{Context, Event, Pos2, Rect, TouchId, TouchPhase};

use super::{GesturePhase, PointerSample, PointerSampler, is_over_blocking_surface};

/// Samples the first finger on a touch screen; other fingers are ignored
/// until it lifts.
#[derive(Debug, Default)]
pub struct TouchSampler {
    active: Option<TouchId>,
    last_pos: Option<Pos2>,
    // Begin/end edges not yet reported, one per tick, oldest first
    pending: VecDeque<(Pos2, GesturePhase)>,
    canvas_rect: Option<Rect>,
}

impl TouchSampler {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance(&mut self, events: &[Event]) -> Option<(Pos2, GesturePhase)> {
        for event in events {
            let Event::Touch { id, phase, pos, .. } = event else {
                continue;
            };
            match phase {
                TouchPhase::Start if self.active.is_none() => {
                    self.active = Some(*id);
                    self.last_pos = Some(*pos);
                    self.pending.push_back((*pos, GesturePhase::Began));
                }
                TouchPhase::Move if self.active == Some(*id) => {
                    self.last_pos = Some(*pos);
                }
                TouchPhase::End | TouchPhase::Cancel if self.active == Some(*id) => {
                    // Cleared here so a finger landing later in the same frame can take over
                    self.active = None;
                    self.last_pos = Some(*pos);
                    self.pending.push_back((*pos, GesturePhase::Ended));
                }
                _ => {}
            }
        }

        if let Some(edge) = self.pending.pop_front() {
            return Some(edge);
        }
        let pos = self.last_pos?;
        self.active.map(|_| (pos, GesturePhase::Held))
    }
}

impl PointerSampler for TouchSampler {
    fn name(&self) -> &'static str {
        "Touch"
    }

    fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    fn sample(&mut self, ctx: &Context) -> Option<PointerSample> {
        let events = ctx.input(|i| i.raw.events.clone());
        let (position, phase) = self.advance(&events)?;
        Some(PointerSample {
            position,
            phase,
            over_blocking_surface: is_over_blocking_surface(ctx, self.canvas_rect, position),
        })
    }
}

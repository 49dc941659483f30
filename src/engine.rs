use egui::{Color32, Pos2};
use glam::Vec3;
use log::{debug, info, warn};

use crate::brush::{BrushSettings, validate_width};
use crate::command::{Command, CommandResult};
use crate::config::{EngineConfig, HeldWithoutBegin};
use crate::error::{ConfigError, EngineError};
use crate::input::{GesturePhase, PointerSample};
use crate::projection::{Projector, ViewFrame};
use crate::store::StrokeStore;
use crate::stroke::{ActiveStroke, Stroke, StrokeId};

#[derive(Debug, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing {
        stroke: ActiveStroke,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
        }
    }
}

/// Result of feeding a held sample to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeldOutcome {
    /// The point cleared the distance gate and was recorded
    Appended(Vec3),
    /// The point was too close to the last recorded point
    Gated,
    /// A stroke was started implicitly with this point
    Started(Vec3),
    /// Nothing happened: no stroke in progress, or no usable projection
    Ignored,
}

/// Turns gestures into strokes and keeps the finished ones.
///
/// Driven once per tick through [`StrokeEngine::step`], or directly through
/// the `on_gesture_*` operations.
#[derive(Debug)]
pub struct StrokeEngine {
    config: EngineConfig,
    brush: BrushSettings,
    projector: Projector,
    state: GestureState,
    store: StrokeStore,
}

impl Default for StrokeEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StrokeEngine {
    /// Build an engine, falling back to the default config if `config` is invalid.
    pub fn new(config: EngineConfig) -> Self {
        match Self::try_new(config) {
            Ok(engine) => engine,
            Err(e) => {
                warn!("{}; using default engine config", e);
                Self::from_valid(EngineConfig::default())
            }
        }
    }

    pub fn try_new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EngineConfig) -> Self {
        Self {
            brush: config.brush,
            projector: Projector::new(config.standoff),
            state: GestureState::Idle,
            store: StrokeStore::new(),
            config,
        }
    }

    /// Feed one tick of pointer input.
    ///
    /// A press over a blocking surface is dropped, so the rest of that
    /// gesture is ignored too (unless the engine is configured to begin
    /// strokes on held samples).
    pub fn step(&mut self, sample: Option<&PointerSample>, frame: &dyn ViewFrame) {
        let Some(sample) = sample else {
            return;
        };
        match sample.phase {
            GesturePhase::Began => {
                if sample.over_blocking_surface {
                    debug!("Press at {:?} is over UI, not drawing", sample.position);
                } else {
                    self.on_gesture_began(sample.position);
                }
            }
            GesturePhase::Held => {
                let can_start = !sample.over_blocking_surface;
                self.held(sample.position, frame, can_start);
            }
            GesturePhase::Ended => {
                self.on_gesture_ended();
            }
        }
    }

    /// Start a new stroke using the current brush.
    ///
    /// If a stroke is already in progress it is finished first.
    pub fn on_gesture_began(&mut self, screen_pos: Pos2) {
        if self.is_drawing() {
            warn!("Gesture began while already drawing; finishing the previous stroke");
            self.on_gesture_ended();
        }
        let stroke = ActiveStroke::new(&self.brush);
        debug!(
            "Stroke {} started at {:?} (width {}, color {:?})",
            stroke.id(),
            screen_pos,
            stroke.width(),
            stroke.color()
        );
        self.state = GestureState::Drawing { stroke };
    }

    /// Project `screen_pos` and record it if it clears the distance gate.
    pub fn on_gesture_held(&mut self, screen_pos: Pos2, frame: &dyn ViewFrame) -> HeldOutcome {
        self.held(screen_pos, frame, true)
    }

    fn held(&mut self, screen_pos: Pos2, frame: &dyn ViewFrame, can_start: bool) -> HeldOutcome {
        let Some(point) = self.projector.project(screen_pos, frame) else {
            warn!("No world position for screen point {:?}, sample dropped", screen_pos);
            return HeldOutcome::Ignored;
        };

        if let GestureState::Drawing { stroke } = &mut self.state {
            return if stroke.try_add_point(point, self.config.min_point_distance) {
                HeldOutcome::Appended(point)
            } else {
                HeldOutcome::Gated
            };
        }

        match self.config.held_without_begin {
            HeldWithoutBegin::BeginStroke if can_start => {
                self.on_gesture_began(screen_pos);
                if let GestureState::Drawing { stroke } = &mut self.state {
                    stroke.try_add_point(point, self.config.min_point_distance);
                }
                HeldOutcome::Started(point)
            }
            _ => {
                debug!("Held sample without an active stroke ignored");
                HeldOutcome::Ignored
            }
        }
    }

    /// Finish the active stroke and move it into the store, even if it has no points.
    pub fn on_gesture_ended(&mut self) -> Option<StrokeId> {
        match std::mem::take(&mut self.state) {
            GestureState::Drawing { stroke } => {
                let stroke = stroke.finish();
                let id = stroke.id();
                debug!("Stroke {} finished with {} points", id, stroke.points().len());
                self.store.append(stroke);
                Some(id)
            }
            GestureState::Idle => None,
        }
    }

    /// Remove the most recently finished stroke. The stroke being drawn, if
    /// any, is left alone.
    pub fn undo_last(&mut self) {
        if self.store.is_empty() {
            debug!("Nothing to undo");
            return;
        }
        self.store.remove_last();
        debug!("Undid last stroke, {} remaining", self.store.len());
    }

    /// Applies to strokes started after this call
    pub fn set_brush_color(&mut self, color: Color32) {
        info!("Brush color set to {:?}", color);
        self.brush.color = color;
    }

    /// Applies to strokes started after this call
    pub fn set_brush_width(&mut self, width: f32) -> Result<(), EngineError> {
        validate_width(width)?;
        info!("Brush width set to {}", width);
        self.brush.width = width;
        Ok(())
    }

    pub fn set_brush(&mut self, brush: BrushSettings) -> Result<(), EngineError> {
        self.set_brush_width(brush.width)?;
        self.set_brush_color(brush.color);
        Ok(())
    }

    pub fn dispatch(&mut self, command: Command) -> CommandResult {
        debug!("Dispatching {:?}", command);
        match command {
            Command::SetBrushColor(color) => {
                self.set_brush_color(color);
                Ok(())
            }
            Command::SetBrushWidth(width) => self.set_brush_width(width),
            Command::UndoLast => {
                self.undo_last();
                Ok(())
            }
        }
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing { .. })
    }

    /// The stroke being drawn, for live preview
    pub fn active_stroke(&self) -> Option<&ActiveStroke> {
        match &self.state {
            GestureState::Drawing { stroke } => Some(stroke),
            GestureState::Idle => None,
        }
    }

    pub fn store(&self) -> &StrokeStore {
        &self.store
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.store.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::PerspectiveCamera;
    use egui::{Rect, pos2, vec2};

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 1000.0)))
    }

    fn sample(phase: GesturePhase, position: Pos2, blocked: bool) -> PointerSample {
        PointerSample {
            position,
            phase,
            over_blocking_surface: blocked,
        }
    }

    #[test]
    fn test_began_creates_empty_stroke() {
        let mut engine = StrokeEngine::default();
        engine.on_gesture_began(pos2(1.0, 1.0));

        assert!(engine.is_drawing());
        assert_eq!(engine.state().name(), "Drawing");
        assert!(engine.active_stroke().unwrap().points().is_empty());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_press_over_ui_does_not_draw() {
        let mut engine = StrokeEngine::default();
        let camera = camera();
        let p = pos2(300.0, 300.0);

        engine.step(Some(&sample(GesturePhase::Began, p, true)), &camera);
        engine.step(Some(&sample(GesturePhase::Held, p, false)), &camera);
        engine.step(Some(&sample(GesturePhase::Ended, p, false)), &camera);

        assert!(!engine.is_drawing());
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_held_without_begin_ignored_by_default() {
        let mut engine = StrokeEngine::default();
        let outcome = engine.on_gesture_held(pos2(10.0, 10.0), &camera());
        assert_eq!(outcome, HeldOutcome::Ignored);
        assert!(!engine.is_drawing());
    }

    #[test]
    fn test_held_without_begin_can_start_stroke() {
        let mut engine = StrokeEngine::new(EngineConfig {
            held_without_begin: HeldWithoutBegin::BeginStroke,
            ..Default::default()
        });
        let camera = camera();

        let outcome = engine.on_gesture_held(pos2(10.0, 10.0), &camera);
        assert!(matches!(outcome, HeldOutcome::Started(_)));
        assert_eq!(engine.active_stroke().unwrap().points().len(), 1);

        // Still blocked over UI
        engine.on_gesture_ended();
        engine.step(Some(&sample(GesturePhase::Held, pos2(5.0, 5.0), true)), &camera);
        assert!(!engine.is_drawing());
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn test_began_while_drawing_finishes_previous() {
        let mut engine = StrokeEngine::default();
        let camera = camera();

        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.on_gesture_held(pos2(0.0, 0.0), &camera);
        let first = engine.active_stroke().unwrap().id();
        engine.on_gesture_began(pos2(500.0, 500.0));

        assert_eq!(engine.store().len(), 1);
        assert_eq!(engine.strokes()[0].id(), first);
        assert_ne!(engine.active_stroke().unwrap().id(), first);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            min_point_distance: f32::NAN,
            brush: BrushSettings {
                width: -1.0,
                color: Color32::RED,
            },
            ..Default::default()
        };
        assert!(matches!(
            StrokeEngine::try_new(config.clone()),
            Err(ConfigError::Invalid(_))
        ));

        // Falls back to defaults, so the gate still works and widths stay positive
        let mut engine = StrokeEngine::new(config);
        assert_eq!(engine.config(), &EngineConfig::default());
        let camera = camera();
        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.on_gesture_held(pos2(0.0, 0.0), &camera);
        engine.on_gesture_held(pos2(900.0, 900.0), &camera);
        engine.on_gesture_ended();

        let stroke = &engine.strokes()[0];
        assert_eq!(stroke.width(), 0.01);
        assert_eq!(stroke.points().len(), 2);
    }

    #[test]
    fn test_ended_while_idle_is_noop() {
        let mut engine = StrokeEngine::default();
        assert_eq!(engine.on_gesture_ended(), None);
        assert!(engine.store().is_empty());
    }

    #[test]
    fn test_empty_gesture_still_stored() {
        let mut engine = StrokeEngine::default();
        engine.on_gesture_began(pos2(0.0, 0.0));
        let id = engine.on_gesture_ended().unwrap();

        assert_eq!(engine.strokes()[0].id(), id);
        assert!(engine.strokes()[0].points().is_empty());
    }

    #[test]
    fn test_undo_leaves_active_stroke() {
        let mut engine = StrokeEngine::default();
        let camera = camera();
        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.on_gesture_ended();

        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.on_gesture_held(pos2(100.0, 100.0), &camera);
        engine.undo_last();
        engine.undo_last();

        assert!(engine.store().is_empty());
        assert_eq!(engine.active_stroke().unwrap().points().len(), 1);
    }

    #[test]
    fn test_brush_changes_do_not_touch_active_stroke() {
        let mut engine = StrokeEngine::default();
        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.set_brush_color(Color32::GREEN);
        engine.set_brush_width(0.05).unwrap();

        let active = engine.active_stroke().unwrap();
        assert_eq!(active.color(), Color32::RED);
        assert_eq!(active.width(), 0.01);

        engine.on_gesture_ended();
        engine.on_gesture_began(pos2(0.0, 0.0));
        let active = engine.active_stroke().unwrap();
        assert_eq!(active.color(), Color32::GREEN);
        assert_eq!(active.width(), 0.05);
    }

    #[test]
    fn test_invalid_width_keeps_previous() {
        let mut engine = StrokeEngine::default();
        assert_eq!(
            engine.dispatch(Command::SetBrushWidth(0.0)),
            Err(EngineError::InvalidBrushWidth(0.0))
        );
        assert_eq!(engine.brush().width, 0.01);
    }

    #[test]
    fn test_dispatch_commands() {
        let mut engine = StrokeEngine::default();
        engine.on_gesture_began(pos2(0.0, 0.0));
        engine.on_gesture_ended();

        engine.dispatch(Command::SetBrushColor(Color32::YELLOW)).unwrap();
        engine.dispatch(Command::SetBrushWidth(0.02)).unwrap();
        engine.dispatch(Command::UndoLast).unwrap();

        assert_eq!(*engine.brush(), BrushSettings::new(0.02, Color32::YELLOW).unwrap());
        assert!(engine.store().is_empty());
    }
}

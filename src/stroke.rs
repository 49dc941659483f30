use egui::Color32;
use glam::Vec3;
use uuid::Uuid;

use crate::brush::BrushSettings;

/// Identifies a stroke for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrokeId(Uuid);

impl StrokeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Immutable stroke, owned by the store once finished
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Vec3>,
    color: Color32,
    width: f32,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

/// The stroke currently being drawn.
///
/// Width and colour are fixed when it is created. Points can only be added,
/// and only when they clear the distance gate.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    id: StrokeId,
    points: Vec<Vec3>,
    color: Color32,
    width: f32,
}

impl ActiveStroke {
    pub fn new(brush: &BrushSettings) -> Self {
        Self {
            id: StrokeId::new(),
            points: Vec::new(),
            color: brush.color,
            width: brush.width,
        }
    }

    /// Append `point` if the stroke is empty or the point lies strictly farther
    /// than `min_distance` from the last recorded point.
    ///
    /// Returns whether the point was recorded.
    pub fn try_add_point(&mut self, point: Vec3, min_distance: f32) -> bool {
        let accept = match self.points.last() {
            None => true,
            Some(last) => last.distance(point) > min_distance,
        };
        if accept {
            self.points.push(point);
        }
        accept
    }

    pub fn finish(self) -> Stroke {
        Stroke {
            id: self.id,
            points: self.points,
            color: self.color,
            width: self.width,
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

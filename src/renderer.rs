use std::collections::{HashMap, HashSet};

use egui::{Color32, Painter, Shape, Stroke as EguiStroke};
use glam::Vec3;
use log::debug;

use crate::projection::PerspectiveCamera;
use crate::stroke::{ActiveStroke, Stroke, StrokeId};

/// Screen-space geometry for one finished stroke, valid for the camera it
/// was built with.
#[derive(Default)]
struct LineResource {
    camera: Option<PerspectiveCamera>,
    shapes: Vec<Shape>,
}

/// Draws strokes by projecting them back onto the screen.
///
/// Strokes are plain data, so the renderer owns one line resource per stroke
/// id and reconciles them with the store every frame: new strokes get a
/// resource, undone strokes lose theirs.
#[derive(Default)]
pub struct StrokeRenderer {
    lines: HashMap<StrokeId, LineResource>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create resources for new strokes and release those whose stroke is gone
    pub fn sync(&mut self, strokes: &[Stroke]) {
        let live: HashSet<StrokeId> = strokes.iter().map(Stroke::id).collect();
        self.lines.retain(|id, _| {
            let keep = live.contains(id);
            if !keep {
                debug!("Released line for stroke {}", id);
            }
            keep
        });
        for stroke in strokes {
            self.lines.entry(stroke.id()).or_insert_with(|| {
                debug!("Created line for stroke {}", stroke.id());
                LineResource::default()
            });
        }
    }

    pub fn resource_count(&self) -> usize {
        self.lines.len()
    }

    pub fn render(
        &mut self,
        painter: &Painter,
        camera: &PerspectiveCamera,
        strokes: &[Stroke],
        active: Option<&ActiveStroke>,
    ) {
        self.sync(strokes);

        for stroke in strokes {
            let Some(line) = self.lines.get_mut(&stroke.id()) else {
                continue;
            };
            if line.camera.as_ref() != Some(camera) {
                line.shapes = line_shapes(camera, stroke.points(), stroke.width(), stroke.color());
                line.camera = Some(*camera);
            }
            painter.extend(line.shapes.iter().cloned());
        }

        // Live preview, rebuilt every frame while it grows
        if let Some(active) = active {
            painter.extend(line_shapes(camera, active.points(), active.width(), active.color()));
        }
    }
}

fn line_shapes(camera: &PerspectiveCamera, points: &[Vec3], width: f32, color: Color32) -> Vec<Shape> {
    points
        .windows(2)
        .filter_map(|pair| {
            let a = camera.world_to_screen(pair[0])?;
            let b = camera.world_to_screen(pair[1])?;
            let pixels = camera.world_width_to_pixels(width, (pair[0] + pair[1]) * 0.5)?;
            Some(Shape::line_segment([a, b], EguiStroke::new(pixels, color)))
        })
        .collect()
}

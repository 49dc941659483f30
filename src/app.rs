use std::path::Path;

use egui::{Color32, TextureHandle, TextureOptions, ecolor::Hsva};
use log::{error, info, warn};

use crate::brush::BrushSettings;
use crate::color_picker::{ColorPick, ColorSampler, ImageBuffer, Swatch};
use crate::command::Command;
use crate::config::AppConfig;
use crate::engine::StrokeEngine;
use crate::input::{self, PointerSampler};
use crate::panels;
use crate::projection::PerspectiveCamera;
use crate::renderer::StrokeRenderer;

/// Storage key for the brush, restored on the next launch
const BRUSH_KEY: &str = "brush";

/// Demo shell: feeds egui input into the engine and draws the result.
pub struct SketchApp {
    pub(crate) engine: StrokeEngine,
    pub(crate) sampler: Box<dyn PointerSampler>,
    pub(crate) camera: PerspectiveCamera,
    pub(crate) renderer: StrokeRenderer,
    pub(crate) color_sampler: ColorSampler,
    pub(crate) swatch: Swatch,
    swatch_texture: Option<TextureHandle>,
    pub(crate) show_color_picker: bool,
    pub(crate) last_pick: Option<ColorPick>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut engine = StrokeEngine::new(config.engine.clone());
        if let Some(brush) = cc
            .storage
            .and_then(|storage| eframe::get_value::<BrushSettings>(storage, BRUSH_KEY))
        {
            if let Err(e) = engine.set_brush(brush) {
                warn!("Ignoring stored brush: {}", e);
            }
        }

        let sampler = input::sampler_for(config.input_source);
        info!("Drawing with {} input", sampler.name());

        Self {
            engine,
            sampler,
            camera: PerspectiveCamera::new(egui::Rect::NOTHING),
            renderer: StrokeRenderer::new(),
            color_sampler: ColorSampler::new(),
            swatch: load_swatch(config.swatch_path.as_deref()),
            swatch_texture: None,
            show_color_picker: false,
            last_pick: None,
        }
    }

    pub fn engine(&self) -> &StrokeEngine {
        &self.engine
    }

    pub fn execute(&mut self, command: Command) {
        if let Err(e) = self.engine.dispatch(command) {
            warn!("{} failed: {}", command.label(), e);
        }
    }

    /// Upload the swatch on first use
    pub(crate) fn swatch_texture(&mut self, ctx: &egui::Context) -> Option<TextureHandle> {
        if self.swatch_texture.is_none() {
            let image = self.swatch.image.as_ref()?;
            self.swatch_texture =
                Some(ctx.load_texture("swatch", image.to_color_image(), TextureOptions::NEAREST));
        }
        self.swatch_texture.clone()
    }
}

impl eframe::App for SketchApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, BRUSH_KEY, self.engine.brush());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::tools_panel(self, ctx);
        panels::color_picker_panel(self, ctx);
        panels::central_panel(self, ctx);

        // Held samples and camera motion need ticks even when nothing else changes
        ctx.request_repaint();
    }
}

fn load_swatch(path: Option<&Path>) -> Swatch {
    let Some(path) = path else {
        return Swatch::new(default_palette());
    };
    match image::open(path) {
        Ok(decoded) => {
            info!("Loaded swatch {}", path.display());
            Swatch::new(ImageBuffer::from_rgba_image(&decoded.to_rgba8()))
        }
        Err(e) => {
            error!("Failed to load swatch {}: {}", path.display(), e);
            Swatch::default()
        }
    }
}

/// Hue across, brightness up
pub fn default_palette() -> ImageBuffer {
    const WIDTH: usize = 256;
    const HEIGHT: usize = 64;
    ImageBuffer::from_fn(WIDTH, HEIGHT, |x, y| {
        let hue = x as f32 / (WIDTH - 1) as f32;
        let value = y as f32 / (HEIGHT - 1) as f32;
        Color32::from(Hsva::new(hue, 1.0, value, 1.0))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_brightness() {
        let palette = default_palette();
        assert_eq!(palette.get_pixel(0, 0), Some(Color32::BLACK));
        let top = palette.get_pixel(0, palette.height() - 1).unwrap();
        assert_eq!(top, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_missing_swatch_file_leaves_swatch_unbound() {
        let swatch = load_swatch(Some(Path::new("definitely/not/here.png")));
        assert!(swatch.image.is_none());
        assert!(swatch.crop.is_none());
    }
}

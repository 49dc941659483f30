use egui::{Sense, Slider, vec2};

use crate::SketchApp;
use crate::command::Command;

const MIN_BRUSH_WIDTH: f32 = 0.001;
const MAX_BRUSH_WIDTH: f32 = 0.05;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    let mut commands = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            let brush = *app.engine().brush();
            let mut width = brush.width;
            let slider = Slider::new(&mut width, MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH)
                .logarithmic(true)
                .text("Size");
            if ui.add(slider).changed() {
                commands.push(Command::SetBrushWidth(width));
            }

            // Preview at UI scale, centred in a box sized for the largest brush
            let preview_box = MAX_BRUSH_WIDTH * crate::brush::PREVIEW_SCALE;
            let (rect, _) = ui.allocate_exact_size(vec2(preview_box, preview_box), Sense::hover());
            ui.painter()
                .circle_filled(rect.center(), brush.preview_diameter() / 2.0, brush.color);

            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = !app.engine().store().is_empty();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    commands.push(Command::UndoLast);
                }
                if ui.button("Color Picker").clicked() {
                    app.show_color_picker = !app.show_color_picker;
                }
            });

            ui.separator();

            ui.label(format!("Strokes: {}", app.engine().store().len()));
            ui.label(format!("State: {}", app.engine().state().name()));
            if let Some(active) = app.engine().active_stroke() {
                ui.label(format!("Points in stroke: {}", active.points().len()));
            }
            ui.label(format!("Input: {}", app.sampler.name()));
            ui.small("Arrow keys turn, WASD moves the camera.");
        });

    for command in commands {
        app.execute(command);
    }
}

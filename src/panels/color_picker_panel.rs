use egui::{Color32, Sense, vec2};

use crate::SketchApp;
use crate::color_picker::ScreenRectWidget;
use crate::command::Command;

const SWATCH_SIZE: egui::Vec2 = vec2(256.0, 128.0);

pub fn color_picker_panel(app: &mut SketchApp, ctx: &egui::Context) {
    if !app.show_color_picker {
        return;
    }

    let mut open = true;
    let mut picked = None;
    let texture = app.swatch_texture(ctx);

    egui::Window::new("Color Picker")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            let response = match &texture {
                Some(texture) => ui.add(
                    egui::Image::new(texture)
                        .fit_to_exact_size(SWATCH_SIZE)
                        .sense(Sense::click()),
                ),
                None => {
                    // Still clickable so the missing image is reported like any other pick
                    let (rect, response) = ui.allocate_exact_size(SWATCH_SIZE, Sense::click());
                    ui.painter().rect_filled(rect, 0.0, Color32::DARK_GRAY);
                    ui.label("No swatch image loaded");
                    response
                }
            };

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let widget = ScreenRectWidget::new(response.rect);
                    picked = Some(app.color_sampler.pick_swatch(pos, &widget, &app.swatch));
                }
            }

            if let Some(pick) = &app.last_pick {
                ui.horizontal(|ui| {
                    ui.label("Selected:");
                    let (rect, _) = ui.allocate_exact_size(vec2(16.0, 16.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, pick.color);
                });
                if let Some(diagnostic) = pick.diagnostic {
                    ui.colored_label(Color32::LIGHT_RED, diagnostic.to_string());
                }
            }
        });

    if let Some(pick) = picked {
        log::info!("Selected color: {:?}", pick.color);
        app.last_pick = Some(pick);
        app.execute(Command::SetBrushColor(pick.color));
    }
    app.show_color_picker = open;
}

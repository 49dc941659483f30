use egui::{Color32, Key, Sense};
use glam::Vec3;

use crate::SketchApp;

/// Camera speed in world units per second
const MOVE_SPEED: f32 = 0.5;
/// Camera turn rate in radians per second
const TURN_SPEED: f32 = 1.2;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::from_gray(20)))
        .show(ctx, |ui| {
            let canvas_rect = ui.available_rect_before_wrap();
            ui.allocate_rect(canvas_rect, Sense::hover());

            app.camera.viewport = canvas_rect;
            move_camera(app, ctx);

            app.sampler.set_canvas_rect(canvas_rect);
            let sample = app.sampler.sample(ctx);
            app.engine.step(sample.as_ref(), &app.camera);

            let painter = ui.painter_at(canvas_rect);
            app.renderer.render(
                &painter,
                &app.camera,
                app.engine.strokes(),
                app.engine.active_stroke(),
            );
        });
}

/// Moving the viewpoint mid-stroke is what gives strokes depth
fn move_camera(app: &mut SketchApp, ctx: &egui::Context) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let (dt, turn, step) = ctx.input(|i| {
        let axis = |neg: Key, pos: Key| i.key_down(pos) as i32 as f32 - i.key_down(neg) as i32 as f32;
        let turn = axis(Key::ArrowRight, Key::ArrowLeft);
        let step = Vec3::new(axis(Key::A, Key::D), 0.0, axis(Key::W, Key::S));
        (i.stable_dt, turn, step)
    });
    if turn != 0.0 {
        app.camera.yaw(turn * TURN_SPEED * dt);
    }
    if step != Vec3::ZERO {
        app.camera.move_local(step * MOVE_SPEED * dt);
    }
}

#![warn(clippy::all, rust_2018_idioms)]

use air_sketch::{AppConfig, SketchApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&path).unwrap_or_else(|e| {
            log::error!("Failed to load config {}: {}; using defaults", path, e);
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_title("Air Sketch"),
        ..Default::default()
    };
    eframe::run_native(
        "air_sketch",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}

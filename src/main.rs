//! Pixal
//!
//! A mood journal that turns how you feel into color and blends your
//! history into a gradient.

mod app;
mod color;
mod error;
mod gradient;
mod history;
mod journal;
mod mood;
mod sentiment;
mod settings;
mod store;
mod theme;
mod users;

use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([880.0, 760.0])
            .with_title("Pixal"),
        persist_window: true, // Persist window state between sessions
        ..Default::default()
    };

    eframe::run_native(
        "Pixal",
        options,
        Box::new(|cc| Ok(Box::new(app::PixalApp::new(cc)))),
    )
}

//! Theme and color constants for the Pixal window.
//!
//! Mood colors come from the palette; everything else on screen is
//! sourced from here.

use egui::Color32;

/// Background colors for different layers
pub mod bg {
    use super::*;

    /// Central panel background
    pub const PANEL: Color32 = Color32::from_rgb(20, 22, 28);

    /// Card/elevated surface backgrounds
    pub const SURFACE: Color32 = Color32::from_rgb(28, 30, 38);
}

/// Text colors at different emphasis levels
pub mod text {
    use super::*;

    pub const PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);

    /// Muted text for dates and hints
    pub const MUTED: Color32 = Color32::from_rgb(120, 125, 135);
}

/// Border colors
pub mod border {
    use super::*;

    /// Outline drawn around color swatches
    pub const SWATCH: Color32 = Color32::from_rgb(55, 58, 65);
}

/// Status message colors
pub mod state {
    use super::*;

    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);

    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);

    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);
}

/// Helper to create a stroke with consistent styling
pub fn stroke(color: Color32, width: f32) -> egui::Stroke {
    egui::Stroke::new(width, color)
}

/// Paint a rounded color swatch of the given size.
pub fn swatch(ui: &mut egui::Ui, color: Color32, size: egui::Vec2) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect(rect, 4.0, color, stroke(border::SWATCH, 1.0));
    response
}

pub mod animator;
pub mod chrome;
pub mod cube_field;
pub mod scene;
pub mod slide;

use eframe::egui;

/// Slides are laid out for 1920x1080 and scaled to fit the window.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

use std::time::{Duration, Instant};

use eframe::egui::{self, Color32};

/// Camera positions visited cyclically, one per slide.
pub const CAMERA_POSES: [CameraPose; 4] = [
    CameraPose::new(0.0, 0.0, 30.0),
    CameraPose::new(10.0, 5.0, 20.0),
    CameraPose::new(-10.0, -5.0, 25.0),
    CameraPose::new(0.0, 10.0, 40.0),
];

/// Cube colours visited cyclically, one per slide.
pub const PALETTE: [Color32; 5] = [
    Color32::from_rgb(0x38, 0xBD, 0xF8),
    Color32::from_rgb(0xFB, 0xBF, 0x24),
    Color32::from_rgb(0xA8, 0x55, 0xF7),
    Color32::from_rgb(0x22, 0xC5, 0x5E),
    Color32::from_rgb(0xEF, 0x44, 0x44),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraPose {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn for_slide(index: usize) -> Self {
        CAMERA_POSES[index % CAMERA_POSES.len()]
    }
}

pub fn palette_index_for_slide(index: usize) -> usize {
    index % PALETTE.len()
}

/// Background scene driven by slide changes. It runs its own per-frame loop
/// (`step` + `paint`) independent of slide transitions.
pub trait SceneRenderer {
    fn set_camera_pose(&mut self, pose: CameraPose, duration: Duration, now: Instant);

    fn set_palette(&mut self, color_index: usize, duration: Duration, now: Instant);

    /// Pointer offset from the viewport centre, in points.
    fn set_pointer(&mut self, _offset: egui::Vec2) {}

    fn step(&mut self, _now: Instant) {}

    fn paint(&self, _painter: &egui::Painter, _rect: egui::Rect) {}

    /// Whether the scene needs a repaint every frame.
    fn is_live(&self) -> bool {
        false
    }
}

/// Used when the background is disabled.
#[derive(Debug, Default)]
pub struct NullScene;

impl SceneRenderer for NullScene {
    fn set_camera_pose(&mut self, _pose: CameraPose, _duration: Duration, _now: Instant) {}

    fn set_palette(&mut self, _color_index: usize, _duration: Duration, _now: Instant) {}
}

//! The animated background: a cloud of wireframe cubes with connecting lines,
//! seen through a perspective camera that glides between per-slide poses.

use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, Pos2, Stroke};
use rand::Rng;

use super::animator::{Easing, lerp_f32};
use super::scene::{CAMERA_POSES, CameraPose, PALETTE, SceneRenderer};

const CUBE_COUNT: usize = 150;
const CUBE_SIZE: f32 = 0.5;
const CUBE_OPACITY: f32 = 0.3;
/// Only the first cubes are considered for connecting lines
const LINK_LIMIT: usize = 40;
const LINK_DISTANCE: f32 = 8.0;
const LINK_COLOR: Color32 = Color32::from_rgb(0xFB, 0xBF, 0x24);
const LINK_OPACITY: f32 = 0.15;
const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
const FOG_DENSITY: f32 = 0.03;
/// Per-frame motion constants are tuned for this rate
const REFERENCE_FPS: f32 = 60.0;
const MAX_STEP: Duration = Duration::from_millis(100);
/// Pointer offset in points to the units the group rotation follows
const POINTER_SCALE: f32 = 0.05;
/// Radians of group rotation per scaled pointer unit
const POINTER_ROTATION: f32 = 0.001;

type Vec3 = [f32; 3];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 3),
    (3, 2),
    (2, 0),
    (4, 5),
    (5, 7),
    (7, 6),
    (6, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

struct Cube {
    position: Vec3,
    /// Rotation around x and y, radians
    rotation: [f32; 2],
    spin: f32,
}

/// A value gliding from one vector to another over a fixed duration.
#[derive(Debug, Clone, Copy)]
struct Track {
    from: Vec3,
    to: Vec3,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl Track {
    fn fixed(value: Vec3, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    fn value(&self, now: Instant) -> Vec3 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = self
            .easing
            .apply(elapsed.as_secs_f32() / self.duration.as_secs_f32());
        [
            lerp_f32(self.from[0], self.to[0], t),
            lerp_f32(self.from[1], self.to[1], t),
            lerp_f32(self.from[2], self.to[2], t),
        ]
    }

    fn retarget(&mut self, to: Vec3, duration: Duration, easing: Easing, now: Instant) {
        self.from = self.value(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
        self.easing = easing;
    }
}

pub struct CubeField {
    cubes: Vec<Cube>,
    /// Whole-cloud rotation around x and y
    group_rotation: [f32; 2],
    pointer: egui::Vec2,
    camera: Track,
    color: Track,
    camera_position: Vec3,
    current_color: Vec3,
    links: Vec<(usize, usize)>,
    started: Instant,
    last_step: Option<Instant>,
    time: f32,
}

impl CubeField {
    pub fn new(now: Instant) -> Self {
        Self::with_rng(&mut rand::thread_rng(), now)
    }

    pub fn with_rng(rng: &mut impl Rng, now: Instant) -> Self {
        let cubes = (0..CUBE_COUNT)
            .map(|_| Cube {
                position: [
                    (rng.r#gen::<f32>() - 0.5) * 60.0,
                    (rng.r#gen::<f32>() - 0.5) * 40.0,
                    (rng.r#gen::<f32>() - 0.5) * 30.0,
                ],
                rotation: [
                    rng.r#gen::<f32>() * std::f32::consts::PI,
                    rng.r#gen::<f32>() * std::f32::consts::PI,
                ],
                spin: (rng.r#gen::<f32>() - 0.5) * 0.02,
            })
            .collect();

        let start_pose = CAMERA_POSES[0];
        let camera_position = [start_pose.x, start_pose.y, start_pose.z];
        let current_color = color_to_vec(PALETTE[0]);
        let mut field = Self {
            cubes,
            group_rotation: [0.0, 0.0],
            pointer: egui::Vec2::ZERO,
            camera: Track::fixed(camera_position, now),
            color: Track::fixed(current_color, now),
            camera_position,
            current_color,
            links: Vec::new(),
            started: now,
            last_step: None,
            time: 0.0,
        };
        field.update_links();
        field
    }

    #[cfg(test)]
    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn color(&self) -> Color32 {
        Color32::from_rgb(
            (self.current_color[0] * 255.0).round() as u8,
            (self.current_color[1] * 255.0).round() as u8,
            (self.current_color[2] * 255.0).round() as u8,
        )
    }

    #[cfg(test)]
    pub fn links(&self) -> &[(usize, usize)] {
        &self.links
    }

    fn update_links(&mut self) {
        self.links.clear();
        let limit = LINK_LIMIT.min(self.cubes.len());
        for i in 0..limit {
            for j in (i + 1)..limit {
                if distance(self.cubes[i].position, self.cubes[j].position) < LINK_DISTANCE {
                    self.links.push((i, j));
                }
            }
        }
    }

    fn focal_length(rect: egui::Rect) -> f32 {
        (rect.height() / 2.0) / (FOV_DEGREES.to_radians() / 2.0).tan()
    }

    /// Project a world-space point. Returns the screen position and the depth
    /// in front of the camera, or `None` when behind the near plane.
    fn project(&self, point: Vec3, rect: egui::Rect) -> Option<(Pos2, f32)> {
        let rotated = rotate(point, self.group_rotation);
        let cam = self.camera_position;
        let view = [rotated[0] - cam[0], rotated[1] - cam[1], rotated[2] - cam[2]];
        let depth = -view[2];
        if depth <= NEAR {
            return None;
        }
        let f = Self::focal_length(rect);
        Some((
            egui::pos2(
                rect.center().x + view[0] / depth * f,
                rect.center().y - view[1] / depth * f,
            ),
            depth,
        ))
    }

    fn cube_scale(&self, index: usize) -> f32 {
        1.0 + (self.time * 2.0 + index as f32).sin() * 0.3
    }
}

impl SceneRenderer for CubeField {
    fn set_camera_pose(&mut self, pose: CameraPose, duration: Duration, now: Instant) {
        self.camera.retarget(
            [pose.x, pose.y, pose.z],
            duration,
            Easing::Power2InOut,
            now,
        );
    }

    fn set_palette(&mut self, color_index: usize, duration: Duration, now: Instant) {
        let color = PALETTE[color_index % PALETTE.len()];
        self.color
            .retarget(color_to_vec(color), duration, Easing::Power1Out, now);
    }

    fn set_pointer(&mut self, offset: egui::Vec2) {
        self.pointer = offset * POINTER_SCALE;
    }

    fn step(&mut self, now: Instant) {
        let dt = self
            .last_step
            .map(|last| now.saturating_duration_since(last).min(MAX_STEP))
            .unwrap_or(Duration::ZERO);
        self.last_step = Some(now);
        let frames = dt.as_secs_f32() * REFERENCE_FPS;
        self.time = now.saturating_duration_since(self.started).as_secs_f32();

        // Auto rotation, easing toward the pointer
        let follow = (0.05 * frames).min(1.0);
        self.group_rotation[1] += 0.002 * frames;
        self.group_rotation[0] += (self.pointer.y * POINTER_ROTATION - self.group_rotation[0]) * follow;
        self.group_rotation[1] += (self.pointer.x * POINTER_ROTATION - self.group_rotation[1]) * follow;

        let time = self.time;
        for (i, cube) in self.cubes.iter_mut().enumerate() {
            cube.rotation[0] += cube.spin * frames;
            cube.rotation[1] += cube.spin * frames;
            cube.position[1] += (time + i as f32).sin() * 0.01 * frames;
        }

        self.camera_position = self.camera.value(now);
        self.current_color = self.color.value(now);
        self.update_links();
    }

    fn paint(&self, painter: &egui::Painter, rect: egui::Rect) {
        let color = self.color();

        for (i, cube) in self.cubes.iter().enumerate() {
            let half = CUBE_SIZE * self.cube_scale(i) / 2.0;
            let mut corners = [Pos2::ZERO; 8];
            let mut nearest = f32::MAX;
            let mut visible = true;
            for (c, corner) in corners.iter_mut().enumerate() {
                let local = [
                    if c & 1 == 0 { -half } else { half },
                    if c & 2 == 0 { -half } else { half },
                    if c & 4 == 0 { -half } else { half },
                ];
                let spun = rotate(local, cube.rotation);
                let world = [
                    spun[0] + cube.position[0],
                    spun[1] + cube.position[1],
                    spun[2] + cube.position[2],
                ];
                match self.project(world, rect) {
                    Some((pos, depth)) => {
                        *corner = pos;
                        nearest = nearest.min(depth);
                    }
                    None => {
                        visible = false;
                        break;
                    }
                }
            }
            if !visible {
                continue;
            }

            let alpha = CUBE_OPACITY * fog(nearest);
            let stroke = Stroke::new(1.0, with_alpha(color, alpha));
            for (a, b) in CUBE_EDGES {
                painter.line_segment([corners[a], corners[b]], stroke);
            }
        }

        for &(i, j) in &self.links {
            let (Some((a, da)), Some((b, db))) = (
                self.project(self.cubes[i].position, rect),
                self.project(self.cubes[j].position, rect),
            ) else {
                continue;
            };
            let alpha = LINK_OPACITY * fog(da.min(db));
            painter.line_segment([a, b], Stroke::new(1.0, with_alpha(LINK_COLOR, alpha)));
        }
    }

    fn is_live(&self) -> bool {
        true
    }
}

/// Rotate around x, then y (matches an XYZ Euler order with z = 0).
fn rotate(p: Vec3, rotation: [f32; 2]) -> Vec3 {
    let (sy, cy) = rotation[1].sin_cos();
    let y_rotated = [p[0] * cy + p[2] * sy, p[1], -p[0] * sy + p[2] * cy];
    let (sx, cx) = rotation[0].sin_cos();
    [
        y_rotated[0],
        y_rotated[1] * cx - y_rotated[2] * sx,
        y_rotated[1] * sx + y_rotated[2] * cx,
    ]
}

fn distance(a: Vec3, b: Vec3) -> f32 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
}

/// Exponential-squared fog factor (1 = no fog)
fn fog(depth: f32) -> f32 {
    (-(FOG_DENSITY * depth).powi(2)).exp()
}

fn color_to_vec(color: Color32) -> Vec3 {
    [
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    ]
}

fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn field(now: Instant) -> CubeField {
        CubeField::with_rng(&mut StdRng::seed_from_u64(7), now)
    }

    #[test]
    fn test_starts_at_first_pose_and_colour() {
        let now = Instant::now();
        let field = field(now);
        assert_eq!(field.camera_position(), [0.0, 0.0, 30.0]);
        assert_eq!(field.color(), PALETTE[0]);
        assert_eq!(field.cubes.len(), CUBE_COUNT);
    }

    #[test]
    fn test_camera_glides_to_pose() {
        let now = Instant::now();
        let mut field = field(now);
        field.set_camera_pose(CameraPose::new(10.0, 5.0, 20.0), Duration::from_millis(1500), now);

        field.step(now + Duration::from_millis(750));
        let mid = field.camera_position();
        assert!(mid[0] > 0.0 && mid[0] < 10.0, "mid x = {}", mid[0]);

        field.step(now + Duration::from_millis(1500));
        assert_eq!(field.camera_position(), [10.0, 5.0, 20.0]);
    }

    #[test]
    fn test_group_tilt_settles_on_scaled_pointer() {
        let start = Instant::now();
        let mut field = field(start);
        field.set_pointer(egui::vec2(0.0, 400.0));

        let mut now = start;
        for _ in 0..600 {
            now += Duration::from_millis(16);
            field.step(now);
        }
        let tilt = field.group_rotation[0];
        assert!((tilt - 0.02).abs() < 1e-4, "tilt = {tilt}");
    }

    #[test]
    fn test_zero_duration_changes_apply_on_next_step() {
        let now = Instant::now();
        let mut field = field(now);
        field.set_camera_pose(CAMERA_POSES[3], Duration::ZERO, now);
        field.set_palette(4, Duration::ZERO, now);
        field.step(now);
        assert_eq!(field.camera_position(), [0.0, 10.0, 40.0]);
        assert_eq!(field.color(), PALETTE[4]);
    }

    #[test]
    fn test_links_respect_limit_and_distance() {
        let now = Instant::now();
        let field = field(now);
        for &(i, j) in field.links() {
            assert!(i < j && j < LINK_LIMIT);
            assert!(distance(field.cubes[i].position, field.cubes[j].position) < LINK_DISTANCE);
        }
    }

    #[test]
    fn test_points_behind_camera_are_not_projected() {
        let now = Instant::now();
        let field = field(now);
        let rect = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert!(field.project([0.0, 0.0, 40.0], rect).is_none());
        let (center, depth) = field.project([0.0, 0.0, 0.0], rect).unwrap();
        assert!((depth - 30.0).abs() < 1e-4);
        assert!((center.x - 960.0).abs() < 1e-3);
        assert!((center.y - 540.0).abs() < 1e-3);
    }
}

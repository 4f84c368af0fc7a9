use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Scene-level pointer input, already detached from any windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a screen position.
    Down { x: f32, y: f32 },
    /// Pointer moved to a screen position.
    Move { x: f32, y: f32 },
    /// Primary button released.
    Up,
    /// Pointer left the view.
    Leave,
    /// Wheel scrolled; positive `delta_y` is scrolling down, which zooms out.
    Wheel { delta_y: f32 },
}

/// Anything that can steer the 3D view from pointer input. The scene panel
/// only talks to this trait, so the orbit camera can be swapped out.
pub trait CameraControl {
    fn handle(&mut self, event: PointerEvent);
    fn view_projection(&self, aspect: f32) -> Mat4;
}

/// Orbital camera that revolves around a target point.
///
/// The camera position is derived from spherical coordinates (azimuth,
/// elevation, distance) relative to `target`.
#[derive(Debug, Clone)]
pub struct OrbitalCamera {
    /// The world-space point the camera orbits around.
    pub target: Vec3,
    /// Distance from the target along the viewing ray.
    pub distance: f32,
    /// Horizontal angle in radians (rotation around the world Y axis).
    pub azimuth: f32,
    /// Vertical angle in radians, clamped to [-PI/3, PI/3].
    pub elevation: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Last pointer position while the primary button is held.
    drag_from: Option<Vec2>,
}

impl Default for OrbitalCamera {
    fn default() -> Self {
        Self {
            target: Vec3::new(0.0, 100.0, 0.0),
            distance: 300.0,
            azimuth: PI / 4.0,
            elevation: 0.28,
            fov_y: PI / 4.0,
            drag_from: None,
        }
    }
}

/// Radians of rotation per pixel of drag.
const ROTATE_SPEED: f32 = 0.005;
const ELEVATION_MIN: f32 = -PI / 3.0;
const ELEVATION_MAX: f32 = PI / 3.0;

/// Distance change per wheel notch.
const ZOOM_STEP: f32 = 10.0;
/// Zoom requests that would leave the open range (min, max) are ignored.
const DISTANCE_MIN: f32 = 150.0;
const DISTANCE_MAX: f32 = 500.0;

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

impl OrbitalCamera {
    /// Compute the camera's world-space position from the spherical
    /// coordinates (azimuth, elevation, distance) relative to `target`.
    pub fn position(&self) -> Vec3 {
        let cos_elev = self.elevation.cos();
        let sin_elev = self.elevation.sin();
        let cos_az = self.azimuth.cos();
        let sin_az = self.azimuth.sin();

        let offset = Vec3::new(cos_elev * sin_az, sin_elev, cos_elev * cos_az) * self.distance;

        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, NEAR, FAR)
    }

    /// Rotate the camera by the given angle deltas (radians).
    pub fn rotate(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth += delta_azimuth;
        self.elevation = (self.elevation + delta_elevation).clamp(ELEVATION_MIN, ELEVATION_MAX);
    }

    /// Step the orbit distance in or out by one notch. Steps that would leave
    /// the allowed range are dropped rather than clamped.
    pub fn zoom_step(&mut self, outward: bool) {
        let next = self.distance + if outward { ZOOM_STEP } else { -ZOOM_STEP };
        if next > DISTANCE_MIN && next < DISTANCE_MAX {
            self.distance = next;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    /// Reset the camera to its default state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CameraControl for OrbitalCamera {
    fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.drag_from = Some(Vec2::new(x, y)),
            PointerEvent::Move { x, y } => {
                if let Some(from) = self.drag_from {
                    let to = Vec2::new(x, y);
                    let delta = to - from;
                    self.rotate(delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
                    self.drag_from = Some(to);
                }
            }
            PointerEvent::Up | PointerEvent::Leave => self.drag_from = None,
            PointerEvent::Wheel { delta_y } => {
                if delta_y != 0.0 {
                    self.zoom_step(delta_y > 0.0);
                }
            }
        }
    }

    fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

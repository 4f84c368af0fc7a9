use egui::Color32;
use glam::Vec3;

use crate::plot3d::projector::{SceneCoordinate, HEAD_CLEARANCE, PLATFORM_OFFSET};

/// Receiver of per-sample head updates.
pub trait SceneSink {
    fn set_head_position(&mut self, position: SceneCoordinate);
}

/// Axis-aligned box in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub center: Vec3,
    pub size: Vec3,
    pub color: Color32,
}

impl SceneBox {
    pub const fn new(center: Vec3, size: Vec3, color: Color32) -> Self {
        Self { center, size, color }
    }

    /// The 8 corners, bottom face first.
    pub fn corners(&self) -> [Vec3; 8] {
        let h = self.size * 0.5;
        let c = self.center;
        [
            c + Vec3::new(-h.x, -h.y, -h.z),
            c + Vec3::new(h.x, -h.y, -h.z),
            c + Vec3::new(h.x, -h.y, h.z),
            c + Vec3::new(-h.x, -h.y, h.z),
            c + Vec3::new(-h.x, h.y, -h.z),
            c + Vec3::new(h.x, h.y, -h.z),
            c + Vec3::new(h.x, h.y, h.z),
            c + Vec3::new(-h.x, h.y, h.z),
        ]
    }

    /// The 12 edges as corner index pairs into [`Self::corners`].
    pub const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
}

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
const FRAME_COLOR: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
const PLATE_COLOR: Color32 = Color32::from_rgb(0x66, 0x7e, 0xea);
const TOWER_COLOR: Color32 = Color32::from_rgb(0x34, 0x49, 0x5e);
const RAIL_COLOR: Color32 = Color32::from_rgb(0x95, 0xa5, 0xa6);
const HEAD_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const NOZZLE_COLOR: Color32 = Color32::from_rgb(0xc0, 0x39, 0x2b);
const FAN_COLOR: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub const GRID_MAJOR: Color32 = Color32::from_rgb(0x66, 0x7e, 0xea);
pub const GRID_MINOR: Color32 = Color32::from_rgb(0x44, 0x44, 0x44);

/// Reference grid drawn on the build plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub height: f32,
}

/// Static printer frame plus the moving extruder head.
///
/// Only the head moves; the frame is built once.
#[derive(Debug, Clone)]
pub struct PrinterScene {
    frame: Vec<SceneBox>,
    pub grid: GridHelper,
    /// Length of the X/Y/Z axis gizmo.
    pub axes_length: f32,
    pub axes_height: f32,
    head: SceneCoordinate,
}

impl PrinterScene {
    pub fn new() -> Self {
        let mut frame = vec![
            SceneBox::new(Vec3::new(0.0, -5.0, 0.0), Vec3::new(220.0, 10.0, 220.0), FRAME_COLOR),
            SceneBox::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(200.0, 3.0, 200.0), PLATE_COLOR),
        ];

        for (x, z) in [(-100.0, -100.0), (100.0, -100.0), (-100.0, 100.0), (100.0, 100.0)] {
            frame.push(SceneBox::new(
                Vec3::new(x, 110.0, z),
                Vec3::new(8.0, 220.0, 8.0),
                TOWER_COLOR,
            ));
        }

        let along_x = Vec3::new(220.0, 6.0, 6.0);
        let along_z = Vec3::new(6.0, 6.0, 220.0);
        frame.push(SceneBox::new(Vec3::new(0.0, 220.0, -100.0), along_x, RAIL_COLOR));
        frame.push(SceneBox::new(Vec3::new(0.0, 220.0, 100.0), along_x, RAIL_COLOR));
        frame.push(SceneBox::new(Vec3::new(-100.0, 220.0, 0.0), along_z, RAIL_COLOR));
        frame.push(SceneBox::new(Vec3::new(100.0, 220.0, 0.0), along_z, RAIL_COLOR));

        Self {
            frame,
            grid: GridHelper {
                size: 200.0,
                divisions: 20,
                height: PLATFORM_OFFSET as f32,
            },
            axes_length: 120.0,
            axes_height: 4.0,
            head: SceneCoordinate {
                x: 0.0,
                y: 100.0,
                z: 0.0,
            },
        }
    }

    pub fn frame(&self) -> &[SceneBox] {
        &self.frame
    }

    pub fn head_position(&self) -> SceneCoordinate {
        self.head
    }

    /// Boxes making up the extruder head, placed at the current head position.
    pub fn head_parts(&self) -> [SceneBox; 3] {
        let origin = self.head.to_vec3();
        let body_h = 2.0 * HEAD_CLEARANCE as f32;
        [
            SceneBox::new(
                origin + Vec3::new(0.0, body_h / 2.0, 0.0),
                Vec3::new(20.0, body_h, 20.0),
                HEAD_COLOR,
            ),
            SceneBox::new(
                origin + Vec3::new(0.0, -7.0, 0.0),
                Vec3::new(6.0, 15.0, 6.0),
                NOZZLE_COLOR,
            ),
            SceneBox::new(
                origin + Vec3::new(12.0, body_h / 2.0, 0.0),
                Vec3::new(3.0, 16.0, 16.0),
                FAN_COLOR,
            ),
        ]
    }

    /// Nozzle tip, where the head meets the print.
    pub fn nozzle_tip(&self) -> Vec3 {
        self.head.to_vec3() - Vec3::new(0.0, HEAD_CLEARANCE as f32, 0.0)
    }
}

impl Default for PrinterScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSink for PrinterScene {
    fn set_head_position(&mut self, position: SceneCoordinate) {
        self.head = position;
    }
}

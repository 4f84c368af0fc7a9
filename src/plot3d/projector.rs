use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Height of the build plate's top surface above the scene origin.
pub const PLATFORM_OFFSET: f64 = 3.5;
/// Distance from the head object's origin down to the nozzle tip.
pub const HEAD_CLEARANCE: f64 = 15.0;

/// Travel limits of the printer in device millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceBounds {
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

impl Default for WorkspaceBounds {
    fn default() -> Self {
        Self {
            max_x: 200.0,
            max_y: 200.0,
            max_z: 200.0,
        }
    }
}

/// Position in the 3D view's coordinate space (Y up, origin at plate centre).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SceneCoordinate {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

/// Map a device position onto the scene.
///
/// X and Y are centred on the plate. Device Y becomes scene depth (Z) and
/// device Z becomes height above the plate. Out-of-range input is passed
/// through unclamped.
pub fn project(x: f64, y: f64, z: f64, bounds: &WorkspaceBounds) -> SceneCoordinate {
    SceneCoordinate {
        x: x - bounds.max_x / 2.0,
        y: PLATFORM_OFFSET + HEAD_CLEARANCE + z,
        z: y - bounds.max_y / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_centre_maps_to_origin() {
        let bounds = WorkspaceBounds::default();
        let p = project(100.0, 100.0, 0.0, &bounds);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
        assert_eq!(p.y, PLATFORM_OFFSET + HEAD_CLEARANCE);
    }

    #[test]
    fn device_y_becomes_scene_depth() {
        let bounds = WorkspaceBounds {
            max_x: 300.0,
            max_y: 250.0,
            max_z: 400.0,
        };
        let p = project(20.0, 30.0, 10.0, &bounds);
        assert_eq!(
            p,
            SceneCoordinate {
                x: -130.0,
                y: 28.5,
                z: -95.0
            }
        );
    }

    #[test]
    fn projection_is_deterministic_and_unclamped() {
        let bounds = WorkspaceBounds::default();
        let a = project(-50.0, 999.0, 1e4, &bounds);
        let b = project(-50.0, 999.0, 1e4, &bounds);
        assert_eq!(a, b);
        assert_eq!(a.x, -150.0);
        assert_eq!(a.z, 899.0);
        assert_eq!(a.y, 18.5 + 1e4);
    }
}

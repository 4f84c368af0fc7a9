use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3, Vec4};

use crate::plot3d::camera::CameraControl;
use crate::plot3d::scene::{PrinterScene, SceneBox, BACKGROUND, GRID_MAJOR, GRID_MINOR};

/// Segments whose clip-space w falls below this are behind the camera.
const MIN_CLIP_W: f32 = 1e-3;

/// World → screen mapping for one frame of the 3D view.
pub struct ScreenProjection {
    view_proj: Mat4,
    rect: Rect,
}

impl ScreenProjection {
    pub fn new(camera: &dyn CameraControl, rect: Rect) -> Self {
        let aspect = (rect.width() / rect.height().max(1.0)).max(1e-3);
        Self {
            view_proj: camera.view_projection(aspect),
            rect,
        }
    }

    fn clip(&self, p: Vec3) -> Vec4 {
        self.view_proj * p.extend(1.0)
    }

    fn to_screen(&self, clip: Vec4) -> Pos2 {
        let ndc = clip.truncate() / clip.w;
        Pos2::new(
            self.rect.left() + (ndc.x * 0.5 + 0.5) * self.rect.width(),
            self.rect.top() + (0.5 - ndc.y * 0.5) * self.rect.height(),
        )
    }

    /// Project a point, or `None` if it lies behind the camera.
    pub fn point(&self, p: Vec3) -> Option<Pos2> {
        let c = self.clip(p);
        (c.w > MIN_CLIP_W).then(|| self.to_screen(c))
    }

    /// Project a segment, trimming whatever part lies behind the camera.
    pub fn segment(&self, a: Vec3, b: Vec3) -> Option<[Pos2; 2]> {
        let mut ca = self.clip(a);
        let mut cb = self.clip(b);
        match (ca.w > MIN_CLIP_W, cb.w > MIN_CLIP_W) {
            (false, false) => return None,
            (true, false) => cb = ca + (cb - ca) * ((ca.w - MIN_CLIP_W) / (ca.w - cb.w)),
            (false, true) => ca = cb + (ca - cb) * ((cb.w - MIN_CLIP_W) / (cb.w - ca.w)),
            (true, true) => {}
        }
        Some([self.to_screen(ca), self.to_screen(cb)])
    }
}

/// Draw the printer rig as a wireframe into `rect`.
pub fn paint_scene(
    painter: &Painter,
    rect: Rect,
    scene: &PrinterScene,
    camera: &dyn CameraControl,
) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
    let projection = ScreenProjection::new(camera, rect);
    let painter = painter.with_clip_rect(rect);

    paint_grid(&painter, &projection, scene);

    for b in scene.frame() {
        paint_box(&painter, &projection, b, 1.0);
    }

    paint_axes(&painter, &projection, scene);

    for b in &scene.head_parts() {
        paint_box(&painter, &projection, b, 1.5);
    }

    if let Some(tip) = projection.point(scene.nozzle_tip()) {
        painter.circle_filled(tip, 3.0, Color32::from_rgb(0xff, 0xd1, 0x66));
    }
}

fn paint_box(painter: &Painter, projection: &ScreenProjection, b: &SceneBox, width: f32) {
    let corners = b.corners();
    let stroke = Stroke::new(width, b.color);
    for (i, j) in SceneBox::EDGES {
        if let Some(seg) = projection.segment(corners[i], corners[j]) {
            painter.line_segment(seg, stroke);
        }
    }
}

fn paint_grid(painter: &Painter, projection: &ScreenProjection, scene: &PrinterScene) {
    let grid = scene.grid;
    let half = grid.size / 2.0;
    let step = grid.size / grid.divisions as f32;

    for i in 0..=grid.divisions {
        let t = -half + step * i as f32;
        let color = if i * 2 == grid.divisions { GRID_MAJOR } else { GRID_MINOR };
        let stroke = Stroke::new(1.0, color);
        let lines = [
            (Vec3::new(t, grid.height, -half), Vec3::new(t, grid.height, half)),
            (Vec3::new(-half, grid.height, t), Vec3::new(half, grid.height, t)),
        ];
        for (a, b) in lines {
            if let Some(seg) = projection.segment(a, b) {
                painter.line_segment(seg, stroke);
            }
        }
    }
}

fn paint_axes(painter: &Painter, projection: &ScreenProjection, scene: &PrinterScene) {
    let origin = Vec3::new(0.0, scene.axes_height, 0.0);
    let axes = [
        (Vec3::X, Color32::from_rgb(0xff, 0x40, 0x40), "X"),
        (Vec3::Y, Color32::from_rgb(0x40, 0xff, 0x40), "Z"),
        (Vec3::Z, Color32::from_rgb(0x40, 0x80, 0xff), "Y"),
    ];
    for (dir, color, label) in axes {
        let end = origin + dir * scene.axes_length;
        if let Some(seg) = projection.segment(origin, end) {
            painter.line_segment(seg, Stroke::new(2.0, color));
        }
        // Labelled with the device axis each scene axis carries.
        if let Some(pos) = projection.point(end) {
            painter.text(pos, Align2::LEFT_BOTTOM, label, FontId::proportional(11.0), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot3d::camera::OrbitalCamera;

    fn projection() -> ScreenProjection {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), egui::vec2(600.0, 400.0));
        ScreenProjection::new(&OrbitalCamera::default(), rect)
    }

    #[test]
    fn orbit_target_lands_mid_rect() {
        let p = projection().point(Vec3::new(0.0, 100.0, 0.0)).unwrap();
        assert!((p.x - 310.0).abs() < 0.01);
        assert!((p.y - 220.0).abs() < 0.01);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        let cam = OrbitalCamera::default();
        let behind = cam.position() + (cam.position() - cam.target);
        assert!(projection().point(behind).is_none());
        assert!(projection().segment(behind, behind * 1.1).is_none());
        assert!(projection().segment(behind, cam.target).is_some());
    }

    #[test]
    fn higher_points_draw_higher_on_screen() {
        let p = projection();
        let low = p.point(Vec3::new(0.0, 10.0, 0.0)).unwrap();
        let high = p.point(Vec3::new(0.0, 200.0, 0.0)).unwrap();
        assert!(high.y < low.y);
    }
}

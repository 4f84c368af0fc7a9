use egui::{PointerButton, Response, Sense};

use crate::plot3d::camera::{CameraControl, PointerEvent};
use crate::plot3d::renderer::paint_scene;
use crate::plot3d::scene::PrinterScene;
use crate::state::theme::Theme;

const SCENE_HEIGHT: f32 = 300.0;

/// Wireframe printer with an orbit camera steered by the mouse.
pub fn show_scene_panel(
    ui: &mut egui::Ui,
    scene: &PrinterScene,
    camera: &mut dyn CameraControl,
    theme: Theme,
) {
    super::card(ui, theme, "Print head position", |ui| {
        let size = egui::vec2(ui.available_width(), SCENE_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let scroll_y = if response.hovered() {
            ui.input(|i| i.raw_scroll_delta.y)
        } else {
            0.0
        };
        for event in pointer_events(&response, scroll_y) {
            camera.handle(event);
        }

        paint_scene(ui.painter(), rect, scene, camera);
        ui.weak("Drag to orbit, scroll to zoom");
    });
}

/// Translate this frame's egui interaction into camera input.
fn pointer_events(response: &Response, scroll_y: f32) -> Vec<PointerEvent> {
    let mut events = Vec::new();

    if response.drag_started_by(PointerButton::Primary) {
        if let Some(p) = response.interact_pointer_pos() {
            events.push(PointerEvent::Down { x: p.x, y: p.y });
        }
    } else if response.dragged_by(PointerButton::Primary) {
        if !response.contains_pointer() {
            events.push(PointerEvent::Leave);
        } else if let Some(p) = response.interact_pointer_pos() {
            events.push(PointerEvent::Move { x: p.x, y: p.y });
        }
    }
    if response.drag_stopped() {
        events.push(PointerEvent::Up);
    }
    events.extend(wheel_event(scroll_y));

    events
}

/// egui scrolls positive upward; the camera expects positive to zoom out.
fn wheel_event(scroll_y: f32) -> Option<PointerEvent> {
    (scroll_y != 0.0).then_some(PointerEvent::Wheel { delta_y: -scroll_y })
}

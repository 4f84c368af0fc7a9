use std::sync::mpsc::{self, Receiver};

use crate::config::{DashboardConfig, GaugeScales};
use crate::controller::{IngestionController, Outputs};
use crate::plot3d::camera::OrbitalCamera;
use crate::plot3d::scene::PrinterScene;
use crate::render::canvas::{DisplayList, Extent};
use crate::state::panel::PanelModel;
use crate::state::theme::Theme;
use crate::transport::{self, TransportEvent};
use crate::ui::header::HeaderAction;
use crate::ui::{chart_panel, gauges, header, log_panel, scene_panel};

/// The dashboard window. All ingestion happens here on the UI thread; the
/// transport thread only hands over events.
pub struct PrintMonApp {
    controller: IngestionController,
    panel: PanelModel,
    scene: PrinterScene,
    chart: DisplayList,
    camera: OrbitalCamera,
    events: Receiver<TransportEvent>,
    theme: Theme,
    gauges: GaugeScales,
}

impl PrintMonApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(15.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::proportional(22.0),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::monospace(13.0),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.visuals.window_corner_radius = egui::CornerRadius::same(8);
        ctx.set_style(style);
        ctx.set_visuals(config.theme.visuals());

        let (tx, rx) = mpsc::channel();
        let repaint = cc.egui_ctx.clone();
        if let Err(e) = transport::spawn(
            config.transport.clone(),
            tx,
            Box::new(move || repaint.request_repaint()),
        ) {
            tracing::error!("Failed to start transport thread: {e}");
        }

        Self::with_receiver(&config, rx)
    }

    /// Build the app around an existing event channel, without a transport.
    pub fn with_receiver(config: &DashboardConfig, events: Receiver<TransportEvent>) -> Self {
        Self {
            controller: IngestionController::new(config),
            panel: PanelModel::new(config.log_capacity),
            scene: PrinterScene::new(),
            chart: DisplayList::new(Extent::new(0.0, 0.0)),
            camera: OrbitalCamera::default(),
            events,
            theme: config.theme,
            gauges: config.gauges,
        }
    }

    /// Handle every event queued since the last frame, in order.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            let mut out = Outputs {
                view: &mut self.panel,
                scene: &mut self.scene,
                chart: &mut self.chart,
            };
            let outcome = self.controller.handle_event(event, &mut out);
            tracing::trace!("Event handled: {outcome:?}");
            handled += 1;
        }
        handled
    }

    pub fn panel(&self) -> &PanelModel {
        &self.panel
    }

    pub fn scene(&self) -> &PrinterScene {
        &self.scene
    }

    pub fn controller(&self) -> &IngestionController {
        &self.controller
    }
}

impl eframe::App for PrintMonApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let Self {
            controller,
            panel,
            scene,
            chart,
            camera,
            theme,
            gauges,
            ..
        } = self;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            match header::show_header(ui, panel, *theme) {
                HeaderAction::ToggleTheme => {
                    *theme = theme.toggle();
                    ctx.set_visuals(theme.visuals());
                }
                HeaderAction::ResetCamera => camera.reset(),
                HeaderAction::None => {}
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                gauges::show_gauges(ui, panel, gauges, *theme);
                ui.add_space(8.0);

                ui.columns(2, |cols| {
                    chart_panel::show_chart_panel(&mut cols[0], chart, panel.stats, *theme, |list| {
                        controller.redraw_chart(list)
                    });
                    scene_panel::show_scene_panel(&mut cols[1], scene, camera, *theme);
                });
                ui.add_space(8.0);

                log_panel::show_log_panel(ui, panel, *theme);
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::dashboard_state::ConnectionState;
    use serde_json::json;

    #[test]
    fn drains_events_in_arrival_order() {
        let (tx, rx) = mpsc::channel();
        let mut app = PrintMonApp::with_receiver(&DashboardConfig::default(), rx);

        tx.send(TransportEvent::Connect).unwrap();
        tx.send(TransportEvent::Message(json!([200, 60, 10, 20, 5, 150]))).unwrap();
        tx.send(TransportEvent::Message(json!("garbage"))).unwrap();
        tx.send(TransportEvent::Disconnect).unwrap();

        assert_eq!(app.drain_events(), 4);
        assert_eq!(app.drain_events(), 0);
        assert_eq!(app.panel().connection, ConnectionState::Disconnected);
        assert_eq!(app.panel().log_len(), 1);
        assert_eq!(app.controller().state().accepted, 1);
        assert_eq!(app.controller().state().dropped, 1);
    }
}

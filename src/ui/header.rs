use crate::state::panel::PanelModel;
use crate::state::theme::Theme;

/// Buttons in the header the app has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    ToggleTheme,
    ResetCamera,
}

/// Title, connection indicator and last-update time.
pub fn show_header(ui: &mut egui::Ui, panel: &PanelModel, theme: Theme) -> HeaderAction {
    let mut action = HeaderAction::None;

    ui.horizontal(|ui| {
        ui.heading("3D Printer Monitor");
        ui.separator();

        let connected = panel.connection.is_connected();
        let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter()
            .circle_filled(dot.center(), 5.0, theme.status_color(connected));
        ui.label(panel.connection.label());

        ui.separator();
        ui.label(format!(
            "Last update: {}",
            panel.last_update.as_deref().unwrap_or("--")
        ));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(format!("{} theme", theme.toggle().label()))
                .clicked()
            {
                action = HeaderAction::ToggleTheme;
            }
            if ui.button("Reset view").clicked() {
                action = HeaderAction::ResetCamera;
            }
        });
    });

    action
}

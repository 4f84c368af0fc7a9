use crate::state::panel::PanelModel;
use crate::state::theme::Theme;

const LOG_HEIGHT: f32 = 220.0;

/// Most recent messages, newest at the top.
pub fn show_log_panel(ui: &mut egui::Ui, panel: &PanelModel, theme: Theme) {
    super::card(ui, theme, "Message log", |ui| {
        if panel.log_len() == 0 {
            ui.weak("Waiting for data...");
            return;
        }
        egui::ScrollArea::vertical()
            .id_salt("message_log")
            .max_height(LOG_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for line in panel.log() {
                    ui.monospace(line);
                }
            });
    });
}

pub mod chart_panel;
pub mod gauges;
pub mod header;
pub mod log_panel;
pub mod scene_panel;

use crate::state::theme::Theme;

/// Rounded card with a bold title, shared by every dashboard section.
pub fn card<R>(
    ui: &mut egui::Ui,
    theme: Theme,
    title: &str,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::group(ui.style())
        .fill(theme.card_fill())
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(title).strong().size(15.0));
            ui.add_space(4.0);
            add_contents(ui)
        })
        .inner
}

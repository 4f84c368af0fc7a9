use egui::{RichText, Sense};

use crate::processing::statistics::WindowStats;
use crate::render::canvas::{DisplayList, Extent};
use crate::render::paint::paint_display_list;
use crate::state::theme::Theme;

const CHART_HEIGHT: f32 = 300.0;

/// Feedrate history with its statistics row. `redraw` is called when the
/// plot area changed size and the recorded chart has to be rebuilt.
pub fn show_chart_panel(
    ui: &mut egui::Ui,
    chart: &mut DisplayList,
    stats: Option<WindowStats>,
    theme: Theme,
    redraw: impl FnOnce(&mut DisplayList),
) {
    super::card(ui, theme, "Feedrate history", |ui| {
        ui.columns(4, |cols| {
            for (col, (label, value)) in cols.iter_mut().zip(stat_entries(stats)) {
                col.vertical_centered(|ui| {
                    ui.weak(label);
                    ui.label(RichText::new(value).strong());
                });
            }
        });
        ui.add_space(6.0);

        let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        if chart.resize(Extent::new(rect.width(), rect.height())) {
            redraw(chart);
        }
        paint_display_list(ui.painter(), rect, chart);
    });
}

/// Labelled values for the row above the chart.
pub fn stat_entries(stats: Option<WindowStats>) -> [(&'static str, String); 4] {
    let fmt = |pick: fn(&WindowStats) -> f64| {
        stats
            .as_ref()
            .map(|s| WindowStats::format_rate(pick(s)))
            .unwrap_or_else(|| "--".to_string())
    };
    [
        ("Current", fmt(|s| s.current)),
        ("Average", fmt(|s| s.mean)),
        ("Max", fmt(|s| s.max)),
        ("Min", fmt(|s| s.min)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_format_window_statistics() {
        let stats = WindowStats::compute([150.0, 160.0, 155.0]);
        let entries = stat_entries(stats);
        assert_eq!(entries[0], ("Current", "155.0 mm/s".to_string()));
        assert_eq!(entries[1], ("Average", "155.0 mm/s".to_string()));
        assert_eq!(entries[2], ("Max", "160.0 mm/s".to_string()));
        assert_eq!(entries[3], ("Min", "150.0 mm/s".to_string()));
    }

    #[test]
    fn entries_show_placeholders_without_data() {
        for (_, value) in stat_entries(None) {
            assert_eq!(value, "--");
        }
    }
}

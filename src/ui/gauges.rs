use egui::{pos2, Rect, RichText, Sense};

use crate::config::GaugeScales;
use crate::state::panel::{Channel, PanelModel};
use crate::state::theme::{Theme, ACCENT};

const VERTICAL_GAUGE: egui::Vec2 = egui::vec2(28.0, 90.0);
const HORIZONTAL_GAUGE_HEIGHT: f32 = 18.0;

/// Temperature, feedrate and position cards in one row.
pub fn show_gauges(ui: &mut egui::Ui, panel: &PanelModel, scales: &GaugeScales, theme: Theme) {
    ui.columns(4, |cols| {
        temperature_card(
            &mut cols[0],
            panel,
            Channel::ExtruderTemp,
            "Extruder temperature",
            theme,
        );
        temperature_card(
            &mut cols[1],
            panel,
            Channel::BedTemp,
            "Bed temperature",
            theme,
        );

        super::card(&mut cols[2], theme, "Feedrate", |ui| {
            ui.label(RichText::new(panel.text(Channel::Feedrate)).size(22.0).strong());
            gauge_bar(ui, panel.fill(Channel::Feedrate), false, theme);
            ui.horizontal(|ui| {
                ui.weak("0");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("{:.0}", scales.feedrate_max));
                });
            });
        });

        super::card(&mut cols[3], theme, "Position", |ui| {
            egui::Grid::new("position_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for channel in [Channel::PosX, Channel::PosY, Channel::PosZ] {
                        ui.label(RichText::new(channel.label()).strong());
                        ui.monospace(panel.text(channel));
                        ui.end_row();
                    }
                });
        });
    });
}

fn temperature_card(
    ui: &mut egui::Ui,
    panel: &PanelModel,
    channel: Channel,
    title: &str,
    theme: Theme,
) {
    super::card(ui, theme, title, |ui| {
        ui.horizontal(|ui| {
            gauge_bar(ui, panel.fill(channel), true, theme);
            ui.add_space(8.0);
            ui.label(RichText::new(panel.text(channel)).size(22.0).strong());
        });
    });
}

fn gauge_bar(ui: &mut egui::Ui, percent: f32, vertical: bool, theme: Theme) {
    let size = if vertical {
        VERTICAL_GAUGE
    } else {
        egui::vec2(ui.available_width(), HORIZONTAL_GAUGE_HEIGHT)
    };
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, theme.gauge_track());
    if percent > 0.0 {
        painter.rect_filled(filled_rect(rect, percent, vertical), 4.0, ACCENT);
    }
}

/// Part of `track` covered by `percent`; vertical gauges fill bottom-up.
pub fn filled_rect(track: Rect, percent: f32, vertical: bool) -> Rect {
    let t = (percent / 100.0).clamp(0.0, 1.0);
    if vertical {
        Rect::from_min_max(pos2(track.left(), track.bottom() - track.height() * t), track.max)
    } else {
        Rect::from_min_max(track.min, pos2(track.left() + track.width() * t, track.bottom()))
    }
}

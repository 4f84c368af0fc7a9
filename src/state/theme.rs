use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

/// Accent shared by the chart, gauges and build plate.
pub const ACCENT: Color32 = Color32::from_rgb(0x66, 0x7e, 0xea);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// Background of the chart and gauge cards.
    pub fn card_fill(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(0x1f, 0x23, 0x2b),
            Theme::Light => Color32::WHITE,
        }
    }

    /// Empty part of a gauge.
    pub fn gauge_track(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(0x37, 0x41, 0x51),
            Theme::Light => Color32::from_rgb(0xe5, 0xe7, 0xeb),
        }
    }

    pub fn status_color(&self, connected: bool) -> Color32 {
        if connected {
            Color32::from_rgb(0x10, 0xb9, 0x81)
        } else {
            Color32::from_rgb(0xef, 0x44, 0x44)
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

use std::collections::VecDeque;

use crate::processing::statistics::WindowStats;
use crate::state::dashboard_state::ConnectionState;

/// Default number of lines kept in the message log.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Instantaneous readouts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    ExtruderTemp,
    BedTemp,
    Feedrate,
    PosX,
    PosY,
    PosZ,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::ExtruderTemp => "Extruder",
            Channel::BedTemp => "Bed",
            Channel::Feedrate => "Feedrate",
            Channel::PosX => "X",
            Channel::PosY => "Y",
            Channel::PosZ => "Z",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Output side of the dashboard. The ingestion controller only pushes into
/// this; it never reads UI state back.
pub trait DashboardView {
    fn set_connection(&mut self, state: ConnectionState);
    fn set_last_update(&mut self, text: String);
    fn set_channel_text(&mut self, channel: Channel, text: String);
    /// `percent` is in 0..=100.
    fn set_channel_fill(&mut self, channel: Channel, percent: f32);
    fn set_chart_stats(&mut self, stats: WindowStats);
    /// Insert a line at the top of the log, dropping the oldest past the cap.
    fn push_log_line(&mut self, line: String);
}

/// Proportion of `full_scale` covered by `value`, as a percentage in 0..=100.
pub fn fill_percent(value: f64, full_scale: f64) -> f32 {
    if full_scale <= 0.0 || value.is_nan() {
        return 0.0;
    }
    (value / full_scale * 100.0).clamp(0.0, 100.0) as f32
}

/// Display model read by the egui panels each frame.
#[derive(Debug, Clone)]
pub struct PanelModel {
    pub connection: ConnectionState,
    pub last_update: Option<String>,
    texts: [Option<String>; 6],
    fills: [f32; 6],
    pub stats: Option<WindowStats>,
    log: VecDeque<String>,
    log_capacity: usize,
}

impl PanelModel {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            connection: ConnectionState::default(),
            last_update: None,
            texts: Default::default(),
            fills: [0.0; 6],
            stats: None,
            log: VecDeque::with_capacity(log_capacity),
            log_capacity,
        }
    }

    /// Current readout, or a placeholder before the first sample.
    pub fn text(&self, channel: Channel) -> &str {
        self.texts[channel.index()].as_deref().unwrap_or("--")
    }

    pub fn fill(&self, channel: Channel) -> f32 {
        self.fills[channel.index()]
    }

    /// Log lines, newest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn log_len(&self) -> usize {
        self.log.len()
    }
}

impl Default for PanelModel {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl DashboardView for PanelModel {
    fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    fn set_last_update(&mut self, text: String) {
        self.last_update = Some(text);
    }

    fn set_channel_text(&mut self, channel: Channel, text: String) {
        self.texts[channel.index()] = Some(text);
    }

    fn set_channel_fill(&mut self, channel: Channel, percent: f32) {
        self.fills[channel.index()] = percent.clamp(0.0, 100.0);
    }

    fn set_chart_stats(&mut self, stats: WindowStats) {
        self.stats = Some(stats);
    }

    fn push_log_line(&mut self, line: String) {
        self.log.push_front(line);
        self.log.truncate(self.log_capacity);
    }
}

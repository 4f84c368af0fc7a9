use crate::processing::rolling_series::RollingSeries;

/// Whether the transport currently has a live session with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Connected,
    #[default]
    Disconnected,
}

impl ConnectionState {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Everything the ingestion path remembers between messages.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Recent feedrate values for the chart.
    pub feedrate: RollingSeries,
    pub connection: ConnectionState,
    /// Messages accepted so far.
    pub accepted: u64,
    /// Messages dropped as malformed. The only field a malformed message
    /// touches.
    pub dropped: u64,
}

impl DashboardState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            feedrate: RollingSeries::new(history_capacity),
            connection: ConnectionState::default(),
            accepted: 0,
            dropped: 0,
        }
    }
}

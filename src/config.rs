use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::plot3d::projector::WorkspaceBounds;
use crate::processing::rolling_series::DEFAULT_CAPACITY;
use crate::state::panel::DEFAULT_LOG_CAPACITY;
use crate::state::theme::Theme;
use crate::transport::socketio;

/// Root configuration, parsed from `printmon.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub transport: TransportConfig,
    pub chart: ChartConfig,
    pub workspace: WorkspaceBounds,
    pub gauges: GaugeScales,
    /// Lines kept in the message log.
    pub log_capacity: usize,
    pub theme: Theme,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            chart: ChartConfig::default(),
            workspace: WorkspaceBounds::default(),
            gauges: GaugeScales::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            theme: Theme::default(),
        }
    }
}

/// Socket.IO server the printer bridge publishes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// `http(s)://` or `ws(s)://` base URL of the Socket.IO server.
    pub server_url: String,
    /// Event name carrying telemetry arrays.
    pub event: String,
    pub initial_reconnect_delay_sec: u64,
    pub max_reconnect_delay_sec: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            server_url: "https://monitor-3d-backend.onrender.com".to_string(),
            event: "mqttMessage".to_string(),
            initial_reconnect_delay_sec: 1,
            max_reconnect_delay_sec: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Points kept in the rolling feedrate window.
    pub history_capacity: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Full-scale values for the gauge fills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeScales {
    /// °C
    pub extruder_max_temp: f64,
    /// °C
    pub bed_max_temp: f64,
    /// mm/s
    pub feedrate_max: f64,
}

impl Default for GaugeScales {
    fn default() -> Self {
        Self {
            extruder_max_temp: 300.0,
            bed_max_temp: 100.0,
            feedrate_max: 300.0,
        }
    }
}

impl DashboardConfig {
    /// Reject values that would make the dashboard meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = socketio::websocket_url(&self.transport.server_url) {
            return Err(ConfigError::Invalid {
                field: "transport.server_url",
                reason: format!("{e}; expected an http(s):// or ws(s):// URL"),
            });
        }
        if self.transport.initial_reconnect_delay_sec == 0
            || self.transport.max_reconnect_delay_sec < self.transport.initial_reconnect_delay_sec
        {
            return Err(ConfigError::Invalid {
                field: "transport.max_reconnect_delay_sec",
                reason: "delays must be positive and max >= initial".to_string(),
            });
        }
        let w = &self.workspace;
        if !(w.max_x > 0.0 && w.max_y > 0.0 && w.max_z > 0.0) {
            return Err(ConfigError::Invalid {
                field: "workspace",
                reason: "bounds must be positive".to_string(),
            });
        }
        if self.chart.history_capacity < 2 {
            tracing::warn!(
                "chart.history_capacity = {}; the feedrate chart needs at least 2 points",
                self.chart.history_capacity
            );
        }
        Ok(())
    }
}

/// Load configuration from a TOML file. Returns `DashboardConfig::default()`
/// if the file doesn't exist.
pub fn load(path: impl AsRef<Path>) -> Result<DashboardConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!("Config file not found at '{}'; using defaults.", path.display());
        return Ok(DashboardConfig::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let config: DashboardConfig = toml::from_str(&raw)?;
    config.validate()?;
    Ok(config)
}

/// Default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("printmon").join("printmon.toml")
}

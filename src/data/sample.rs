use chrono::{DateTime, Local};

/// One parsed telemetry reading from the printer.
///
/// Fields are private so a sample cannot be edited after the parser builds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    temp_extruder: f64,
    temp_bed: f64,
    x: f64,
    y: f64,
    z: f64,
    feedrate: f64,
    timestamp: DateTime<Local>,
}

impl Sample {
    pub fn new(
        temp_extruder: f64,
        temp_bed: f64,
        position: [f64; 3],
        feedrate: f64,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            temp_extruder,
            temp_bed,
            x: position[0],
            y: position[1],
            z: position[2],
            feedrate,
            timestamp,
        }
    }

    /// Hotend temperature in °C.
    pub fn temp_extruder(&self) -> f64 {
        self.temp_extruder
    }

    /// Heated bed temperature in °C.
    pub fn temp_bed(&self) -> f64 {
        self.temp_bed
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Print-head travel speed in mm/s.
    pub fn feedrate(&self) -> f64 {
        self.feedrate
    }

    /// Local time at which the message was parsed.
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Wall-clock label used by the panel and the log list.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// One line of the message log.
    pub fn log_line(&self) -> String {
        format!(
            "[{}] Extruder: {:.1}\u{00B0}C | Bed: {:.1}\u{00B0}C | Feedrate: {:.1} mm/s | Pos: X{:.1} Y{:.1} Z{:.1}",
            self.time_label(),
            self.temp_extruder,
            self.temp_bed,
            self.feedrate,
            self.x,
            self.y,
            self.z,
        )
    }
}

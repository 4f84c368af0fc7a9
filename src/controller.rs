//! Ingestion controller: turns transport events into dashboard updates.

use serde_json::Value;

use crate::config::{DashboardConfig, GaugeScales};
use crate::data::parser;
use crate::data::sample::Sample;
use crate::plot3d::projector::{self, WorkspaceBounds};
use crate::plot3d::scene::SceneSink;
use crate::processing::statistics::WindowStats;
use crate::render::canvas::Canvas2d;
use crate::render::chart;
use crate::state::dashboard_state::{ConnectionState, DashboardState};
use crate::state::panel::{fill_percent, Channel, DashboardView};
use crate::transport::TransportEvent;

/// Outcome of handling one event, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    StateChanged(ConnectionState),
    Ingested,
    Dropped,
}

/// Collaborators the controller writes into while handling an event.
pub struct Outputs<'a> {
    pub view: &'a mut dyn DashboardView,
    pub scene: &'a mut dyn SceneSink,
    pub chart: &'a mut dyn Canvas2d,
}

/// Owns the dashboard state and drives every output once per sample.
pub struct IngestionController {
    state: DashboardState,
    bounds: WorkspaceBounds,
    gauges: GaugeScales,
}

impl IngestionController {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            state: DashboardState::new(config.chart.history_capacity),
            bounds: config.workspace,
            gauges: config.gauges,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn connection(&self) -> ConnectionState {
        self.state.connection
    }

    pub fn handle_event(&mut self, event: TransportEvent, out: &mut Outputs<'_>) -> Handled {
        match event {
            TransportEvent::Connect => self.set_connection(ConnectionState::Connected, out),
            TransportEvent::Disconnect => self.set_connection(ConnectionState::Disconnected, out),
            TransportEvent::Message(payload) => self.handle_message(&payload, out),
        }
    }

    fn set_connection(&mut self, next: ConnectionState, out: &mut Outputs<'_>) -> Handled {
        if self.state.connection != next {
            tracing::info!("Connection state: {}", next.label());
        }
        self.state.connection = next;
        out.view.set_connection(next);
        Handled::StateChanged(next)
    }

    /// Process one telemetry message. Messages are accepted in either
    /// connection state. A malformed one reaches no output and leaves the
    /// window, readouts and connection as they were; it only bumps the
    /// `dropped` counter.
    pub fn handle_message(&mut self, payload: &Value, out: &mut Outputs<'_>) -> Handled {
        match parser::parse(payload) {
            Ok(sample) => {
                self.ingest(sample, out);
                Handled::Ingested
            }
            Err(e) => {
                self.state.dropped += 1;
                tracing::warn!("Dropping telemetry message: {e}; payload: {payload}");
                Handled::Dropped
            }
        }
    }

    /// Run the per-sample pipeline: readouts, chart, scene, log.
    pub fn ingest(&mut self, sample: Sample, out: &mut Outputs<'_>) {
        self.update_readouts(&sample, out.view);

        self.state.feedrate.push(sample.feedrate(), sample.timestamp());
        if let Some(stats) = self.state.feedrate.statistics() {
            out.view.set_chart_stats(stats);
        }
        self.redraw_chart(out.chart);

        let head = projector::project(sample.x(), sample.y(), sample.z(), &self.bounds);
        tracing::debug!(
            "Head in scene: x={:.1} y={:.1} z={:.1}",
            head.x,
            head.y,
            head.z
        );
        out.scene.set_head_position(head);

        out.view.push_log_line(sample.log_line());

        self.state.accepted += 1;
    }

    /// Re-render the chart from the current window, e.g. after a resize.
    pub fn redraw_chart(&self, canvas: &mut dyn Canvas2d) {
        let values: Vec<f64> = self.state.feedrate.values().collect();
        chart::render(&values, canvas);
    }

    pub fn statistics(&self) -> Option<WindowStats> {
        self.state.feedrate.statistics()
    }

    fn update_readouts(&self, sample: &Sample, view: &mut dyn DashboardView) {
        view.set_last_update(sample.time_label());

        view.set_channel_text(
            Channel::ExtruderTemp,
            format!("{:.1}\u{00B0}C", sample.temp_extruder()),
        );
        view.set_channel_fill(
            Channel::ExtruderTemp,
            fill_percent(sample.temp_extruder(), self.gauges.extruder_max_temp),
        );

        view.set_channel_text(Channel::BedTemp, format!("{:.1}\u{00B0}C", sample.temp_bed()));
        view.set_channel_fill(
            Channel::BedTemp,
            fill_percent(sample.temp_bed(), self.gauges.bed_max_temp),
        );

        view.set_channel_text(Channel::Feedrate, WindowStats::format_rate(sample.feedrate()));
        view.set_channel_fill(
            Channel::Feedrate,
            fill_percent(sample.feedrate(), self.gauges.feedrate_max),
        );

        view.set_channel_text(Channel::PosX, format!("{:.2}", sample.x()));
        view.set_channel_text(Channel::PosY, format!("{:.2}", sample.y()));
        view.set_channel_text(Channel::PosZ, format!("{:.2}", sample.z()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot3d::projector::SceneCoordinate;
    use crate::render::canvas::{DisplayList, Extent};
    use crate::state::panel::PanelModel;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingScene {
        moves: Vec<SceneCoordinate>,
    }

    impl SceneSink for RecordingScene {
        fn set_head_position(&mut self, position: SceneCoordinate) {
            self.moves.push(position);
        }
    }

    struct Rig {
        panel: PanelModel,
        scene: RecordingScene,
        chart: DisplayList,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                panel: PanelModel::default(),
                scene: RecordingScene::default(),
                chart: DisplayList::new(Extent::new(600.0, 300.0)),
            }
        }

        fn send(&mut self, ctl: &mut IngestionController, event: TransportEvent) -> Handled {
            let mut out = Outputs {
                view: &mut self.panel,
                scene: &mut self.scene,
                chart: &mut self.chart,
            };
            ctl.handle_event(event, &mut out)
        }
    }

    #[test]
    fn malformed_message_changes_nothing() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();

        let handled = rig.send(&mut ctl, TransportEvent::Message(json!([1, 2, 3])));
        assert_eq!(handled, Handled::Dropped);
        assert!(ctl.state().feedrate.is_empty());
        assert_eq!(ctl.state().dropped, 1);
        assert_eq!(ctl.state().accepted, 0);
        assert_eq!(ctl.connection(), ConnectionState::Disconnected);
        assert!(rig.scene.moves.is_empty());
        assert_eq!(rig.panel.log_len(), 0);
        assert!(rig.panel.last_update.is_none());
        assert!(rig.chart.is_blank());
    }

    #[test]
    fn connection_transitions_do_not_touch_data() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();
        assert_eq!(ctl.connection(), ConnectionState::Disconnected);

        rig.send(&mut ctl, TransportEvent::Connect);
        assert_eq!(ctl.connection(), ConnectionState::Connected);
        assert_eq!(rig.panel.connection, ConnectionState::Connected);

        rig.send(&mut ctl, TransportEvent::Disconnect);
        assert_eq!(ctl.connection(), ConnectionState::Disconnected);
        assert!(ctl.state().feedrate.is_empty());
        assert_eq!(rig.panel.log_len(), 0);
    }

    #[test]
    fn messages_are_ingested_while_disconnected() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();

        let handled = rig.send(&mut ctl, TransportEvent::Message(json!([200, 60, 10, 20, 5, 150])));
        assert_eq!(handled, Handled::Ingested);
        assert_eq!(ctl.connection(), ConnectionState::Disconnected);
        assert_eq!(ctl.state().feedrate.len(), 1);
    }

    #[test]
    fn readouts_and_fills() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();
        rig.send(&mut ctl, TransportEvent::Message(json!([150, 120, 10.126, 20, 5, 450])));

        assert_eq!(rig.panel.text(Channel::ExtruderTemp), "150.0\u{00B0}C");
        assert_eq!(rig.panel.fill(Channel::ExtruderTemp), 50.0);
        assert_eq!(rig.panel.fill(Channel::BedTemp), 100.0);
        assert_eq!(rig.panel.text(Channel::Feedrate), "450.0 mm/s");
        assert_eq!(rig.panel.fill(Channel::Feedrate), 100.0);
        assert_eq!(rig.panel.text(Channel::PosX), "10.13");
        assert_eq!(rig.panel.text(Channel::PosZ), "5.00");
    }

    #[test]
    fn single_sample_leaves_chart_blank_but_publishes_stats() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();
        rig.send(&mut ctl, TransportEvent::Message(json!([200, 60, 10, 20, 5, 150])));

        assert!(rig.chart.is_blank());
        let stats = rig.panel.stats.unwrap();
        assert_eq!(stats.current, 150.0);
        assert_eq!(stats.count, 1);

        rig.send(&mut ctl, TransportEvent::Message(json!([200, 60, 10, 20, 5, 160])));
        assert!(!rig.chart.is_blank());
    }

    #[test]
    fn redraw_after_resize_uses_last_window() {
        let mut ctl = IngestionController::new(&DashboardConfig::default());
        let mut rig = Rig::new();
        for f in [100, 120, 140] {
            rig.send(&mut ctl, TransportEvent::Message(json!([0, 0, 0, 0, 0, f])));
        }

        let mut resized = DisplayList::new(Extent::new(900.0, 400.0));
        ctl.redraw_chart(&mut resized);
        let mut expected = DisplayList::new(Extent::new(900.0, 400.0));
        chart::render(&[100.0, 120.0, 140.0], &mut expected);
        assert_eq!(resized, expected);
    }
}

//! Socket.IO client feeding telemetry events to the UI thread.

pub mod client;
pub mod socketio;

use serde_json::Value;

pub use client::{spawn, Waker};

/// What the transport hands to the ingestion controller, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connect,
    Disconnect,
    /// First argument of a telemetry event, still unparsed.
    Message(Value),
}

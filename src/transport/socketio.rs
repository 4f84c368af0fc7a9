//! Text-frame codec for Engine.IO v4 carrying Socket.IO v5 packets.

use serde::Deserialize;
use serde_json::Value;

use crate::error::TransportError;

/// Handshake data sent by the server in the Engine.IO open packet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInfo {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// A decoded websocket text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Engine.IO session opened.
    Open(OpenInfo),
    /// Engine.IO session closed by the server.
    Close,
    /// Server heartbeat; must be answered with [`encode_pong`].
    Ping,
    Pong,
    /// Socket.IO namespace connect acknowledged.
    Connected,
    /// Socket.IO namespace disconnected by the server.
    Disconnected,
    /// Socket.IO event with its name and arguments.
    Event { name: String, args: Vec<Value> },
    /// Socket.IO namespace connect refused.
    ConnectError(Value),
    /// Anything this client has no use for (noop, upgrade, acks, binary).
    Ignored,
}

/// Frame asking the server to join the default namespace.
pub fn encode_connect() -> &'static str {
    "40"
}

/// Reply to a server ping.
pub fn encode_pong() -> &'static str {
    "3"
}

/// Build the websocket endpoint for a Socket.IO server base URL.
pub fn websocket_url(server_url: &str) -> Result<String, TransportError> {
    let trimmed = server_url.trim().trim_end_matches('/');
    let (scheme, rest) = trimmed
        .split_once("://")
        .ok_or_else(|| TransportError::InvalidUrl(server_url.to_string()))?;

    let ws_scheme = match scheme.to_ascii_lowercase().as_str() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        _ => return Err(TransportError::InvalidUrl(server_url.to_string())),
    };
    if rest.is_empty() {
        return Err(TransportError::InvalidUrl(server_url.to_string()));
    }

    Ok(format!("{ws_scheme}://{rest}/socket.io/?EIO=4&transport=websocket"))
}

/// Decode one websocket text frame.
pub fn decode(text: &str) -> Result<Frame, TransportError> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| TransportError::Protocol("empty frame".to_string()))?;
    let body = chars.as_str();

    match kind {
        '0' => serde_json::from_str(body)
            .map(Frame::Open)
            .map_err(|e| TransportError::Protocol(format!("bad open packet: {e}"))),
        '1' => Ok(Frame::Close),
        '2' => Ok(Frame::Ping),
        '3' => Ok(Frame::Pong),
        '4' => decode_socket_packet(body),
        // Upgrade, noop and anything newer than v4.
        _ => Ok(Frame::Ignored),
    }
}

fn decode_socket_packet(packet: &str) -> Result<Frame, TransportError> {
    let mut chars = packet.chars();
    let kind = chars
        .next()
        .ok_or_else(|| TransportError::Protocol("empty socket.io packet".to_string()))?;
    let body = skip_namespace(chars.as_str());

    match kind {
        '0' => Ok(Frame::Connected),
        '1' => Ok(Frame::Disconnected),
        '2' => decode_event(skip_ack_id(body)),
        '4' => {
            let detail = serde_json::from_str(body)
                .unwrap_or_else(|_| Value::String(body.to_string()));
            Ok(Frame::ConnectError(detail))
        }
        // Acks, binary packets and unknown types.
        _ => Ok(Frame::Ignored),
    }
}

/// Drop a leading `/namespace,` if present.
fn skip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        match body.find(',') {
            Some(idx) => &body[idx + 1..],
            None => "",
        }
    } else {
        body
    }
}

fn skip_ack_id(body: &str) -> &str {
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn decode_event(body: &str) -> Result<Frame, TransportError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TransportError::Protocol(format!("bad event payload: {e}")))?;

    let Value::Array(mut items) = value else {
        return Err(TransportError::Protocol("event payload is not an array".to_string()));
    };
    if items.is_empty() {
        return Err(TransportError::Protocol("event without a name".to_string()));
    }

    let name = match items.remove(0) {
        Value::String(name) => name,
        other => {
            return Err(TransportError::Protocol(format!(
                "event name is not a string: {other}"
            )))
        }
    };

    Ok(Frame::Event { name, args: items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_open_handshake() {
        let raw = r#"0{"sid":"abc","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#;
        let frame = decode(raw).unwrap();
        assert_eq!(
            frame,
            Frame::Open(OpenInfo {
                sid: "abc".to_string(),
                ping_interval: 25000,
                ping_timeout: 20000,
            })
        );
    }

    #[test]
    fn decodes_heartbeat_and_lifecycle() {
        assert_eq!(decode("2").unwrap(), Frame::Ping);
        assert_eq!(decode("3").unwrap(), Frame::Pong);
        assert_eq!(decode("1").unwrap(), Frame::Close);
        assert_eq!(decode(r#"40{"sid":"xyz"}"#).unwrap(), Frame::Connected);
        assert_eq!(decode("41").unwrap(), Frame::Disconnected);
        assert_eq!(decode("6").unwrap(), Frame::Ignored);
        assert_eq!(decode("9").unwrap(), Frame::Ignored);
        assert_eq!(decode("43[]").unwrap(), Frame::Ignored);
    }

    #[test]
    fn decodes_event_with_array_payload() {
        let frame = decode(r#"42["mqttMessage",[200,60,"10",20,5,150]]"#).unwrap();
        assert_eq!(
            frame,
            Frame::Event {
                name: "mqttMessage".to_string(),
                args: vec![json!([200, 60, "10", 20, 5, 150])],
            }
        );
    }

    #[test]
    fn event_namespace_and_ack_id_are_skipped() {
        let frame = decode(r#"42/printers,17["status","ok"]"#).unwrap();
        assert_eq!(
            frame,
            Frame::Event {
                name: "status".to_string(),
                args: vec![json!("ok")],
            }
        );
    }

    #[test]
    fn connect_error_carries_detail() {
        let frame = decode(r#"44{"message":"Not authorized"}"#).unwrap();
        assert_eq!(frame, Frame::ConnectError(json!({"message": "Not authorized"})));
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        assert!(decode("").is_err());
        assert!(decode("4").is_err());
        assert!(decode("42not json").is_err());
        assert!(decode("42[1,2]").is_err());
    }

    #[test]
    fn websocket_url_rewrites_scheme() {
        assert_eq!(
            websocket_url("https://monitor-3d-backend.onrender.com").unwrap(),
            "wss://monitor-3d-backend.onrender.com/socket.io/?EIO=4&transport=websocket"
        );
        assert_eq!(
            websocket_url("http://localhost:3000/").unwrap(),
            "ws://localhost:3000/socket.io/?EIO=4&transport=websocket"
        );
        assert!(websocket_url("localhost:3000").is_err());
        assert!(websocket_url("ftp://host").is_err());
    }
}

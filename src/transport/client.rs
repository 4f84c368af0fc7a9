use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use super::socketio::{self, Frame};
use super::TransportEvent;
use crate::config::TransportConfig;
use crate::error::TransportError;

/// Called after every event so the UI thread wakes up and drains the channel.
pub type Waker = Box<dyn Fn() + Send + 'static>;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How long to wait for the server handshake before giving up on a socket.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(45);

/// Start the Socket.IO client on its own thread with a single-threaded
/// tokio runtime. The thread reconnects forever and exits only once the
/// receiving end of `events` is dropped.
pub fn spawn(
    config: TransportConfig,
    events: Sender<TransportEvent>,
    wake: Waker,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("printmon-transport".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    tracing::error!("Failed to start transport runtime: {e}");
                    return;
                }
            };
            let link = Link {
                events,
                wake,
                connected: false,
            };
            runtime.block_on(run_with_reconnect(config, link));
        })
}

/// Doubling reconnect delay, capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            current: initial,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}

struct Link {
    events: Sender<TransportEvent>,
    wake: Waker,
    /// Whether the current session got as far as a namespace ack.
    connected: bool,
}

impl Link {
    /// `false` once the UI side has gone away.
    fn emit(&mut self, event: TransportEvent) -> bool {
        if self.events.send(event).is_err() {
            return false;
        }
        (self.wake)();
        true
    }
}

enum Flow {
    Reconnect,
    Shutdown,
}

/// What a session should do with one decoded frame.
#[derive(Debug, PartialEq)]
enum Action {
    Handshake { heartbeat: Duration },
    Reply(&'static str),
    Emit(TransportEvent),
    Finish,
    Reject(String),
    Nothing,
}

fn route(frame: Frame, event_name: &str) -> Action {
    match frame {
        Frame::Open(info) => {
            let millis = info.ping_interval + info.ping_timeout;
            let heartbeat = if millis == 0 {
                HANDSHAKE_TIMEOUT
            } else {
                Duration::from_millis(millis)
            };
            Action::Handshake { heartbeat }
        }
        Frame::Ping => Action::Reply(socketio::encode_pong()),
        Frame::Connected => Action::Emit(TransportEvent::Connect),
        Frame::Disconnected | Frame::Close => Action::Finish,
        Frame::Event { name, args } if name == event_name => {
            let payload = args.into_iter().next().unwrap_or(Value::Null);
            Action::Emit(TransportEvent::Message(payload))
        }
        Frame::Event { name, .. } => {
            tracing::debug!("Ignoring event '{name}'");
            Action::Nothing
        }
        Frame::ConnectError(detail) => Action::Reject(detail.to_string()),
        Frame::Pong | Frame::Ignored => Action::Nothing,
    }
}

async fn run_with_reconnect(config: TransportConfig, mut link: Link) {
    let url = match socketio::websocket_url(&config.server_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("{e}; telemetry transport not started");
            return;
        }
    };
    let mut backoff = Backoff::new(
        Duration::from_secs(config.initial_reconnect_delay_sec),
        Duration::from_secs(config.max_reconnect_delay_sec),
    );

    loop {
        tracing::info!("Connecting to {url}");
        link.connected = false;
        let outcome = run_session(&url, &config.event, &mut link).await;

        if link.connected {
            backoff.reset();
            if !link.emit(TransportEvent::Disconnect) {
                return;
            }
        }

        match outcome {
            Ok(Flow::Shutdown) => {
                tracing::info!("Dashboard closed; stopping transport");
                return;
            }
            Ok(Flow::Reconnect) => tracing::warn!("Connection closed by server"),
            Err(e) => tracing::error!("Connection failed: {e}"),
        }

        let delay = backoff.next_delay();
        tracing::info!("Reconnecting in {}s", delay.as_secs());
        sleep(delay).await;
    }
}

async fn run_session(url: &str, event_name: &str, link: &mut Link) -> Result<Flow, TransportError> {
    let ws_stream = connect(url, HANDSHAKE_TIMEOUT).await?;
    tracing::debug!("WebSocket open");
    let (mut write, mut read) = ws_stream.split();
    let mut heartbeat = HANDSHAKE_TIMEOUT;

    loop {
        let next = timeout(heartbeat, read.next()).await.map_err(|_| {
            TransportError::Protocol(format!("nothing heard for {}s", heartbeat.as_secs()))
        })?;

        let text = match next {
            None => return Ok(Flow::Reconnect),
            Some(Err(e)) => return Err(e.into()),
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Close(frame))) => {
                tracing::debug!("Close frame: {frame:?}");
                return Ok(Flow::Reconnect);
            }
            Some(Ok(_)) => continue,
        };

        let frame = match socketio::decode(text.as_str()) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Skipping frame: {e}");
                continue;
            }
        };

        match route(frame, event_name) {
            Action::Handshake { heartbeat: h } => {
                heartbeat = h;
                write.send(Message::text(socketio::encode_connect())).await?;
            }
            Action::Reply(reply) => write.send(Message::text(reply)).await?,
            Action::Emit(event) => {
                if event == TransportEvent::Connect {
                    link.connected = true;
                }
                if !link.emit(event) {
                    return Ok(Flow::Shutdown);
                }
            }
            Action::Finish => return Ok(Flow::Reconnect),
            Action::Reject(reason) => return Err(TransportError::ConnectRejected(reason)),
            Action::Nothing => {}
        }
    }
}

/// Open the websocket, giving up if the TCP, TLS and HTTP upgrade steps
/// together take longer than `limit`.
async fn connect(url: &str, limit: Duration) -> Result<WsStream, TransportError> {
    let (ws_stream, _) = timeout(limit, connect_async(url))
        .await
        .map_err(|_| TransportError::Protocol(format!("handshake took longer than {limit:?}")))??;
    Ok(ws_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::socketio::OpenInfo;
    use serde_json::json;
    use std::sync::mpsc;

    #[tokio::test]
    async fn stalled_upgrade_times_out() {
        // Accepts the TCP connection but never answers the HTTP upgrade.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("ws://{}/socket.io/", listener.local_addr().unwrap());

        let result = connect(&url, Duration::from_millis(200)).await;
        assert!(matches!(result, Err(TransportError::Protocol(_))));
        drop(listener);
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let mut backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(30));
        let delays: Vec<u64> = (0..7).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16, 30, 30]);

        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn handshake_uses_server_heartbeat() {
        let open = Frame::Open(OpenInfo {
            sid: "s".to_string(),
            ping_interval: 25000,
            ping_timeout: 20000,
        });
        assert_eq!(
            route(open, "mqttMessage"),
            Action::Handshake {
                heartbeat: Duration::from_secs(45)
            }
        );
    }

    #[test]
    fn only_the_telemetry_event_is_forwarded() {
        let telemetry = Frame::Event {
            name: "mqttMessage".to_string(),
            args: vec![json!([1, 2, 3, 4, 5, 6]), json!("extra")],
        };
        assert_eq!(
            route(telemetry, "mqttMessage"),
            Action::Emit(TransportEvent::Message(json!([1, 2, 3, 4, 5, 6])))
        );

        let other = Frame::Event {
            name: "chat".to_string(),
            args: vec![json!("hi")],
        };
        assert_eq!(route(other, "mqttMessage"), Action::Nothing);

        let empty = Frame::Event {
            name: "mqttMessage".to_string(),
            args: vec![],
        };
        assert_eq!(
            route(empty, "mqttMessage"),
            Action::Emit(TransportEvent::Message(Value::Null))
        );
    }

    #[test]
    fn lifecycle_frames() {
        assert_eq!(route(Frame::Ping, "e"), Action::Reply("3"));
        assert_eq!(route(Frame::Connected, "e"), Action::Emit(TransportEvent::Connect));
        assert_eq!(route(Frame::Close, "e"), Action::Finish);
        assert_eq!(route(Frame::Disconnected, "e"), Action::Finish);
        assert!(matches!(route(Frame::ConnectError(json!("nope")), "e"), Action::Reject(_)));
    }

    #[test]
    fn link_stops_once_receiver_is_gone() {
        let (tx, rx) = mpsc::channel();
        let woken = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = woken.clone();
        let mut link = Link {
            events: tx,
            wake: Box::new(move || {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }),
            connected: false,
        };

        assert!(link.emit(TransportEvent::Connect));
        assert_eq!(rx.recv().unwrap(), TransportEvent::Connect);
        assert_eq!(woken.load(std::sync::atomic::Ordering::SeqCst), 1);

        drop(rx);
        assert!(!link.emit(TransportEvent::Disconnect));
    }
}

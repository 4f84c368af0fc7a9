use thiserror::Error;

/// Raised when an inbound telemetry message cannot become a `Sample`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Failures of the Socket.IO transport. None of these are fatal; the client
/// reports a disconnect and retries.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("server rejected namespace connect: {0}")]
    ConnectRejected(String),

    #[error("invalid server url '{0}'")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

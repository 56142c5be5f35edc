//! Error taxonomy for the gstd client.
//!
//! Every failure a caller can observe is a [`ClientError`] variant. The
//! variants separate local mistakes (`MalformedRequest`), transport faults
//! (`ConnectionFailed`, `Timeout`, `Oversize`, `IncompleteResponse`, `Io`),
//! decode failures (`CorruptedResponse`), and failures reported by the daemon
//! itself (`DaemonRejected`). Nothing is retried or swallowed in this crate;
//! each error surfaces to the immediate caller.

use std::time::Duration;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors produced while talking to the GStreamer Daemon.
///
/// These errors provide actionable messages for the common failure modes of
/// a connection-per-request TCP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An argument could not be encoded into a command token. Raised before
    /// any socket operation takes place.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The connection could not be opened, or was refused or reset.
    #[error("Connection failed: {0}")]
    ConnectionFailed(#[source] std::io::Error),

    /// No response arrived within the configured bound.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The response grew past the configured size bound with no terminator
    /// in sight.
    #[error("Response exceeded {limit} bytes before the terminator")]
    Oversize {
        /// The configured `max_response_size`.
        limit: usize,
    },

    /// The daemon closed the connection before sending a terminator.
    #[error("Connection closed before the response terminator")]
    IncompleteResponse,

    /// The payload before the terminator was not a well-formed envelope.
    #[error("Corrupted response: {0}")]
    CorruptedResponse(String),

    /// The daemon answered with a nonzero `code`.
    ///
    /// Both fields are carried verbatim from the daemon's envelope and are
    /// meant to be shown to the end user largely as-is.
    #[error("Daemon error {code}: {description}")]
    DaemonRejected {
        /// The daemon's return code.
        code: i32,
        /// The daemon's human-readable description.
        description: String,
    },

    /// The reachability check failed; the daemon is not answering.
    ///
    /// Raised only by [`GstdClient::ping`](crate::client::GstdClient::ping)
    /// and [`GstdClient::connect`](crate::client::GstdClient::connect),
    /// wrapping the underlying transport or decode fault.
    #[error("Daemon unreachable: {0}")]
    DaemonUnreachable(#[source] Box<ClientError>),

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::NotConnected
            | std::io::ErrorKind::TimedOut => ClientError::ConnectionFailed(err),
            _ => ClientError::Io(err),
        }
    }
}

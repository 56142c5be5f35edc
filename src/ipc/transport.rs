//! Connection-per-request TCP transport.
//!
//! Every [`Transport::send`] opens a fresh connection to the daemon, writes
//! one command line, reads one NUL-framed response, and closes the socket.
//! No pooling, no reuse, no retries. Because nothing is shared between
//! calls, any number of sends may run concurrently without locks, at the
//! cost of any ordering guarantee between them.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::error::{ClientError, Result};
use crate::ipc::framing::{read_response, write_request};

/// Host the daemon listens on unless configured otherwise.
pub const DEFAULT_HOST: &str = "localhost";

/// TCP port the daemon listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 5000;

/// Immutable connection settings, fixed at client construction.
///
/// # Example
///
/// ```ignore
/// let config = Config {
///     timeout: Some(Duration::from_secs(5)),
///     ..Config::default()
/// };
/// let client = GstdClient::new(config);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Daemon host name or address.
    pub host: String,
    /// Daemon TCP port.
    pub port: u16,
    /// Bound applied to each read attempt while waiting for the response.
    /// `None` blocks forever; `Some(Duration::ZERO)` returns immediately
    /// unless bytes are already available.
    pub timeout: Option<Duration>,
    /// Upper bound on the accumulated response size. `None` is unbounded.
    pub max_response_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: None,
            max_response_size: None,
        }
    }
}

/// One-shot command transport over the daemon's TCP interface.
///
/// The transport holds only configuration; each call owns its socket for
/// the duration of one command/response exchange. Dropping a pending send
/// (cancellation) drops the socket with it.
#[derive(Debug, Clone)]
pub struct Transport {
    config: Config,
}

impl Transport {
    /// Create a transport from the given settings. Performs no I/O.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The settings this transport was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send one command and return the raw response text, waiting with the
    /// configured timeout.
    pub async fn send(&self, tokens: &[&str]) -> Result<String> {
        self.send_timeout(tokens, self.config.timeout).await
    }

    /// Send one command with an explicit timeout, overriding the configured
    /// one for this call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tokens` is empty (`ClientError::MalformedRequest`, before any I/O)
    /// - The connection cannot be opened (`ClientError::ConnectionFailed`)
    /// - The response violates the framing rules (`ClientError::Timeout`,
    ///   `ClientError::Oversize`, `ClientError::IncompleteResponse`)
    ///
    /// The socket is closed before this returns, on every path.
    pub async fn send_timeout(
        &self,
        tokens: &[&str],
        timeout: Option<Duration>,
    ) -> Result<String> {
        if tokens.is_empty() {
            return Err(ClientError::MalformedRequest("empty command".to_string()));
        }

        let mut stream = TcpStream::connect((self.config.host.as_str(), self.config.port))
            .await
            .map_err(ClientError::ConnectionFailed)?;

        debug!("Sending command: {}", tokens.join(" "));
        write_request(&mut stream, tokens).await?;

        let raw = read_response(&mut stream, timeout, self.config.max_response_size).await?;
        trace!("Received {} byte response", raw.len());

        // The stream is dropped here (and on every error path above),
        // closing the connection.
        Ok(raw)
    }
}

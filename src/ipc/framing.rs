//! NUL-terminated message framing for the gstd wire protocol.
//!
//! A request is a single line of UTF-8 text with no terminator; the daemon
//! frames its reply by appending one NUL (0x00) byte after the JSON text.
//! The functions here implement both directions over any async byte stream,
//! so the transport can use TCP while tests drive them through socket pairs.
//!
//! # Wire Format
//!
//! ```text
//! client ──► element_get p0 videotestsrc0 pattern          (no terminator)
//! daemon ──► {"code":0,"description":"Success","response":{...}}\0
//! ```

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ClientError, Result};

/// End-of-message marker the daemon appends to every response.
const TERMINATOR: u8 = 0x00;

/// Bytes requested per read attempt.
const READ_CHUNK_SIZE: usize = 1024;

/// Write one command line to the stream.
///
/// # Protocol
///
/// Tokens are joined with single spaces and written as UTF-8. No trailing
/// newline or terminator is sent; the daemon parses the command from the
/// line itself.
///
/// # Errors
///
/// Returns `ClientError::ConnectionFailed` or `ClientError::Io` if the
/// write fails.
///
/// # Example
///
/// ```ignore
/// write_request(&mut stream, &["pipeline_play", "p0"]).await?;
/// ```
pub async fn write_request<W>(writer: &mut W, tokens: &[&str]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = tokens.join(" ");
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one framed response from the stream.
///
/// # Protocol
///
/// 1. Read up to 1024 bytes per attempt; when `timeout` is set, each
///    attempt individually must complete within the bound
/// 2. Accumulate until a NUL byte appears; bytes after the NUL in the same
///    chunk are discarded
/// 3. Decode the accumulated payload (excluding the NUL) as UTF-8
///
/// A `timeout` of zero polls exactly once: the read succeeds only if bytes
/// are already available. `None` waits forever.
///
/// # Errors
///
/// Returns an error if:
/// - The bound elapses before a read completes (`ClientError::Timeout`)
/// - The peer closes before a terminator is seen
///   (`ClientError::IncompleteResponse`)
/// - `max_size` is reached while the terminator is still unseen
///   (`ClientError::Oversize`); the response is never silently truncated
/// - The payload is not valid UTF-8 (`ClientError::CorruptedResponse`)
/// - The connection is reset mid-read (`ClientError::ConnectionFailed`)
///
/// # Example
///
/// ```ignore
/// let raw = read_response(&mut stream, Some(Duration::from_secs(5)), None).await?;
/// let envelope = Envelope::parse(&raw)?;
/// ```
pub async fn read_response<R>(
    reader: &mut R,
    timeout: Option<Duration>,
    max_size: Option<usize>,
) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut payload: Vec<u8> = Vec::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = match timeout {
            Some(bound) => match tokio::time::timeout(bound, reader.read(&mut chunk)).await {
                Ok(read) => read?,
                Err(_) => return Err(ClientError::Timeout(bound)),
            },
            None => reader.read(&mut chunk).await?,
        };

        // EOF - the daemon closed without terminating the message
        if n == 0 {
            return Err(ClientError::IncompleteResponse);
        }

        if let Some(pos) = chunk[..n].iter().position(|&b| b == TERMINATOR) {
            payload.extend_from_slice(&chunk[..pos]);
            break;
        }

        payload.extend_from_slice(&chunk[..n]);

        if let Some(limit) = max_size {
            if payload.len() >= limit {
                return Err(ClientError::Oversize { limit });
            }
        }
    }

    String::from_utf8(payload)
        .map_err(|e| ClientError::CorruptedResponse(format!("response is not UTF-8: {e}")))
}

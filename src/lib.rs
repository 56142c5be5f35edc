//! Async TCP client for GStreamer Daemon (gstd).
//!
//! gstd exposes pipeline control over a line-oriented TCP protocol: the
//! client writes one space-joined command per connection and the daemon
//! answers with a JSON envelope terminated by a NUL byte. This crate
//! implements that protocol:
//!
//! - `ipc` - framed transport: one TCP connection per command, NUL framing,
//!   timeout and size bounds
//! - `protocol` - the response envelope and command encoding rules
//! - `client` - `GstdClient`, the typed operation surface
//! - `error` - the error taxonomy shared by all of the above
//!
//! # Usage
//!
//! ```ignore
//! use gstd_client::{Config, GstdClient};
//!
//! let client = GstdClient::connect(Config::default()).await?;
//! client.pipeline_create("p0", "videotestsrc ! autovideosink").await?;
//! client.pipeline_play("p0").await?;
//! for pipeline in client.list_pipelines().await? {
//!     println!("{}", pipeline.name);
//! }
//! ```

pub mod client;
pub mod error;
pub mod ipc;
pub mod protocol;

pub use client::GstdClient;
pub use error::{ClientError, Result};
pub use ipc::{Config, Transport, DEFAULT_HOST, DEFAULT_PORT};
pub use protocol::{Envelope, Node};

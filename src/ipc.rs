//! Framed transport for communication with the GStreamer Daemon.
//!
//! This module owns the wire side of the client: opening one TCP connection
//! per command, encoding the command line, and reading the NUL-terminated
//! JSON reply.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐       TCP (one connection        ┌──────────────┐
//! │   GstdClient     │  ◄──────per command)────────────►│     gstd     │
//! │   (Transport)    │   text line / JSON + NUL (0x00)  │   (daemon)   │
//! └──────────────────┘                                  └──────────────┘
//! ```
//!
//! # Protocol
//!
//! A request is the command tokens joined by single spaces, written as
//! UTF-8 with no terminator. The response is UTF-8 JSON followed by a
//! single NUL byte:
//!
//! ```text
//! pipeline_create p0 videotestsrc ! fakesink
//! {"code":0,"description":"Success","response":null}\0
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use gstd_client::ipc::{Config, Transport};
//!
//! let transport = Transport::new(Config::default());
//! let raw = transport.send(&["list_pipelines"]).await?;
//! ```

mod framing;
mod transport;

pub use framing::{read_response, write_request};
pub use transport::{Config, Transport, DEFAULT_HOST, DEFAULT_PORT};

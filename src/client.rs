//! Typed command surface for the GStreamer Daemon.
//!
//! `GstdClient` turns each daemon operation into a method: arguments are
//! checked and stringified locally, the command is delivered through the
//! framed transport, and the JSON envelope is decoded into the operation's
//! typed result. Daemon-side failures surface as
//! `ClientError::DaemonRejected` with the daemon's own code and description.

use std::time::Duration;

use serde_json::Value;
use tracing::error;

use crate::error::{ClientError, Result};
use crate::ipc::{Config, Transport};
use crate::protocol::{bool_token, float_token, Envelope, Node};

/// Fixed bound used by the reachability check, independent of the
/// configured timeout.
const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Client for a running gstd instance.
///
/// One `GstdClient` may be shared across tasks; every operation opens its
/// own connection, so concurrent calls never interfere. They are never
/// ordered either: sequence dependent operations (create before play) by
/// awaiting one call before issuing the next.
///
/// # Example
///
/// ```ignore
/// use gstd_client::{Config, GstdClient};
///
/// let client = GstdClient::connect(Config::default()).await?;
/// client.pipeline_create("p0", "videotestsrc ! autovideosink").await?;
/// client.pipeline_play("p0").await?;
/// ```
#[derive(Debug, Clone)]
pub struct GstdClient {
    transport: Transport,
}

impl GstdClient {
    /// Create a client from the given settings. Performs no I/O; use
    /// [`connect`](Self::connect) to probe the daemon at construction.
    pub fn new(config: Config) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    /// Create a client and immediately [`ping`](Self::ping) the daemon.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::DaemonUnreachable` if the daemon does not
    /// answer the probe with a well-formed envelope.
    pub async fn connect(config: Config) -> Result<Self> {
        let client = Self::new(config);
        client.ping().await?;
        Ok(client)
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &Config {
        self.transport.config()
    }

    /// Check that the daemon is reachable and answering well-formed
    /// envelopes.
    ///
    /// Issues a `list_pipelines` bounded by a fixed 1-second timeout,
    /// regardless of the configured one.
    ///
    /// # Errors
    ///
    /// Every transport or decode fault is wrapped in
    /// `ClientError::DaemonUnreachable`, carrying the underlying fault as
    /// its source. A `DaemonRejected` envelope propagates unwrapped, since a
    /// rejection proves the daemon is alive and answering.
    pub async fn ping(&self) -> Result<()> {
        let outcome = self
            .transport
            .send_timeout(&["list_pipelines"], Some(PING_TIMEOUT))
            .await
            .and_then(|raw| Envelope::parse(&raw))
            .and_then(Envelope::into_result);

        match outcome {
            Ok(_) => Ok(()),
            Err(err @ ClientError::DaemonRejected { .. }) => Err(err),
            Err(err) => Err(ClientError::DaemonUnreachable(Box::new(err))),
        }
    }

    /// Send a command and decode the envelope, returning the success
    /// payload.
    async fn request(&self, tokens: &[&str]) -> Result<Option<Value>> {
        let raw = self.transport.send(tokens).await?;
        let result = Envelope::parse(&raw)?.into_result();
        if let Err(err) = &result {
            error!("Command {} failed: {}", tokens[0], err);
        }
        result
    }

    // ---- Pipelines -------------------------------------------------------

    /// Create a new pipeline from a gst-launch style description.
    ///
    /// The description may contain spaces; it travels verbatim after the
    /// pipeline name.
    pub async fn pipeline_create(&self, pipeline: &str, description: &str) -> Result<()> {
        self.request(&["pipeline_create", pipeline, description])
            .await?;
        Ok(())
    }

    /// Set the pipeline to playing.
    pub async fn pipeline_play(&self, pipeline: &str) -> Result<()> {
        self.request(&["pipeline_play", pipeline]).await?;
        Ok(())
    }

    /// Set the pipeline to paused.
    pub async fn pipeline_pause(&self, pipeline: &str) -> Result<()> {
        self.request(&["pipeline_pause", pipeline]).await?;
        Ok(())
    }

    /// Set the pipeline to null.
    pub async fn pipeline_stop(&self, pipeline: &str) -> Result<()> {
        self.request(&["pipeline_stop", pipeline]).await?;
        Ok(())
    }

    /// Delete the pipeline with the given name.
    pub async fn pipeline_delete(&self, pipeline: &str) -> Result<()> {
        self.request(&["pipeline_delete", pipeline]).await?;
        Ok(())
    }

    /// Get the pipeline graph in GraphViz dot format.
    pub async fn pipeline_get_graph(&self, pipeline: &str) -> Result<Option<Value>> {
        self.request(&["pipeline_get_graph", pipeline]).await
    }

    /// Enable or disable verbose output for the pipeline.
    pub async fn pipeline_verbose(&self, pipeline: &str, enabled: bool) -> Result<()> {
        self.request(&["pipeline_verbose", pipeline, bool_token(enabled)])
            .await?;
        Ok(())
    }

    // ---- Elements --------------------------------------------------------

    /// Set a property on an element of the given pipeline.
    ///
    /// `value` travels as text; format numbers and booleans the way
    /// gst-launch would.
    pub async fn element_set(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
        value: &str,
    ) -> Result<()> {
        self.request(&["element_set", pipeline, element, property, value])
            .await?;
        Ok(())
    }

    /// Query a property of an element in the given pipeline.
    ///
    /// # Errors
    ///
    /// A success envelope without a `value` field is reported as
    /// `ClientError::CorruptedResponse`.
    pub async fn element_get(
        &self,
        pipeline: &str,
        element: &str,
        property: &str,
    ) -> Result<Value> {
        let response = self
            .request(&["element_get", pipeline, element, property])
            .await?;
        required_field(response, "value")
    }

    // ---- Bus -------------------------------------------------------------

    /// Select the message types read from the bus, `+`-separated
    /// (e.g. `eos+warning+error`).
    pub async fn bus_filter(&self, pipeline: &str, filter: &str) -> Result<()> {
        self.request(&["bus_filter", pipeline, filter]).await?;
        Ok(())
    }

    /// Read the pipeline bus, waiting according to the daemon-side bus
    /// timeout. Returns `None` when no message was available.
    pub async fn bus_read(&self, pipeline: &str) -> Result<Option<Value>> {
        self.request(&["bus_read", pipeline]).await
    }

    /// Set the daemon-side bus polling bound in nanoseconds: `-1` waits
    /// forever, `0` returns immediately.
    pub async fn bus_timeout(&self, pipeline: &str, timeout_ns: i64) -> Result<()> {
        let timeout_ns = timeout_ns.to_string();
        self.request(&["bus_timeout", pipeline, &timeout_ns]).await?;
        Ok(())
    }

    // ---- Events ----------------------------------------------------------

    /// Send an end-of-stream event to the pipeline.
    pub async fn event_eos(&self, pipeline: &str) -> Result<()> {
        self.request(&["event_eos", pipeline]).await?;
        Ok(())
    }

    /// Put the pipeline in flushing mode.
    pub async fn event_flush_start(&self, pipeline: &str) -> Result<()> {
        self.request(&["event_flush_start", pipeline]).await?;
        Ok(())
    }

    /// Take the pipeline out of flushing mode.
    pub async fn event_flush_stop(&self, pipeline: &str, reset: bool) -> Result<()> {
        self.request(&["event_flush_stop", pipeline, bool_token(reset)])
            .await?;
        Ok(())
    }

    /// Perform a seek in the given pipeline.
    ///
    /// # Arguments
    ///
    /// * `rate` - Playback rate; must be finite
    /// * `format` - Format of the seek values (3 = time)
    /// * `flags` - Seek flags (1 = flush)
    /// * `start_type` / `start` - Type and value of the new start position
    /// * `end_type` / `end` - Type and value of the new end position
    ///   (`-1` keeps the current end)
    ///
    /// # Errors
    ///
    /// A non-finite `rate` fails with `ClientError::MalformedRequest`
    /// before any I/O.
    #[allow(clippy::too_many_arguments)]
    pub async fn event_seek(
        &self,
        pipeline: &str,
        rate: f64,
        format: i32,
        flags: i32,
        start_type: i32,
        start: i64,
        end_type: i32,
        end: i64,
    ) -> Result<()> {
        let rate = float_token(rate)?;
        let format = format.to_string();
        let flags = flags.to_string();
        let start_type = start_type.to_string();
        let start = start.to_string();
        let end_type = end_type.to_string();
        let end = end.to_string();
        self.request(&[
            "event_seek",
            pipeline,
            &rate,
            &format,
            &flags,
            &start_type,
            &start,
            &end_type,
            &end,
        ])
        .await?;
        Ok(())
    }

    // ---- Signals ---------------------------------------------------------

    /// Connect to a signal and wait for it to fire. Returns the signal
    /// payload, or `None` when the daemon reports none.
    pub async fn signal_connect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
    ) -> Result<Option<Value>> {
        self.request(&["signal_connect", pipeline, element, signal])
            .await
    }

    /// Disconnect from a signal.
    pub async fn signal_disconnect(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
    ) -> Result<()> {
        self.request(&["signal_disconnect", pipeline, element, signal])
            .await?;
        Ok(())
    }

    /// Set the daemon-side signal wait bound in microseconds: `-1` waits
    /// forever, `0` returns immediately.
    pub async fn signal_timeout(
        &self,
        pipeline: &str,
        element: &str,
        signal: &str,
        timeout_us: i64,
    ) -> Result<()> {
        let timeout_us = timeout_us.to_string();
        self.request(&["signal_timeout", pipeline, element, signal, &timeout_us])
            .await?;
        Ok(())
    }

    // ---- Generic resources -----------------------------------------------

    /// Create a resource at the given URI.
    pub async fn create(&self, uri: &str, property: &str, value: &str) -> Result<()> {
        self.request(&["create", uri, property, value]).await?;
        Ok(())
    }

    /// Read the resource held at the given URI.
    pub async fn read(&self, uri: &str) -> Result<Option<Value>> {
        self.request(&["read", uri]).await
    }

    /// Update the resource at the given URI.
    pub async fn update(&self, uri: &str, value: &str) -> Result<()> {
        self.request(&["update", uri, value]).await?;
        Ok(())
    }

    /// Delete the named resource under the given URI.
    pub async fn delete(&self, uri: &str, name: &str) -> Result<()> {
        self.request(&["delete", uri, name]).await?;
        Ok(())
    }

    // ---- Listings --------------------------------------------------------

    /// List the existing pipelines.
    pub async fn list_pipelines(&self) -> Result<Vec<Node>> {
        let response = self.request(&["list_pipelines"]).await?;
        node_list(response)
    }

    /// List the elements of the given pipeline.
    pub async fn list_elements(&self, pipeline: &str) -> Result<Vec<Node>> {
        let response = self.request(&["list_elements", pipeline]).await?;
        node_list(response)
    }

    /// List the properties of an element in the given pipeline.
    pub async fn list_properties(&self, pipeline: &str, element: &str) -> Result<Vec<Node>> {
        let response = self
            .request(&["list_properties", pipeline, element])
            .await?;
        node_list(response)
    }

    /// List the signals of an element in the given pipeline.
    pub async fn list_signals(&self, pipeline: &str, element: &str) -> Result<Vec<Node>> {
        let response = self.request(&["list_signals", pipeline, element]).await?;
        node_list(response)
    }

    // ---- Debug -----------------------------------------------------------

    /// Enable or disable GStreamer debug output.
    pub async fn debug_enable(&self, enabled: bool) -> Result<()> {
        self.request(&["debug_enable", bool_token(enabled)]).await?;
        Ok(())
    }

    /// Enable or disable color in the debug output.
    pub async fn debug_color(&self, colors: bool) -> Result<()> {
        self.request(&["debug_color", bool_token(colors)]).await?;
        Ok(())
    }

    /// Enable or disable debug threshold reset.
    pub async fn debug_reset(&self, reset: bool) -> Result<()> {
        self.request(&["debug_reset", bool_token(reset)]).await?;
        Ok(())
    }

    /// Set the debug threshold, gst-launch style (e.g. `*:3`).
    pub async fn debug_threshold(&self, threshold: &str) -> Result<()> {
        self.request(&["debug_threshold", threshold]).await?;
        Ok(())
    }
}

/// Extract a required field from a success payload.
fn required_field(response: Option<Value>, key: &str) -> Result<Value> {
    response
        .as_ref()
        .and_then(|payload| payload.get(key))
        .cloned()
        .ok_or_else(|| {
            ClientError::CorruptedResponse(format!("response is missing the {key:?} field"))
        })
}

/// Decode the `nodes` array of a list response.
fn node_list(response: Option<Value>) -> Result<Vec<Node>> {
    let nodes = required_field(response, "nodes")?;
    serde_json::from_value(nodes).map_err(|e| ClientError::CorruptedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_required_field_extracts_value() {
        let payload = Some(json!({"name": "pattern", "value": "18"}));
        let value = required_field(payload, "value").expect("Field missing");
        assert_eq!(value, json!("18"));
    }

    #[test]
    fn test_required_field_missing_is_corrupted() {
        let payload = Some(json!({"name": "pattern"}));
        let result = required_field(payload, "value");
        assert!(matches!(result, Err(ClientError::CorruptedResponse(_))));

        let result = required_field(None, "value");
        assert!(matches!(result, Err(ClientError::CorruptedResponse(_))));
    }

    #[test]
    fn test_node_list_decodes_names() {
        let payload = Some(json!({"nodes": [{"name": "p0"}, {"name": "p1"}]}));
        let nodes = node_list(payload).expect("Decode failed");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "p0");
        assert_eq!(nodes[1].name, "p1");
    }

    #[test]
    fn test_node_list_rejects_malformed_nodes() {
        let payload = Some(json!({"nodes": [{"title": "no name key"}]}));
        let result = node_list(payload);
        assert!(matches!(result, Err(ClientError::CorruptedResponse(_))));
    }
}

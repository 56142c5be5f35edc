//! Response envelope and command-line encoding rules.
//!
//! Every gstd reply is a JSON object with the same three keys (`code`,
//! `description`, `response`); [`Envelope`] decodes it with serde and
//! [`Envelope::into_result`] is the single place the `code` field is
//! checked. Command arguments travel as positional string tokens; the
//! helpers at the bottom of this module define the canonical token form for
//! non-string argument types.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// A decoded daemon response.
///
/// Invariant: `code == 0` iff the operation succeeded, and `response` is
/// only meaningful on success. Use [`Envelope::into_result`] rather than
/// reading `response` directly so the invariant holds everywhere.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Daemon return code; 0 means success.
    pub code: i32,
    /// Human-readable outcome, e.g. `"Success"` or the failure reason.
    pub description: String,
    /// Operation-specific payload. Absent and `null` both decode to `None`.
    #[serde(default)]
    pub response: Option<Value>,
}

impl Envelope {
    /// Parse the raw text received from the daemon.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::CorruptedResponse` if the text is not valid
    /// JSON or lacks the required `code`/`description` keys.
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| ClientError::CorruptedResponse(e.to_string()))
    }

    /// Turn the envelope into the operation outcome.
    ///
    /// A nonzero `code` becomes `ClientError::DaemonRejected` carrying the
    /// daemon's code and description verbatim; on success the payload is
    /// returned as-is.
    pub fn into_result(self) -> Result<Option<Value>> {
        if self.code != 0 {
            return Err(ClientError::DaemonRejected {
                code: self.code,
                description: self.description,
            });
        }
        Ok(self.response)
    }
}

/// One entry of a `nodes` listing.
///
/// gstd lists resources (pipelines, elements, properties, signals) as
/// `{"nodes": [{"name": ...}, ...]}`; unknown extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    /// The resource name in the daemon's namespace.
    pub name: String,
}

/// Canonical token for a boolean argument.
pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Canonical token for a float argument.
///
/// NaN and infinities have no decimal form the daemon could parse, so they
/// are rejected before any I/O.
pub(crate) fn float_token(value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(ClientError::MalformedRequest(format!(
            "non-finite number {value} cannot be sent"
        )));
    }
    Ok(value.to_string())
}

//! Inbound message glue between rendered content and the callback bridge.
//!
//! Content calls `window.host.notify(...)` / `window.host.log(...)`; the
//! engine delivers those as a JSON envelope on one of its own threads.
//! Everything here is defensive: malformed input and unknown kinds are
//! logged and dropped, never surfaced as errors.

use serde::{Deserialize, Serialize};
use tether_bridge::ContentCallbacks;
use tracing::warn;

/// Message kinds rendered content is allowed to send. Anything else is
/// rejected and logged.
pub const ALLOWED_CONTENT_KINDS: &[&str] = &["notify", "log"];

/// A message from rendered content to the bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// The entry point being invoked.
    pub kind: String,
    /// The message payload.
    pub payload: InboundPayload,
}

/// Payload of an inbound message — a plain string or arbitrary JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InboundPayload {
    Text(String),
    Json(serde_json::Value),
    None,
}

impl InboundMessage {
    /// Parse from the raw JSON the engine hands over.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

impl InboundPayload {
    /// The payload as text, if it carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            InboundPayload::Text(s) => Some(s),
            InboundPayload::Json(serde_json::Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

/// Whether a content message kind is in the allowlist.
pub fn is_kind_allowed(kind: &str) -> bool {
    ALLOWED_CONTENT_KINDS.contains(&kind)
}

/// Validate one raw inbound message and forward it to the callback bridge.
pub fn dispatch_inbound(callbacks: &dyn ContentCallbacks, raw: &str) {
    let Some(msg) = InboundMessage::from_json(raw) else {
        warn!(body_len = raw.len(), "content message rejected: failed to parse");
        return;
    };

    if !is_kind_allowed(&msg.kind) {
        warn!(kind = %msg.kind, "content message rejected: unknown kind");
        return;
    }

    let Some(text) = msg.payload.text() else {
        warn!(kind = %msg.kind, "content message rejected: missing text payload");
        return;
    };

    match msg.kind.as_str() {
        "notify" => callbacks.notify(text),
        "log" => callbacks.log(text),
        _ => {}
    }
}

/// JavaScript bootstrap evaluated when the surface is created. Exposes the
/// two fixed entry points to content as `window.host`.
pub const CONTENT_BOOTSTRAP_SCRIPT: &str = r#"
(function() {
    window.host = window.host || {};
    window.host.notify = function(message) {
        window.ipc.postMessage(JSON.stringify({ kind: "notify", payload: String(message) }));
    };
    window.host.log = function(message) {
        window.ipc.postMessage(JSON.stringify({ kind: "log", payload: String(message) }));
    };
})();
"#;

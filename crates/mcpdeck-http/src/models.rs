//! Wire envelopes for dashboard API payloads.
//!
//! The backend is not consistent about wrapping collections, so list
//! responses accept both a bare array and an object wrapper.

use mcpdeck_core::{BasicServerInfo, ServerDetail, ServerLogEntry, ToolPreference};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServerListEnvelope {
    Wrapped { servers: Vec<BasicServerInfo> },
    Bare(Vec<BasicServerInfo>),
}

impl ServerListEnvelope {
    pub fn into_servers(self) -> Vec<BasicServerInfo> {
        match self {
            Self::Wrapped { servers } | Self::Bare(servers) => servers,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ServerDetailEnvelope {
    Wrapped { server: ServerDetail },
    Bare(ServerDetail),
}

impl ServerDetailEnvelope {
    pub fn into_detail(self) -> ServerDetail {
        match self {
            Self::Wrapped { server } | Self::Bare(server) => server,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LogsEnvelope {
    Wrapped { logs: Vec<ServerLogEntry> },
    Bare(Vec<ServerLogEntry>),
}

impl LogsEnvelope {
    pub fn into_entries(self) -> Vec<ServerLogEntry> {
        match self {
            Self::Wrapped { logs } | Self::Bare(logs) => logs,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PreferencesEnvelope {
    Wrapped { preferences: Vec<ToolPreference> },
    Bare(Vec<ToolPreference>),
}

impl PreferencesEnvelope {
    pub fn into_preferences(self) -> Vec<ToolPreference> {
        match self {
            Self::Wrapped { preferences } | Self::Bare(preferences) => preferences,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferenceRequest {
    pub is_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct BulkPreferencesRequest<'a> {
    pub preferences: &'a [ToolPreference],
}

/// Pull a human-readable message out of an error body.
pub fn error_message(body: Option<&Value>, status: u16) -> String {
    let from_body = body.and_then(|body| match body {
        Value::String(text) => Some(text.clone()),
        Value::Object(map) => ["error", "message", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    });

    from_body.unwrap_or_else(|| format!("HTTP {status}"))
}

/// Extract the partial server object carried by a 408 body.
///
/// Looks for a `server` field first, then accepts the body itself when it
/// looks like a server fragment.
pub fn timeout_partial(body: Option<&Value>) -> Option<ServerDetail> {
    let body = body?.as_object()?;

    if let Some(server) = body.get("server") {
        return serde_json::from_value(server.clone()).ok();
    }

    let looks_like_server = ["name", "status", "tools", "toolsCount"]
        .iter()
        .any(|key| body.contains_key(*key));
    if looks_like_server {
        serde_json::from_value(Value::Object(body.clone())).ok()
    } else {
        None
    }
}

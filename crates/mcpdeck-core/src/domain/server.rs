//! Server status model.
//!
//! A `ServerRecord` is assembled in two steps: the cheap list-derived view
//! (`BasicServerInfo`) creates it with a `Loading` placeholder status, and the
//! health-probe-backed view (`ServerDetail`) is merged into it later.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ServerId;

/// Connection status of a remote server.
///
/// The derived ordering follows declaration order, which ranks statuses by
/// how much is known about the server rather than by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    /// Basic info is published, detailed info has not arrived yet.
    ///
    /// Never persisted; only exists between the two load phases.
    Loading,
    /// The backend is still establishing the connection.
    Connecting,
    /// Connected and serving tools.
    Online,
    /// Not running or not reachable.
    Offline,
    /// The health probe exceeded the backend's budget.
    Timeout,
    /// The detail request failed.
    Error,
}

impl ServerStatus {
    /// True for the transient bootstrap status.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// True once the status reflects an actual probe or a terminal failure.
    pub const fn is_settled(self) -> bool {
        !self.is_placeholder()
    }

    /// True when the presentation should offer a retry.
    pub const fn needs_retry(self) -> bool {
        matches!(self, Self::Timeout | Self::Error)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Connecting => "connecting",
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport used by the backend to talk to the server process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportType {
    #[default]
    Stdio,
    Sse,
    StreamableHttp,
    /// Any transport this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A tool exposed by a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique within a server.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Parameter description, kept opaque.
    #[serde(default, alias = "inputSchema")]
    pub schema: serde_json::Value,
}

impl Tool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            schema: serde_json::Value::Null,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// List-derived server view: identity and configuration, no live status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicServerInfo {
    pub id: ServerId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub transport_type: TransportType,
    #[serde(default)]
    pub disabled: bool,
}

impl BasicServerInfo {
    pub fn new(id: impl Into<ServerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            command: String::new(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            transport_type: TransportType::default(),
            disabled: false,
        }
    }
}

/// Health-probe-backed server view.
///
/// Every field is optional: a timeout body may carry only a fragment, and
/// absent fields never overwrite what is already known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ServerStatus>,
    #[serde(default)]
    pub tools: Option<Vec<Tool>>,
    #[serde(default)]
    pub tools_count: Option<u32>,
    #[serde(default)]
    pub last_connected: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Option<Vec<String>>,
    #[serde(default)]
    pub env: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub cwd: Option<String>,
    #[serde(default)]
    pub transport_type: Option<TransportType>,
    #[serde(default)]
    pub disabled: Option<bool>,
}

/// Everything the dashboard knows about one server.
///
/// While `status` is `Loading`, `tools` and `tools_count` are placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: ServerId,
    pub name: String,
    pub description: Option<String>,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<String>,
    pub transport_type: TransportType,
    pub status: ServerStatus,
    pub disabled: bool,
    pub tools_count: u32,
    pub tools: Vec<Tool>,
    pub last_connected: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl ServerRecord {
    /// Build the phase-one record from list data.
    pub fn from_basic(info: BasicServerInfo) -> Self {
        Self {
            id: info.id,
            name: info.name,
            description: info.description,
            command: info.command,
            args: info.args,
            env: info.env,
            cwd: info.cwd,
            transport_type: info.transport_type,
            status: ServerStatus::Loading,
            disabled: info.disabled,
            tools_count: 0,
            tools: Vec::new(),
            last_connected: None,
            last_error: None,
        }
    }

    /// Merge a successful detail response.
    ///
    /// Runtime fields replace the placeholders. Name and description are only
    /// replaced when the detail carries them.
    pub fn merge_detail(&mut self, detail: ServerDetail) {
        let status = detail.status;
        self.merge_fields(detail, true);
        self.status = match status {
            Some(status) if status.is_settled() => status,
            // A detail response without a usable status still ends the
            // placeholder phase.
            _ if self.status.is_placeholder() => ServerStatus::Offline,
            _ => self.status,
        };
    }

    /// Apply a health-probe timeout, merging whatever partial data came along.
    ///
    /// Known tools are never cleared by an empty partial list.
    pub fn apply_timeout(&mut self, partial: Option<ServerDetail>) {
        if let Some(partial) = partial {
            self.merge_fields(partial, false);
        }
        self.status = ServerStatus::Timeout;
    }

    /// Mark the detail request as failed, leaving every other field alone.
    pub fn mark_error(&mut self) {
        self.status = ServerStatus::Error;
    }

    /// Tool names in server order.
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|tool| tool.name.as_str())
    }

    fn merge_fields(&mut self, detail: ServerDetail, replace_empty_tools: bool) {
        if let Some(name) = detail.name.filter(|name| !name.is_empty()) {
            self.name = name;
        }
        if let Some(description) = detail.description.filter(|d| !d.is_empty()) {
            self.description = Some(description);
        }

        // The count always follows the list held; a bare `toolsCount` without
        // a tool list is not applied.
        if let Some(tools) = detail.tools {
            if replace_empty_tools || !tools.is_empty() {
                self.tools = tools;
            }
        }
        self.tools_count = u32::try_from(self.tools.len()).unwrap_or(u32::MAX);

        if detail.last_connected.is_some() {
            self.last_connected = detail.last_connected;
        }
        if detail.last_error.is_some() {
            self.last_error = detail.last_error;
        }
        if let Some(command) = detail.command {
            self.command = command;
        }
        if let Some(args) = detail.args {
            self.args = args;
        }
        if let Some(env) = detail.env {
            self.env = env;
        }
        if detail.cwd.is_some() {
            self.cwd = detail.cwd;
        }
        if let Some(transport_type) = detail.transport_type {
            self.transport_type = transport_type;
        }
        if let Some(disabled) = detail.disabled {
            self.disabled = disabled;
        }
    }
}

/// Response of the toggle endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResult {
    /// New disabled flag, when the backend reports it.
    #[serde(default)]
    pub disabled: Option<bool>,
}

/// Response of the refresh-status endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResult {
    #[serde(default)]
    pub tools_count: u32,
    #[serde(default)]
    pub status: Option<ServerStatus>,
}

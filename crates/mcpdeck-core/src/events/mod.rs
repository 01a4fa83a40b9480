//! User-facing notifications.
//!
//! The controller decides *when* a notification fires (every terminal
//! outcome of a load phase or action); adapters decide how to show it
//! (toast, terminal line, log record).
//!
//! # Wire Format
//!
//! Notifications are serialized with a `type` tag:
//!
//! ```json
//! { "type": "detail_timed_out", "serverName": "github" }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{ServerId, ServerStatus};

/// Mutating actions a user can trigger on a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerAction {
    Toggle,
    Restart,
    RefreshStatus,
    Delete,
}

impl ServerAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toggle => "toggle server",
            Self::Restart => "restart server",
            Self::RefreshStatus => "refresh status",
            Self::Delete => "delete server",
        }
    }
}

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Progress only; adapters may log it instead of showing it.
    Debug,
    Success,
    Info,
    Warning,
    Error,
}

/// Every notification the controller can emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    // ========== Load Events ==========
    /// Basic info was published; detailed info is still loading.
    BasicInfoLoaded {
        #[serde(rename = "serverName")]
        server_name: String,
    },

    /// Detailed info arrived and was merged.
    DetailLoaded {
        #[serde(rename = "serverName")]
        server_name: String,
        status: ServerStatus,
        #[serde(rename = "toolsCount")]
        tools_count: u32,
    },

    /// The backend's health probe timed out.
    DetailTimedOut {
        #[serde(rename = "serverName")]
        server_name: String,
    },

    /// The detail request failed for another reason.
    DetailFailed {
        #[serde(rename = "serverName")]
        server_name: String,
        message: String,
    },

    /// The server is not part of the project's server list.
    ServerNotFound {
        #[serde(rename = "serverId")]
        server_id: ServerId,
    },

    /// The server list itself could not be fetched.
    BasicInfoUnavailable {
        #[serde(rename = "serverId")]
        server_id: ServerId,
        message: String,
    },

    /// A manual retry was started.
    RetryingConnection {
        #[serde(rename = "serverName")]
        server_name: String,
    },

    // ========== Action Events ==========
    ServerToggled {
        #[serde(rename = "serverName")]
        server_name: String,
        enabled: bool,
    },

    ServerRestarted {
        #[serde(rename = "serverName")]
        server_name: String,
    },

    StatusRefreshed {
        #[serde(rename = "serverName")]
        server_name: String,
        #[serde(rename = "toolsCount")]
        tools_count: u32,
    },

    ServerDeleted {
        #[serde(rename = "serverName")]
        server_name: String,
    },

    ActionFailed {
        action: ServerAction,
        #[serde(rename = "serverName")]
        server_name: String,
        message: String,
    },

    /// An action was refused before any request was made.
    PermissionDenied {
        action: ServerAction,
        reason: String,
    },

    // ========== Tool Preference Events ==========
    ToolPreferenceUpdated {
        #[serde(rename = "toolName")]
        tool_name: String,
        enabled: bool,
    },

    ToolPreferencesUpdated {
        count: usize,
        /// Set when every entry in the batch had the same flag.
        #[serde(skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },

    ToolPreferenceFailed {
        message: String,
    },
}

impl Notification {
    pub const fn level(&self) -> NotificationLevel {
        match self {
            Self::BasicInfoLoaded { .. } => NotificationLevel::Debug,
            Self::DetailLoaded { status, .. } => match status {
                ServerStatus::Online => NotificationLevel::Success,
                _ => NotificationLevel::Info,
            },
            Self::RetryingConnection { .. } => NotificationLevel::Info,
            Self::DetailTimedOut { .. }
            | Self::BasicInfoUnavailable { .. }
            | Self::PermissionDenied { .. } => NotificationLevel::Warning,
            Self::DetailFailed { .. }
            | Self::ServerNotFound { .. }
            | Self::ActionFailed { .. }
            | Self::ToolPreferenceFailed { .. } => NotificationLevel::Error,
            Self::ServerToggled { .. }
            | Self::ServerRestarted { .. }
            | Self::StatusRefreshed { .. }
            | Self::ServerDeleted { .. }
            | Self::ToolPreferenceUpdated { .. }
            | Self::ToolPreferencesUpdated { .. } => NotificationLevel::Success,
        }
    }

    /// Human-readable text for toasts and terminal output.
    pub fn message(&self) -> String {
        match self {
            Self::BasicInfoLoaded { server_name } => {
                format!("Loaded {server_name}, checking health...")
            }
            Self::DetailLoaded {
                server_name,
                status,
                tools_count,
            } => format!("{server_name} is {status} with {tools_count} tool(s)"),
            Self::DetailTimedOut { server_name } => format!(
                "Health check for {server_name} timed out. Its configuration can still be reviewed."
            ),
            Self::DetailFailed {
                server_name,
                message,
            } => format!("Failed to load details for {server_name}: {message}"),
            Self::ServerNotFound { server_id } => format!("Server {server_id} was not found"),
            Self::BasicInfoUnavailable { server_id, message } => {
                format!("Could not load server {server_id}: {message}")
            }
            Self::RetryingConnection { server_name } => {
                format!("Retrying connection to {server_name}...")
            }
            Self::ServerToggled {
                server_name,
                enabled,
            } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                format!("{server_name} {state}")
            }
            Self::ServerRestarted { server_name } => format!("{server_name} restarted"),
            Self::StatusRefreshed {
                server_name,
                tools_count,
            } => format!("{server_name} refreshed: {tools_count} tool(s) available"),
            Self::ServerDeleted { server_name } => format!("{server_name} deleted"),
            Self::ActionFailed {
                action,
                server_name,
                message,
            } => format!("Failed to {} {server_name}: {message}", action.label()),
            Self::PermissionDenied { action, reason } => {
                format!("Cannot {}: {reason}", action.label())
            }
            Self::ToolPreferenceUpdated { tool_name, enabled } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                format!("Tool {tool_name} {state}")
            }
            Self::ToolPreferencesUpdated { count, enabled } => match enabled {
                Some(true) => format!("Enabled {count} tool(s)"),
                Some(false) => format!("Disabled {count} tool(s)"),
                None => format!("Updated {count} tool preference(s)"),
            },
            Self::ToolPreferenceFailed { message } => {
                format!("Failed to update tool preferences: {message}")
            }
        }
    }
}

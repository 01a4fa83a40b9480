//! Core domain types and port definitions for mcpdeck.
//!
//! This crate describes what a remote MCP server looks like from the
//! dashboard's point of view (the status model), the per-tool preference
//! model, and the ports the controller layer talks through. It performs no
//! I/O of its own.
//!
//! # Structure
//!
//! - `domain` - status model, tool preferences, log entries, identifiers
//! - `events` - user-facing notification union
//! - `permissions` - project role to edit capability resolution
//! - `ports` - backend and notifier traits plus the API error taxonomy

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod permissions;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    BasicServerInfo, LogLevel, LogQuery, ProjectId, RefreshResult, ServerDetail, ServerId,
    ServerLogEntry, ServerRecord, ServerStatus, ToggleResult, Tool, ToolPreference,
    ToolPreferenceKey, ToolPreferenceSummary, TransportType,
};
pub use events::{Notification, NotificationLevel, ServerAction};
pub use permissions::{EditCapability, ProjectRole};
pub use ports::{
    ApiError, ErrorKind, NoopNotifier, Notifier, ServerApiPort, ToolPreferencePort,
};

//! Domain types for the dashboard client.
//!
//! These types are shared between the HTTP adapter, the controller layer and
//! any presentation adapter. Wire field names are camelCase.

mod ids;
mod logs;
mod preference;
mod server;

pub use ids::{ProjectId, ServerId};
pub use logs::{LogLevel, LogQuery, ServerLogEntry};
pub use preference::{ToolPreference, ToolPreferenceKey, ToolPreferenceSummary};
pub use server::{
    BasicServerInfo, RefreshResult, ServerDetail, ServerRecord, ServerStatus, ToggleResult, Tool,
    TransportType,
};

//! Per-tool enable/disable preferences.
//!
//! A preference hides a tool from external tool-clients without touching the
//! server's own configuration. Missing entries mean "enabled".

use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, ServerId};

/// Composite key of a tool preference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolPreferenceKey {
    pub project_id: ProjectId,
    pub server_id: ServerId,
    pub tool_name: String,
}

impl ToolPreferenceKey {
    pub fn new(project_id: &ProjectId, server_id: &ServerId, tool_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.clone(),
            server_id: server_id.clone(),
            tool_name: tool_name.into(),
        }
    }
}

/// One preference entry as exchanged with the backend.
///
/// The project is implied by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPreference {
    pub server_id: ServerId,
    pub tool_name: String,
    pub is_enabled: bool,
}

impl ToolPreference {
    pub fn new(server_id: impl Into<ServerId>, tool_name: impl Into<String>, is_enabled: bool) -> Self {
        Self {
            server_id: server_id.into(),
            tool_name: tool_name.into(),
            is_enabled,
        }
    }
}

/// Counts derived from a tool list and the preference store.
///
/// Recomputed on demand, never cached. For an empty tool list both
/// `all_enabled` and `none_enabled` hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPreferenceSummary {
    pub enabled_count: usize,
    pub total_count: usize,
    pub all_enabled: bool,
    pub none_enabled: bool,
}

impl ToolPreferenceSummary {
    /// Summarize a sequence of per-tool enabled flags.
    pub fn from_flags(flags: impl IntoIterator<Item = bool>) -> Self {
        let (enabled_count, total_count) = flags
            .into_iter()
            .fold((0, 0), |(enabled, total), flag| {
                (enabled + usize::from(flag), total + 1)
            });

        Self {
            enabled_count,
            total_count,
            all_enabled: enabled_count == total_count,
            none_enabled: enabled_count == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let summary = ToolPreferenceSummary::from_flags([true, false, true]);
        assert_eq!(summary.enabled_count, 2);
        assert_eq!(summary.total_count, 3);
        assert!(!summary.all_enabled);
        assert!(!summary.none_enabled);
    }

    #[test]
    fn test_summary_none_enabled() {
        let summary = ToolPreferenceSummary::from_flags([false, false]);
        assert_eq!(summary.enabled_count, 0);
        assert!(summary.none_enabled);
        assert!(!summary.all_enabled);
    }

    #[test]
    fn test_summary_empty_list() {
        let summary = ToolPreferenceSummary::from_flags(std::iter::empty());
        assert_eq!(summary.total_count, 0);
        assert!(summary.all_enabled);
        assert!(summary.none_enabled);
    }

    #[test]
    fn test_preference_wire_format() {
        let json = serde_json::to_value(ToolPreference::new("s1", "t1", false)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"serverId": "s1", "toolName": "t1", "isEnabled": false})
        );
    }
}

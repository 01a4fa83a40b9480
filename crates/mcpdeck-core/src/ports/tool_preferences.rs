//! Tool preference endpoints of the dashboard backend.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{ProjectId, ServerId, ToolPreference};

/// Port for loading and storing per-tool enable flags.
#[async_trait]
pub trait ToolPreferencePort: Send + Sync {
    /// Load the stored preferences of one server.
    async fn load_preferences(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<Vec<ToolPreference>, ApiError>;

    /// Store a single preference.
    async fn update_preference(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tool_name: &str,
        is_enabled: bool,
    ) -> Result<(), ApiError>;

    /// Store a batch of preferences.
    ///
    /// The backend applies the batch atomically; callers only learn whether
    /// the whole batch succeeded.
    async fn update_preferences_bulk(
        &self,
        project: &ProjectId,
        preferences: &[ToolPreference],
    ) -> Result<(), ApiError>;
}

//! `ServerDetailController` - the facade a server detail view talks to.
//!
//! One controller per (project, server) pair. Loading is delegated to the
//! staged loader, mutations to `ActionOps`, tool flags to the
//! `ToolPreferenceController`.

use std::sync::Arc;

use mcpdeck_core::{
    EditCapability, LogQuery, ProjectId, ServerId, ServerLogEntry, ServerRecord,
    ToolPreferenceSummary,
};
use tokio::sync::watch;

use crate::actions::{ActionOps, ActionOutcome, UserConfirmed};
use crate::deps::ControllerDeps;
use crate::error::GuiError;
use crate::loader::{BasicLoad, ServerView, StagedLoader};
use crate::preferences::ToolPreferenceController;

/// Controller for one server's detail view.
///
/// # Construction
///
/// ```ignore
/// let controller = ServerDetailController::new(deps, project_id, server_id);
/// if let BasicLoad::Published { detail } = controller.load_server_detail().await {
///     // render the Loading record, then optionally wait for phase 2
///     let _ = detail.outcome().await;
/// }
/// ```
pub struct ServerDetailController {
    deps: ControllerDeps,
    loader: StagedLoader,
    tools: Arc<ToolPreferenceController>,
}

impl ServerDetailController {
    pub fn new(deps: ControllerDeps, project_id: ProjectId, server_id: ServerId) -> Self {
        let loader = StagedLoader::new(
            deps.servers.clone(),
            deps.notifier.clone(),
            project_id,
            server_id,
        );
        let tools = Arc::new(ToolPreferenceController::new(
            deps.preferences.clone(),
            deps.notifier.clone(),
        ));
        Self {
            deps,
            loader,
            tools,
        }
    }

    /// Share a preference store with other controllers.
    #[must_use]
    pub fn with_tool_preferences(mut self, tools: Arc<ToolPreferenceController>) -> Self {
        self.tools = tools;
        self
    }

    fn action_ops(&self) -> ActionOps<'_> {
        ActionOps::new(&self.deps.servers, &self.deps.notifier, &self.loader)
    }

    pub fn project_id(&self) -> &ProjectId {
        self.loader.project_id()
    }

    pub fn server_id(&self) -> &ServerId {
        self.loader.server_id()
    }

    // =========================================================================
    // Staged loading
    // =========================================================================

    /// Run phase 1 and start phase 2 in the background.
    pub async fn load_server_detail(&self) -> BasicLoad {
        self.loader.load().await
    }

    /// Same as `load_server_detail`, with a "retrying" notification first.
    pub async fn retry_connection(&self) -> BasicLoad {
        self.loader.retry().await
    }

    pub fn server(&self) -> Option<ServerRecord> {
        self.loader.server()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn view(&self) -> ServerView {
        self.loader.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<ServerView> {
        self.loader.subscribe()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub async fn toggle_server(
        &self,
        capability: &EditCapability,
    ) -> Result<ActionOutcome, GuiError> {
        self.action_ops().toggle(capability).await
    }

    pub async fn restart_server(
        &self,
        capability: &EditCapability,
    ) -> Result<ActionOutcome, GuiError> {
        self.action_ops().restart(capability).await
    }

    pub async fn refresh_status(
        &self,
        capability: &EditCapability,
    ) -> Result<ActionOutcome, GuiError> {
        self.action_ops().refresh_status(capability).await
    }

    pub async fn delete_server(
        &self,
        capability: &EditCapability,
        confirmed: UserConfirmed,
    ) -> Result<ActionOutcome, GuiError> {
        self.action_ops().delete(capability, confirmed).await
    }

    // =========================================================================
    // Tool preferences
    // =========================================================================

    pub fn tool_preferences(&self) -> &Arc<ToolPreferenceController> {
        &self.tools
    }

    pub fn is_tool_enabled(&self, tool_name: &str) -> bool {
        self.tools
            .is_tool_enabled(self.project_id(), self.server_id(), tool_name)
    }

    pub fn is_bulk_updating(&self) -> bool {
        self.tools.is_bulk_updating(self.server_id())
    }

    pub async fn load_tool_preferences(&self) -> Result<usize, GuiError> {
        self.tools
            .load_tool_preferences(self.project_id(), self.server_id())
            .await
    }

    pub async fn update_tool_preference(
        &self,
        tool_name: &str,
        is_enabled: bool,
    ) -> Result<(), GuiError> {
        self.tools
            .update_tool_preference(self.project_id(), self.server_id(), tool_name, is_enabled)
            .await
    }

    /// Enable or disable every tool the current record lists.
    pub async fn set_all_tools(&self, enabled: bool) -> Result<(), GuiError> {
        let server = self.server().ok_or(GuiError::NotLoaded)?;
        self.tools
            .set_all_tools(self.project_id(), &server.id, &server.tools, enabled)
            .await
    }

    /// Derived counts over the current record's tools.
    pub fn tool_summary(&self) -> ToolPreferenceSummary {
        let tools = self.server().map(|s| s.tools).unwrap_or_default();
        self.tools
            .summary(self.project_id(), self.server_id(), &tools)
    }

    // =========================================================================
    // Logs
    // =========================================================================

    pub async fn server_logs(&self, query: &LogQuery) -> Result<Vec<ServerLogEntry>, GuiError> {
        self.deps
            .servers
            .server_logs(self.project_id(), self.server_id(), query)
            .await
            .map_err(GuiError::from)
    }
}

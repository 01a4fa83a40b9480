//! Server endpoints of the dashboard backend.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{
    BasicServerInfo, LogQuery, ProjectId, RefreshResult, ServerDetail, ServerId, ServerLogEntry,
    ToggleResult,
};

/// Port for reading and controlling a project's servers.
///
/// Session credentials are the adapter's concern; implementations carry
/// them implicitly on every request.
#[async_trait]
pub trait ServerApiPort: Send + Sync {
    /// List the project's servers (basic info, no health probe).
    async fn list_servers(&self, project: &ProjectId) -> Result<Vec<BasicServerInfo>, ApiError>;

    /// Fetch the health-probe-backed detail of one server.
    ///
    /// A probe timeout is reported as `ApiError::Timeout`.
    async fn get_server(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<ServerDetail, ApiError>;

    /// Flip the server's enabled/disabled flag.
    async fn toggle_server(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<ToggleResult, ApiError>;

    /// Restart the remote server process.
    async fn restart_server(&self, project: &ProjectId, server: &ServerId)
    -> Result<(), ApiError>;

    /// Force a fresh health probe.
    async fn refresh_status(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<RefreshResult, ApiError>;

    /// Remove the server from the project.
    async fn delete_server(&self, project: &ProjectId, server: &ServerId) -> Result<(), ApiError>;

    /// Fetch captured log lines.
    async fn server_logs(
        &self,
        project: &ProjectId,
        server: &ServerId,
        query: &LogQuery,
    ) -> Result<Vec<ServerLogEntry>, ApiError>;
}

//! Dashboard client implementing the core ports.
//!
//! Status interpretation lives here: 404 becomes `NotFound`, 408 becomes
//! `Timeout` with any partial server body, 400/422 become `Validation`, and
//! every other non-success status becomes `Remote`.

use async_trait::async_trait;
use mcpdeck_core::{
    ApiError, BasicServerInfo, LogQuery, ProjectId, RefreshResult, ServerApiPort, ServerDetail,
    ServerId, ServerLogEntry, ToggleResult, ToolPreference, ToolPreferencePort,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::DashboardClientConfig;
use crate::endpoints::Endpoints;
use crate::error::HttpResult;
use crate::http::{HttpBackend, HttpMethod, HttpRequest, HttpResponse, ReqwestBackend};
use crate::models::{
    BulkPreferencesRequest, LogsEnvelope, PreferencesEnvelope, ServerDetailEnvelope,
    ServerListEnvelope, UpdatePreferenceRequest, error_message, timeout_partial,
};

/// Dashboard API client, generic over its transport.
pub struct DashboardClient<B: HttpBackend> {
    backend: B,
    endpoints: Endpoints,
}

/// Client backed by reqwest.
pub type DefaultDashboardClient = DashboardClient<ReqwestBackend>;

impl DefaultDashboardClient {
    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &DashboardClientConfig) -> HttpResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        Self::with_backend(backend, &config.base_url)
    }
}

impl<B: HttpBackend> DashboardClient<B> {
    /// Build a client over an arbitrary transport.
    pub fn with_backend(backend: B, base_url: &str) -> HttpResult<Self> {
        Ok(Self {
            backend,
            endpoints: Endpoints::new(base_url)?,
        })
    }

    async fn execute(
        &self,
        request: HttpRequest,
        entity: &'static str,
        id: &str,
    ) -> Result<Option<Value>, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.backend.send(request).await?;
        debug!(?method, url = %url, status = response.status, "Dashboard API response");
        interpret(response, entity, id)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        entity: &'static str,
        id: &str,
    ) -> Result<T, ApiError> {
        let body = self
            .execute(HttpRequest::new(HttpMethod::Get, url), entity, id)
            .await?
            .ok_or_else(|| ApiError::InvalidResponse("empty response body".to_string()))?;
        decode(body)
    }

    /// Send a mutation; an empty success body decodes to `T::default()`.
    async fn mutate<T: DeserializeOwned + Default>(
        &self,
        request: HttpRequest,
        entity: &'static str,
        id: &str,
    ) -> Result<T, ApiError> {
        match self.execute(request, entity, id).await? {
            None => Ok(T::default()),
            Some(Value::Object(map)) if map.is_empty() => Ok(T::default()),
            Some(body) => decode(body),
        }
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn interpret(response: HttpResponse, entity: &'static str, id: &str) -> Result<Option<Value>, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }

    let body = response.body.as_ref();
    match response.status {
        404 => Err(ApiError::NotFound {
            entity,
            id: id.to_string(),
        }),
        408 => {
            warn!(entity, id, "Backend reported a health-check timeout");
            Err(ApiError::Timeout {
                partial: timeout_partial(body).map(Box::new),
            })
        }
        400 | 422 => Err(ApiError::Validation(error_message(body, response.status))),
        status => Err(ApiError::remote(status, error_message(body, status))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl<B: HttpBackend> ServerApiPort for DashboardClient<B> {
    async fn list_servers(&self, project: &ProjectId) -> Result<Vec<BasicServerInfo>, ApiError> {
        let url = self.endpoints.servers(project)?;
        let envelope: ServerListEnvelope = self.get(url, "project", project.as_str()).await?;
        Ok(envelope.into_servers())
    }

    async fn get_server(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<ServerDetail, ApiError> {
        let url = self.endpoints.server(project, server)?;
        let envelope: ServerDetailEnvelope = self.get(url, "server", server.as_str()).await?;
        Ok(envelope.into_detail())
    }

    async fn toggle_server(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<ToggleResult, ApiError> {
        let url = self.endpoints.server_action(project, server, "toggle")?;
        self.mutate(HttpRequest::new(HttpMethod::Post, url), "server", server.as_str())
            .await
    }

    async fn restart_server(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.server_action(project, server, "restart")?;
        self.execute(HttpRequest::new(HttpMethod::Post, url), "server", server.as_str())
            .await
            .map(|_| ())
    }

    async fn refresh_status(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<RefreshResult, ApiError> {
        let url = self
            .endpoints
            .server_action(project, server, "refresh-status")?;
        self.mutate(HttpRequest::new(HttpMethod::Post, url), "server", server.as_str())
            .await
    }

    async fn delete_server(&self, project: &ProjectId, server: &ServerId) -> Result<(), ApiError> {
        let url = self.endpoints.server(project, server)?;
        self.execute(HttpRequest::new(HttpMethod::Delete, url), "server", server.as_str())
            .await
            .map(|_| ())
    }

    async fn server_logs(
        &self,
        project: &ProjectId,
        server: &ServerId,
        query: &LogQuery,
    ) -> Result<Vec<ServerLogEntry>, ApiError> {
        let url = self.endpoints.logs(project, server, query)?;
        let envelope: LogsEnvelope = self.get(url, "server", server.as_str()).await?;
        Ok(envelope.into_entries())
    }
}

#[async_trait]
impl<B: HttpBackend> ToolPreferencePort for DashboardClient<B> {
    async fn load_preferences(
        &self,
        project: &ProjectId,
        server: &ServerId,
    ) -> Result<Vec<ToolPreference>, ApiError> {
        let url = self.endpoints.tool_preferences(project, server)?;
        let envelope: PreferencesEnvelope = self.get(url, "server", server.as_str()).await?;
        Ok(envelope.into_preferences())
    }

    async fn update_preference(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tool_name: &str,
        is_enabled: bool,
    ) -> Result<(), ApiError> {
        let url = self.endpoints.tool_preference(project, server, tool_name)?;
        let body = to_json(&UpdatePreferenceRequest { is_enabled })?;
        self.execute(
            HttpRequest::new(HttpMethod::Put, url).with_json(body),
            "tool",
            tool_name,
        )
        .await
        .map(|_| ())
    }

    async fn update_preferences_bulk(
        &self,
        project: &ProjectId,
        preferences: &[ToolPreference],
    ) -> Result<(), ApiError> {
        let url = self.endpoints.tool_preferences_bulk(project)?;
        let body = to_json(&BulkPreferencesRequest { preferences })?;
        self.execute(
            HttpRequest::new(HttpMethod::Post, url).with_json(body),
            "project",
            project.as_str(),
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use mcpdeck_core::ServerStatus;
    use serde_json::json;
    use tokio_test::assert_err;

    const BASE: &str = "http://dash.test";

    fn client(backend: FakeBackend) -> DashboardClient<FakeBackend> {
        DashboardClient::with_backend(backend, BASE).unwrap()
    }

    fn ids() -> (ProjectId, ServerId) {
        (ProjectId::new("p1"), ServerId::new("s1"))
    }

    #[tokio::test]
    async fn test_list_servers() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/api/projects/p1/servers",
            HttpResponse::new(200, Some(json!([{"id": "s1", "name": "github"}]))),
        );
        let (project, _) = ids();

        let servers = client(backend).list_servers(&project).await.unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].id, ServerId::new("s1"));
    }

    #[tokio::test]
    async fn test_get_server_detail() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/servers/s1",
            HttpResponse::new(
                200,
                Some(json!({
                    "status": "online",
                    "tools": [{"name": "A"}, {"name": "B", "inputSchema": {"type": "object"}}],
                    "toolsCount": 2
                })),
            ),
        );
        let (project, server) = ids();

        let detail = client(backend).get_server(&project, &server).await.unwrap();
        assert_eq!(detail.status, Some(ServerStatus::Online));
        let tools = detail.tools.unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[1].schema, json!({"type": "object"}));
    }

    #[tokio::test]
    async fn test_408_maps_to_timeout_with_partial() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/servers/s1",
            HttpResponse::new(
                408,
                Some(json!({"error": "Health check timeout", "server": {"name": "github"}})),
            ),
        );
        let (project, server) = ids();

        let err = assert_err!(client(backend).get_server(&project, &server).await);
        match err {
            ApiError::Timeout { partial } => {
                assert_eq!(partial.and_then(|p| p.name), Some("github".to_string()));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_408_without_body() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/servers/s1",
            HttpResponse::new(408, None),
        );
        let (project, server) = ids();

        let err = assert_err!(client(backend).get_server(&project, &server).await);
        assert!(matches!(err, ApiError::Timeout { partial: None }));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let backend = FakeBackend::new()
            .with_route(
                HttpMethod::Post,
                "/toggle",
                HttpResponse::new(500, Some(json!({"message": "process crashed"}))),
            )
            .with_route(
                HttpMethod::Post,
                "/restart",
                HttpResponse::new(422, Some(json!({"error": "server disabled"}))),
            );
        let (project, server) = ids();
        let client = client(backend);

        let toggle = assert_err!(client.toggle_server(&project, &server).await);
        assert!(matches!(
            toggle,
            ApiError::Remote { status: 500, ref message } if message == "process crashed"
        ));

        let restart = assert_err!(client.restart_server(&project, &server).await);
        assert!(matches!(restart, ApiError::Validation(ref m) if m == "server disabled"));

        let delete = assert_err!(client.delete_server(&project, &server).await);
        assert!(matches!(delete, ApiError::NotFound { entity: "server", .. }));
    }

    #[tokio::test]
    async fn test_mutations_accept_empty_bodies() {
        let backend = FakeBackend::new()
            .with_route(HttpMethod::Post, "/toggle", HttpResponse::new(204, None))
            .with_route(
                HttpMethod::Post,
                "/refresh-status",
                HttpResponse::new(200, Some(json!({"toolsCount": 4}))),
            );
        let (project, server) = ids();
        let client = client(backend);

        let toggled = client.toggle_server(&project, &server).await.unwrap();
        assert_eq!(toggled, ToggleResult::default());

        let refreshed = client.refresh_status(&project, &server).await.unwrap();
        assert_eq!(refreshed.tools_count, 4);
    }

    #[tokio::test]
    async fn test_bulk_preferences_body() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Post,
            "/tool-preferences/bulk",
            HttpResponse::new(200, Some(json!({"success": true}))),
        );
        let (project, _) = ids();
        let client = client(backend.clone());

        let prefs = [
            ToolPreference::new("s1", "t1", false),
            ToolPreference::new("s1", "t2", false),
        ];
        client.update_preferences_bulk(&project, &prefs).await.unwrap();

        let sent = backend.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].body,
            Some(json!({"preferences": [
                {"serverId": "s1", "toolName": "t1", "isEnabled": false},
                {"serverId": "s1", "toolName": "t2", "isEnabled": false}
            ]}))
        );
    }

    #[tokio::test]
    async fn test_load_preferences_sends_server_filter() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/tool-preferences",
            HttpResponse::new(
                200,
                Some(json!({"preferences": [{"serverId": "s1", "toolName": "t1", "isEnabled": false}]})),
            ),
        );
        let (project, server) = ids();
        let client = client(backend.clone());

        let prefs = client.load_preferences(&project, &server).await.unwrap();
        assert_eq!(prefs, vec![ToolPreference::new("s1", "t1", false)]);
        assert_eq!(backend.requests()[0].url.query(), Some("serverId=s1"));
    }

    #[tokio::test]
    async fn test_single_preference_validation_error() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Put,
            "/preference",
            HttpResponse::new(400, Some(json!({"error": "unknown tool"}))),
        );
        let (project, server) = ids();

        let err = assert_err!(
            client(backend)
                .update_preference(&project, &server, "ghost", false)
                .await
        );
        assert!(matches!(err, ApiError::Validation(ref m) if m == "unknown tool"));
    }

    #[tokio::test]
    async fn test_get_with_empty_body_is_invalid() {
        let backend = FakeBackend::new().with_route(
            HttpMethod::Get,
            "/logs",
            HttpResponse::new(200, None),
        );
        let (project, server) = ids();

        let err = assert_err!(
            client(backend)
                .server_logs(&project, &server, &LogQuery::new())
                .await
        );
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }
}

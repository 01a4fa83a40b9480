//! URL construction for dashboard API endpoints.
//!
//! Path segments are appended with `path_segments_mut`, so identifiers and
//! tool names are percent-encoded and a base URL with a path prefix keeps it.

use mcpdeck_core::{LogQuery, ProjectId, ServerId};
use url::Url;

use crate::error::{HttpError, HttpResult};

/// Builds endpoint URLs relative to the configured base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> HttpResult<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(HttpError::UnusableBaseUrl(base_url.to_string()));
        }
        Ok(Self { base })
    }

    fn build<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> HttpResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| HttpError::UnusableBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET /api/projects/{p}/servers`
    pub fn servers(&self, project: &ProjectId) -> HttpResult<Url> {
        self.build(["api", "projects", project.as_str(), "servers"])
    }

    /// `GET|DELETE /api/projects/{p}/servers/{s}`
    pub fn server(&self, project: &ProjectId, server: &ServerId) -> HttpResult<Url> {
        self.build(["api", "projects", project.as_str(), "servers", server.as_str()])
    }

    /// `POST /api/projects/{p}/servers/{s}/{action}`
    pub fn server_action(
        &self,
        project: &ProjectId,
        server: &ServerId,
        action: &str,
    ) -> HttpResult<Url> {
        self.build([
            "api",
            "projects",
            project.as_str(),
            "servers",
            server.as_str(),
            action,
        ])
    }

    /// `GET /api/projects/{p}/servers/{s}/logs?level=&category=&limit=`
    pub fn logs(&self, project: &ProjectId, server: &ServerId, query: &LogQuery) -> HttpResult<Url> {
        let mut url = self.server_action(project, server, "logs")?;
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// `GET /api/projects/{p}/tool-preferences?serverId={s}`
    pub fn tool_preferences(&self, project: &ProjectId, server: &ServerId) -> HttpResult<Url> {
        let mut url = self.build(["api", "projects", project.as_str(), "tool-preferences"])?;
        url.query_pairs_mut()
            .append_pair("serverId", server.as_str());
        Ok(url)
    }

    /// `PUT /api/projects/{p}/servers/{s}/tools/{tool}/preference`
    pub fn tool_preference(
        &self,
        project: &ProjectId,
        server: &ServerId,
        tool_name: &str,
    ) -> HttpResult<Url> {
        self.build([
            "api",
            "projects",
            project.as_str(),
            "servers",
            server.as_str(),
            "tools",
            tool_name,
            "preference",
        ])
    }

    /// `POST /api/projects/{p}/tool-preferences/bulk`
    pub fn tool_preferences_bulk(&self, project: &ProjectId) -> HttpResult<Url> {
        self.build([
            "api",
            "projects",
            project.as_str(),
            "tool-preferences",
            "bulk",
        ])
    }
}

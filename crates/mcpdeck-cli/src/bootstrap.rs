//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Dashboard REST client (via mcpdeck-http)
//! - Terminal notifier
//! - Edit capability resolved from the configured role
//!
//! Command handlers receive the composed `CliContext` and build a
//! `ServerDetailController` per server.

use std::sync::Arc;

use mcpdeck_core::{EditCapability, Notifier, ProjectId, ProjectRole, ServerApiPort, ServerId};
use mcpdeck_gui::{ControllerDeps, ServerDetailController, ToolPreferenceController};
use mcpdeck_http::{DashboardClientConfig, DefaultDashboardClient};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;
use crate::presentation::TerminalNotifier;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Dashboard base URL.
    pub api_url: String,
    /// Session cookie, if any.
    pub session: Option<String>,
    /// Project to operate on.
    pub project: ProjectId,
    /// Caller's role in the project.
    pub role: ProjectRole,
}

impl CliConfig {
    /// Build config from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let project = cli
            .project
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                CliError::Config("no project given; pass --project or set MCPDECK_PROJECT".into())
            })?;
        let role = cli.role.parse::<ProjectRole>().map_err(CliError::Arguments)?;

        Ok(Self {
            api_url: cli.api_url.clone(),
            session: cli.session.clone(),
            project: ProjectId::new(project),
            role,
        })
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Project every command operates on.
    pub project: ProjectId,
    /// What the configured role allows.
    pub capability: EditCapability,
    deps: ControllerDeps,
    servers: Arc<dyn ServerApiPort>,
    tools: Arc<ToolPreferenceController>,
}

impl CliContext {
    /// Build a controller for one server. All controllers share one
    /// preference store.
    pub fn controller(&self, server: &str) -> ServerDetailController {
        ServerDetailController::new(self.deps.clone(), self.project.clone(), ServerId::new(server))
            .with_tool_preferences(self.tools.clone())
    }

    /// Direct access to the server port for project-level listing.
    pub fn servers(&self) -> &Arc<dyn ServerApiPort> {
        &self.servers
    }
}

/// Bootstrap the CLI context.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let client_config = DashboardClientConfig::new()
        .with_base_url(&config.api_url)
        .with_session(config.session);
    let client = Arc::new(DefaultDashboardClient::from_config(&client_config)?);
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::new());

    let deps = ControllerDeps::new(client.clone(), client.clone(), notifier.clone());
    let tools = Arc::new(ToolPreferenceController::new(client.clone(), notifier));

    debug!(api_url = %config.api_url, project = %config.project, role = %config.role, "CLI context ready");

    Ok(CliContext {
        project: config.project,
        capability: config.role.edit_capability(),
        deps,
        servers: client,
        tools,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_missing_project_is_config_error() {
        let cli = Cli::parse_from(["mcpdeck", "--project", " ", "list"]);
        let err = assert_err!(CliConfig::from_cli(&cli));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_unknown_role_is_argument_error() {
        let cli = Cli::parse_from(["mcpdeck", "--project", "p1", "--role", "guest", "list"]);
        let err = assert_err!(CliConfig::from_cli(&cli));
        assert!(matches!(err, CliError::Arguments(_)));
    }

    #[test]
    fn test_viewer_context_is_read_only() {
        let cli = Cli::parse_from(["mcpdeck", "--project", "p1", "--role", "viewer", "list"]);
        let ctx = assert_ok!(bootstrap(assert_ok!(CliConfig::from_cli(&cli))));
        assert!(!ctx.capability.allowed);
        assert_eq!(ctx.controller("s1").server_id().as_str(), "s1");
    }
}

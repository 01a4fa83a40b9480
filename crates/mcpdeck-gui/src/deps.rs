//! Dependency injection for the server detail controller.
//!
//! All dependencies are injected as trait objects to keep the controller
//! free of adapter crates.

use std::sync::Arc;

use mcpdeck_core::{Notifier, ServerApiPort, ToolPreferencePort};

/// Dependencies required to construct a `ServerDetailController`.
///
/// Fields are private to enforce construction via `ControllerDeps::new()`.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(DashboardClient::from_config(&config)?);
/// let deps = ControllerDeps::new(client.clone(), client, Arc::new(NoopNotifier));
/// let controller = ServerDetailController::new(deps, project_id, server_id);
/// ```
#[derive(Clone)]
pub struct ControllerDeps {
    /// Server list, detail and action endpoints.
    pub(crate) servers: Arc<dyn ServerApiPort>,
    /// Tool preference endpoints.
    pub(crate) preferences: Arc<dyn ToolPreferencePort>,
    /// Where user-facing notifications go.
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl ControllerDeps {
    pub fn new(
        servers: Arc<dyn ServerApiPort>,
        preferences: Arc<dyn ToolPreferencePort>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            servers,
            preferences,
            notifier,
        }
    }
}

//! Mutating server actions.
//!
//! Actions never write to the published record. A confirmed remote call is
//! followed by a reload through the staged loader; a failed call leaves the
//! record untouched and surfaces a notification.

use std::sync::Arc;

use mcpdeck_core::{
    ApiError, EditCapability, Notification, Notifier, ServerAction, ServerApiPort, ServerRecord,
};
use tracing::{info, warn};

use crate::error::GuiError;
use crate::loader::{BasicLoad, StagedLoader};

/// Proof that the user confirmed a destructive action.
///
/// Only the presentation layer's confirmation step should construct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserConfirmed(());

impl UserConfirmed {
    pub const fn acknowledged() -> Self {
        Self(())
    }
}

/// What the view should do after a successful action.
#[derive(Debug)]
pub enum ActionOutcome {
    /// The server was reloaded; phase 1 has settled.
    Reloaded(BasicLoad),
    /// The server no longer exists; leave the detail view.
    NavigateAway,
}

/// Action dispatcher for one server.
pub struct ActionOps<'a> {
    api: &'a Arc<dyn ServerApiPort>,
    notifier: &'a Arc<dyn Notifier>,
    loader: &'a StagedLoader,
}

impl<'a> ActionOps<'a> {
    pub const fn new(
        api: &'a Arc<dyn ServerApiPort>,
        notifier: &'a Arc<dyn Notifier>,
        loader: &'a StagedLoader,
    ) -> Self {
        Self {
            api,
            notifier,
            loader,
        }
    }

    /// Flip the server between enabled and disabled.
    pub async fn toggle(&self, capability: &EditCapability) -> Result<ActionOutcome, GuiError> {
        let action = ServerAction::Toggle;
        let server = self.authorize(action, capability)?;

        let result = self
            .api
            .toggle_server(self.loader.project_id(), &server.id)
            .await
            .map_err(|err| self.fail(action, &server, err))?;

        let disabled = result.disabled.unwrap_or(!server.disabled);
        info!(server_id = %server.id, disabled, "Server toggled");
        self.notifier.notify(Notification::ServerToggled {
            server_name: server.name,
            enabled: !disabled,
        });
        Ok(self.reload().await)
    }

    /// Restart the remote server process.
    pub async fn restart(&self, capability: &EditCapability) -> Result<ActionOutcome, GuiError> {
        let action = ServerAction::Restart;
        let server = self.authorize(action, capability)?;

        self.api
            .restart_server(self.loader.project_id(), &server.id)
            .await
            .map_err(|err| self.fail(action, &server, err))?;

        info!(server_id = %server.id, "Server restarted");
        self.notifier.notify(Notification::ServerRestarted {
            server_name: server.name,
        });
        Ok(self.reload().await)
    }

    /// Force a fresh health probe.
    pub async fn refresh_status(
        &self,
        capability: &EditCapability,
    ) -> Result<ActionOutcome, GuiError> {
        let action = ServerAction::RefreshStatus;
        let server = self.authorize(action, capability)?;

        let result = self
            .api
            .refresh_status(self.loader.project_id(), &server.id)
            .await
            .map_err(|err| self.fail(action, &server, err))?;

        info!(server_id = %server.id, tools_count = result.tools_count, "Server status refreshed");
        self.notifier.notify(Notification::StatusRefreshed {
            server_name: server.name,
            tools_count: result.tools_count,
        });
        Ok(self.reload().await)
    }

    /// Remove the server. Requires a prior user confirmation.
    pub async fn delete(
        &self,
        capability: &EditCapability,
        _confirmed: UserConfirmed,
    ) -> Result<ActionOutcome, GuiError> {
        let action = ServerAction::Delete;
        let server = self.authorize(action, capability)?;

        self.api
            .delete_server(self.loader.project_id(), &server.id)
            .await
            .map_err(|err| self.fail(action, &server, err))?;

        info!(server_id = %server.id, "Server deleted");
        self.notifier.notify(Notification::ServerDeleted {
            server_name: server.name,
        });
        Ok(ActionOutcome::NavigateAway)
    }

    /// Check the capability, then require a loaded record.
    ///
    /// Runs before any port call.
    fn authorize(
        &self,
        action: ServerAction,
        capability: &EditCapability,
    ) -> Result<ServerRecord, GuiError> {
        if let Some(reason) = capability.denial_reason() {
            let reason = reason.to_string();
            warn!(action = action.label(), %reason, "Action refused");
            self.notifier.notify(Notification::PermissionDenied {
                action,
                reason: reason.clone(),
            });
            return Err(GuiError::PermissionDenied(reason));
        }
        self.loader.server().ok_or(GuiError::NotLoaded)
    }

    fn fail(&self, action: ServerAction, server: &ServerRecord, err: ApiError) -> GuiError {
        warn!(server_id = %server.id, action = action.label(), error = %err, "Server action failed");
        self.notifier.notify(Notification::ActionFailed {
            action,
            server_name: server.name.clone(),
            message: err.to_string(),
        });
        GuiError::from(err)
    }

    async fn reload(&self) -> ActionOutcome {
        ActionOutcome::Reloaded(self.loader.load().await)
    }
}

//! Toggle, restart, refresh, retry and delete handlers.
//!
//! Each action first runs phase 1 so the controller has a record to act
//! on, then prints the reloaded state once the controller settles it.

use anyhow::Result;
use mcpdeck_gui::{ActionOutcome, BasicLoad, ServerDetailController, UserConfirmed};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::show::render_load;
use crate::utils::input;

/// Which mutating action to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Restart,
    Refresh,
}

/// Execute toggle, restart or refresh.
pub async fn execute(ctx: &CliContext, server: &str, action: Action) -> Result<()> {
    let controller = ctx.controller(server);
    ensure_loaded(&controller).await?;

    let outcome = match action {
        Action::Toggle => controller.toggle_server(&ctx.capability).await,
        Action::Restart => controller.restart_server(&ctx.capability).await,
        Action::Refresh => controller.refresh_status(&ctx.capability).await,
    }
    .map_err(CliError::from)?;

    match outcome {
        ActionOutcome::Reloaded(load) => render_load(&controller, load, true).await,
        ActionOutcome::NavigateAway => Ok(()),
    }
}

/// Execute the retry command.
pub async fn retry(ctx: &CliContext, server: &str) -> Result<()> {
    let controller = ctx.controller(server);
    let load = controller.retry_connection().await;
    render_load(&controller, load, true).await
}

/// Execute the delete command, asking for confirmation unless `yes` is set.
pub async fn delete(ctx: &CliContext, server: &str, yes: bool) -> Result<()> {
    let controller = ctx.controller(server);
    ensure_loaded(&controller).await?;

    let name = controller
        .server()
        .map_or_else(|| server.to_string(), |record| record.name);

    let confirmed = if yes {
        UserConfirmed::acknowledged()
    } else if input::prompt_confirmation(&format!(
        "Delete server '{name}' from project {}?",
        ctx.project
    ))? {
        UserConfirmed::acknowledged()
    } else {
        println!("Delete cancelled.");
        return Ok(());
    };

    match controller
        .delete_server(&ctx.capability, confirmed)
        .await
        .map_err(CliError::from)?
    {
        ActionOutcome::NavigateAway => Ok(()),
        ActionOutcome::Reloaded(load) => render_load(&controller, load, false).await,
    }
}

/// Run phase 1 so actions have a record. Phase 2 keeps running in the
/// background and is superseded by the action's reload.
async fn ensure_loaded(controller: &ServerDetailController) -> Result<()> {
    match controller.load_server_detail().await {
        BasicLoad::Published { .. } | BasicLoad::Superseded => Ok(()),
        BasicLoad::NotFound => {
            Err(CliError::NotFound(format!("server {}", controller.server_id())).into())
        }
        BasicLoad::Unavailable { message } => Err(CliError::Unavailable(message).into()),
    }
}

//! Show command handler.
//!
//! Mirrors the staged view: the basic record is printed as soon as the
//! server list answers, then again once the health check settles.

use anyhow::Result;
use mcpdeck_gui::{BasicLoad, DetailOutcome, ServerDetailController};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_server;

/// Execute the show command.
pub async fn execute(ctx: &CliContext, server: &str, no_wait: bool) -> Result<()> {
    let controller = ctx.controller(server);
    let load = controller.load_server_detail().await;
    render_load(&controller, load, !no_wait).await
}

/// Print the outcome of a (re)load.
///
/// Failures have already been reported by the notifier; only the exit code
/// is decided here.
pub async fn render_load(
    controller: &ServerDetailController,
    load: BasicLoad,
    wait: bool,
) -> Result<()> {
    let detail = match load {
        BasicLoad::Published { detail } => detail,
        BasicLoad::NotFound => {
            return Err(CliError::NotFound(format!("server {}", controller.server_id())).into());
        }
        BasicLoad::Unavailable { message } => {
            if let Some(server) = controller.server() {
                display_server(&server);
            }
            return Err(CliError::Unavailable(message).into());
        }
        BasicLoad::Superseded => return Ok(()),
    };

    let Some(basic) = controller.server() else {
        return Ok(());
    };
    if !wait {
        display_server(&basic);
        return Ok(());
    }

    println!("{} found, checking health...", basic.name);
    let outcome = detail.outcome().await;
    if let Some(server) = controller.server() {
        println!();
        display_server(&server);
    }

    match outcome {
        DetailOutcome::Failed { message } => Err(CliError::Unavailable(message).into()),
        DetailOutcome::Applied { .. } | DetailOutcome::TimedOut | DetailOutcome::Stale => Ok(()),
    }
}

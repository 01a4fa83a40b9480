//! Tool listing and tool preference handlers.

use anyhow::Result;
use mcpdeck_core::ServerRecord;
use mcpdeck_gui::{BasicLoad, ServerDetailController};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

/// Execute the tools command: every tool with its preference and the
/// derived counts.
pub async fn list(ctx: &CliContext, server: &str) -> Result<()> {
    let controller = ctx.controller(server);
    let record = load_with_tools(&controller).await?;

    if record.tools.is_empty() {
        println!("{} exposes no tools.", record.name);
        return Ok(());
    }

    println!("{:<8} {:<32} Description", "Enabled", "Tool");
    print_separator(90);
    for tool in &record.tools {
        let enabled = controller.is_tool_enabled(&tool.name);
        println!(
            "{:<8} {:<32} {}",
            if enabled { "yes" } else { "no" },
            truncate_string(&tool.name, 31),
            truncate_string(tool.description.as_deref().unwrap_or(""), 48),
        );
    }

    let summary = controller.tool_summary();
    println!();
    let state = if summary.all_enabled {
        " (all enabled)"
    } else if summary.none_enabled {
        " (all disabled)"
    } else {
        ""
    };
    println!(
        "{} of {} tool(s) enabled{state}",
        summary.enabled_count, summary.total_count
    );
    Ok(())
}

/// Execute tool-enable / tool-disable.
pub async fn set_one(ctx: &CliContext, server: &str, tool: &str, enabled: bool) -> Result<()> {
    ensure_editable(ctx)?;
    let controller = ctx.controller(server);
    controller
        .update_tool_preference(tool, enabled)
        .await
        .map_err(CliError::from)?;
    Ok(())
}

/// Execute tools-all.
pub async fn set_all(ctx: &CliContext, server: &str, enabled: bool) -> Result<()> {
    ensure_editable(ctx)?;
    let controller = ctx.controller(server);
    let record = load_with_tools(&controller).await?;
    if record.tools.is_empty() {
        println!("{} exposes no tools.", record.name);
        return Ok(());
    }
    controller
        .set_all_tools(enabled)
        .await
        .map_err(CliError::from)?;
    Ok(())
}

/// Preferences are a mutation like any server action.
fn ensure_editable(ctx: &CliContext) -> Result<(), CliError> {
    match ctx.capability.denial_reason() {
        Some(reason) => Err(CliError::PermissionDenied(reason.to_string())),
        None => Ok(()),
    }
}

/// Load the server through both phases and the stored preferences.
async fn load_with_tools(controller: &ServerDetailController) -> Result<ServerRecord> {
    match controller.load_server_detail().await {
        BasicLoad::Published { detail } => {
            detail.outcome().await;
        }
        BasicLoad::NotFound => {
            return Err(CliError::NotFound(format!("server {}", controller.server_id())).into());
        }
        BasicLoad::Unavailable { message } => return Err(CliError::Unavailable(message).into()),
        BasicLoad::Superseded => {}
    }

    controller
        .load_tool_preferences()
        .await
        .map_err(CliError::from)?;
    controller
        .server()
        .ok_or_else(|| CliError::NotFound(format!("server {}", controller.server_id())).into())
}

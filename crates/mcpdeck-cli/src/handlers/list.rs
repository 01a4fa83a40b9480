//! List command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{print_separator, truncate_string};

/// Execute the list command.
///
/// Shows the basic info of every server in the project. No health check is
/// run, so live status is not shown here; use `show` for that.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let servers = ctx
        .servers()
        .list_servers(&ctx.project)
        .await
        .map_err(CliError::from)?;

    if servers.is_empty() {
        println!("No servers found in project {}.", ctx.project);
        return Ok(());
    }

    println!("Found {} server(s) in project {}:\n", servers.len(), ctx.project);
    println!(
        "{:<24} {:<24} {:<16} {:<9} Command",
        "ID", "Name", "Transport", "Enabled"
    );
    print_separator(100);

    for server in servers {
        let transport = format!("{:?}", server.transport_type);
        println!(
            "{:<24} {:<24} {:<16} {:<9} {}",
            truncate_string(server.id.as_str(), 23),
            truncate_string(&server.name, 23),
            transport,
            if server.disabled { "no" } else { "yes" },
            truncate_string(&server.command, 30),
        );
    }

    Ok(())
}

//! Logs command handler.

use anyhow::Result;
use mcpdeck_core::{LogLevel, LogQuery, ServerLogEntry};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the logs command.
pub async fn execute(
    ctx: &CliContext,
    server: &str,
    level: Option<&str>,
    category: Option<String>,
    limit: u32,
) -> Result<()> {
    let query = build_query(level, category, limit)?;
    let entries = ctx
        .controller(server)
        .server_logs(&query)
        .await
        .map_err(CliError::from)?;

    if entries.is_empty() {
        println!("No log entries.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn build_query(level: Option<&str>, category: Option<String>, limit: u32) -> Result<LogQuery, CliError> {
    let mut query = LogQuery::new().with_limit(limit);
    if let Some(level) = level {
        let level = level.parse::<LogLevel>().map_err(CliError::Arguments)?;
        query = query.with_level(level);
    }
    if let Some(category) = category {
        query = query.with_category(category);
    }
    Ok(query)
}

fn format_entry(entry: &ServerLogEntry) -> String {
    let category = entry
        .category
        .as_deref()
        .map(|c| format!(" [{c}]"))
        .unwrap_or_default();
    format!(
        "{} {:<5}{category} {}",
        entry
            .timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S"),
        entry.level.as_str().to_uppercase(),
        entry.message
    )
}

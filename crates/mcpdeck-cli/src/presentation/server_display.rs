//! Server record display for `show` and action commands.

use mcpdeck_core::{ServerRecord, ServerStatus};

use super::tables::{format_optional, print_separator};

/// Status with a marker suitable for terminal output.
pub const fn status_label(status: ServerStatus) -> &'static str {
    match status {
        ServerStatus::Loading => "… loading",
        ServerStatus::Connecting => "… connecting",
        ServerStatus::Online => "● online",
        ServerStatus::Offline => "○ offline",
        ServerStatus::Timeout => "⏱ timeout",
        ServerStatus::Error => "✗ error",
    }
}

/// Print a server's configuration and runtime state.
///
/// While the record is still loading, tool data is shown as pending rather
/// than as an empty list.
pub fn display_server(server: &ServerRecord) {
    println!("{} ({})", server.name, server.id);
    print_separator(60);
    if let Some(ref description) = server.description {
        println!("Description:  {description}");
    }
    println!("Status:       {}", status_label(server.status));
    println!(
        "Enabled:      {}",
        if server.disabled { "no" } else { "yes" }
    );
    println!("Transport:    {:?}", server.transport_type);
    if !server.command.is_empty() {
        println!("Command:      {} {}", server.command, server.args.join(" "));
    }
    println!("Working dir:  {}", format_optional(server.cwd.as_ref(), "--"));
    for (key, value) in &server.env {
        println!("Env:          {key}={}", mask_secret(key, value));
    }

    let last_connected = server.last_connected.map(|at| {
        at.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    });
    println!(
        "Last seen:    {}",
        format_optional(last_connected.as_ref(), "never")
    );
    if let Some(ref error) = server.last_error {
        println!("Last error:   {error}");
    }

    if server.status.is_placeholder() {
        println!("Tools:        (waiting for health check)");
    } else {
        println!("Tools:        {}", server.tools_count);
        for tool in &server.tools {
            match tool.description {
                Some(ref description) => println!("  - {}: {description}", tool.name),
                None => println!("  - {}", tool.name),
            }
        }
    }

    if server.status.needs_retry() {
        println!();
        println!("Run 'mcpdeck retry {}' to try again.", server.id);
    }
}

/// Hide values of env keys that look like credentials.
fn mask_secret<'a>(key: &str, value: &'a str) -> &'a str {
    let upper = key.to_ascii_uppercase();
    let secret = ["TOKEN", "SECRET", "KEY", "PASSWORD"]
        .iter()
        .any(|marker| upper.contains(marker));
    if secret && !value.is_empty() { "****" } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_env_values_are_masked() {
        assert_eq!(mask_secret("GITHUB_TOKEN", "ghp_123"), "****");
        assert_eq!(mask_secret("api_key", "abc"), "****");
        assert_eq!(mask_secret("LOG_LEVEL", "debug"), "debug");
    }

    #[test]
    fn test_status_labels_are_distinct() {
        assert_ne!(
            status_label(ServerStatus::Timeout),
            status_label(ServerStatus::Error)
        );
    }
}

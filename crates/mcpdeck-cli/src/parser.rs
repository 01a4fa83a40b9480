//! Main CLI parser and top-level argument handling.
//!
//! Connection settings are global so every subcommand can use them, and each
//! one falls back to an environment variable (also read from `.env`).

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for observing and controlling MCP servers.
#[derive(Parser)]
#[command(name = "mcpdeck")]
#[command(about = "Inspect and control MCP servers registered in a dashboard project")]
#[command(version)]
pub struct Cli {
    /// Dashboard base URL
    #[arg(
        long = "api-url",
        env = "MCPDECK_API_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub api_url: String,

    /// Session cookie sent with every request (e.g. "session=abc123")
    #[arg(long, env = "MCPDECK_SESSION", global = true, hide_env_values = true)]
    pub session: Option<String>,

    /// Project the servers belong to
    #[arg(long, env = "MCPDECK_PROJECT", global = true)]
    pub project: Option<String>,

    /// Your role in the project; viewers cannot run mutating commands
    #[arg(long, env = "MCPDECK_ROLE", default_value = "member", global = true)]
    pub role: String,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "mcpdeck",
            "--verbose",
            "--api-url",
            "https://dash.example.com",
            "--project",
            "p1",
            "list",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.api_url, "https://dash.example.com");
        assert_eq!(cli.project.as_deref(), Some("p1"));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_globals_after_subcommand() {
        let cli = Cli::parse_from(["mcpdeck", "show", "s1", "--project", "p9", "--role", "viewer"]);
        assert_eq!(cli.project.as_deref(), Some("p9"));
        assert_eq!(cli.role, "viewer");
    }
}

//! Main commands enum.
//!
//! Every server-scoped command takes the server id as its first positional
//! argument.

use clap::{ArgGroup, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the servers in the project
    List,

    /// Show a server: basic info first, then its health-checked detail
    Show {
        /// Server ID
        server: String,
        /// Print the basic info and exit without waiting for the health check
        #[arg(long)]
        no_wait: bool,
    },

    /// Enable a disabled server, or disable an enabled one
    Toggle {
        /// Server ID
        server: String,
    },

    /// Restart the server process
    Restart {
        /// Server ID
        server: String,
    },

    /// Force a fresh health check
    Refresh {
        /// Server ID
        server: String,
    },

    /// Retry connecting to a server that timed out or failed
    Retry {
        /// Server ID
        server: String,
    },

    /// Delete a server from the project
    Delete {
        /// Server ID
        server: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List a server's tools with their enabled/disabled preference
    Tools {
        /// Server ID
        server: String,
    },

    /// Expose a tool to tool-clients again
    ToolEnable {
        /// Server ID
        server: String,
        /// Tool name
        tool: String,
    },

    /// Hide a tool from tool-clients
    ToolDisable {
        /// Server ID
        server: String,
        /// Tool name
        tool: String,
    },

    /// Enable or disable every tool of a server at once
    #[command(group(ArgGroup::new("state").required(true).args(["on", "off"])))]
    ToolsAll {
        /// Server ID
        server: String,
        /// Enable all tools
        #[arg(long)]
        on: bool,
        /// Disable all tools
        #[arg(long)]
        off: bool,
    },

    /// Show recent server logs
    Logs {
        /// Server ID
        server: String,
        /// Minimum level (debug, info, warn, error)
        #[arg(short, long)]
        level: Option<String>,
        /// Only entries from this category
        #[arg(short, long)]
        category: Option<String>,
        /// Maximum number of entries
        #[arg(short = 'n', long, default_value_t = 100)]
        limit: u32,
    },
}

#[cfg(test)]
mod tests {
    use crate::parser::Cli;
    use crate::commands::Commands;
    use clap::Parser;

    #[test]
    fn test_tools_all_requires_state() {
        assert!(Cli::try_parse_from(["mcpdeck", "tools-all", "s1"]).is_err());
        assert!(Cli::try_parse_from(["mcpdeck", "tools-all", "s1", "--on", "--off"]).is_err());

        let cli = Cli::parse_from(["mcpdeck", "tools-all", "s1", "--off"]);
        assert!(matches!(
            cli.command,
            Some(Commands::ToolsAll { on: false, off: true, .. })
        ));
    }

    #[test]
    fn test_logs_defaults() {
        let cli = Cli::parse_from(["mcpdeck", "logs", "s1", "--level", "warn"]);
        let Some(Commands::Logs { level, category, limit, .. }) = cli.command else {
            panic!("expected logs command");
        };
        assert_eq!(level.as_deref(), Some("warn"));
        assert_eq!(category, None);
        assert_eq!(limit, 100);
    }

    #[test]
    fn test_delete_yes_flag() {
        let cli = Cli::parse_from(["mcpdeck", "delete", "s1", "-y"]);
        assert!(matches!(cli.command, Some(Commands::Delete { yes: true, .. })));
    }
}

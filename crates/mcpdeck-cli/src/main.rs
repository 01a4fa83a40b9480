//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers which delegate to the
//! server detail controller.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mcpdeck_cli::handlers::actions::{self, Action};
use mcpdeck_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> anyhow::Result<()> {
    // Dispatch to appropriate handler
    let Some(command) = cli.command.take() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::List => handlers::list::execute(&ctx).await?,
        Commands::Show { server, no_wait } => {
            handlers::show::execute(&ctx, &server, no_wait).await?;
        }
        Commands::Toggle { server } => actions::execute(&ctx, &server, Action::Toggle).await?,
        Commands::Restart { server } => actions::execute(&ctx, &server, Action::Restart).await?,
        Commands::Refresh { server } => actions::execute(&ctx, &server, Action::Refresh).await?,
        Commands::Retry { server } => actions::retry(&ctx, &server).await?,
        Commands::Delete { server, yes } => actions::delete(&ctx, &server, yes).await?,
        Commands::Tools { server } => handlers::tools::list(&ctx, &server).await?,
        Commands::ToolEnable { server, tool } => {
            handlers::tools::set_one(&ctx, &server, &tool, true).await?;
        }
        Commands::ToolDisable { server, tool } => {
            handlers::tools::set_one(&ctx, &server, &tool, false).await?;
        }
        Commands::ToolsAll { server, on, .. } => {
            handlers::tools::set_all(&ctx, &server, on).await?;
        }
        Commands::Logs {
            server,
            level,
            category,
            limit,
        } => {
            handlers::logs::execute(&ctx, &server, level.as_deref(), category, limit).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

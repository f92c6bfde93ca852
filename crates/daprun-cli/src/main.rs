//! CLI entry point.
//!
//! Initialises logging, parses flags, bootstraps the context and dispatches
//! to the command handlers.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use daprun_cli::error::{exit_code_for, hint_for};
use daprun_cli::{Cli, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let ctx = bootstrap()?;

    match cli.command {
        Commands::Run(args) => handlers::run::execute(&ctx, args).await,
        Commands::List => handlers::list::execute(&ctx),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before flags read them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if let Some(hint) = hint_for(&err) {
                eprintln!("Hint: {hint}");
            }
            ExitCode::from(exit_code_for(&err))
        }
    }
}

//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs tracing, then dispatches to a
//! handler. Failures carrying a `CliError` choose the exit code.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use termkit_cli::bootstrap::{init_tracing, shutdown_token};
use termkit_cli::handlers::serve::ServeArgs;
use termkit_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Device { json, timeout } => {
            let config = CliConfig::with_query_timeout_secs(timeout)?;
            let ctx = bootstrap(&config);
            handlers::device::execute(&ctx, json, cli.verbose).await?;
        }
        Commands::Serve {
            port,
            host,
            root,
            hub,
            public,
            uploads,
            max_upload_mb,
        } => {
            let args = ServeArgs {
                host,
                port,
                root,
                hub,
                public,
                uploads,
                max_upload_mb,
            };
            handlers::serve::execute(args, shutdown_token()).await?;
        }
        Commands::Fire {
            seed,
            cadence_ms,
            bursts,
        } => {
            handlers::fire::execute(seed, cadence_ms, bursts, &shutdown_token()).await?;
        }
        Commands::Smoke { count, interval_ms } => {
            let ctx = bootstrap(&CliConfig::with_defaults());
            handlers::smoke::execute(&ctx, count, interval_ms, &shutdown_token()).await?;
        }
    }

    Ok(())
}

//! Realtime transcript relay entry point.
//!
//! Binary name: `relay`
//!
//! Parses CLI arguments, sets up tracing, then dispatches to the requested
//! command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use relay_observe::tracing_setup::{init_tracing, shutdown_tracing, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "relay", &mut std::io::stdout());
        return Ok(());
    }

    let filter = cli.log_filter();

    match cli.command {
        Commands::Serve(args) => {
            let format = if args.log_json {
                LogFormat::Json
            } else {
                LogFormat::Text
            };
            init_tracing(format, filter, args.otel)
                .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))?;

            let result = cli::serve::run(args).await;
            shutdown_tracing();
            result?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

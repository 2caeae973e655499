//! CLI command definitions for the `relay` binary.
//!
//! Uses clap derive macros for argument parsing. Every `serve` flag can also
//! be supplied through the environment so the relay drops into container
//! platforms that only set `PORT`.

pub mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use relay_infra::config::DEFAULT_CONFIG_FILE;

/// Realtime transcript relay for avatar conversations.
#[derive(Parser)]
#[command(name = "relay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the WebSocket relay server.
    Serve(ServeArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to (overrides the config file).
    #[arg(long, env = "RELAY_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides the config file).
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to the TOML config file.
    #[arg(short, long, env = "RELAY_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long)]
    pub otel: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

//! read-scw-machines
//!
//! Reads a self-hosted runners listing on stdin and prints the ids of the
//! build machines whose runner matches the requested mode, one per line.
//! Logs and diagnostics go to stderr so stdout can be piped into the power
//! on/off tooling.

mod config;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Parser)]
#[command(name = "read-scw-machines", version)]
#[command(about = "Select build machines by runner status", long_about = None)]
struct Cli {
    /// Selection mode: ONLINE_NBUSY, ONLINE_BUSY, ONLINE or OFFLINE
    mode: Option<String>,

    /// Machine table file (JSON array of { name, id }); defaults to the built-in table
    #[arg(long, env = "SCW_MACHINES_FILE")]
    machines: Option<PathBuf>,

    /// Runners document to read instead of stdin ("-" for stdin)
    #[arg(long, env = "SCW_RUNNERS_INPUT")]
    input: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scw_cli=warn,scw_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors and help text keep clap formatting
            let _ = err.print();
            std::process::exit(usage_exit_code(&err));
        }
    };

    if let Err(err) = try_main(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Exit status for an argument parsing outcome
///
/// `--help` and `--version` succeed; every usage error exits 1 like any
/// other failure.
fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

fn try_main(cli: Cli) -> Result<()> {
    let config = Config::from_args(cli.mode, cli.machines, cli.input)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    run::run(&config, std::io::stdin().lock(), std::io::stdout().lock())
}

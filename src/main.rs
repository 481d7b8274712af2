//! jose-probe: inspect JOSE compact tokens and extract RSA keys from JWKs.
//!
//! Entry point for the application. Parses CLI arguments and delegates
//! to the appropriate command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;
mod display;
mod jwks_fetch;
mod params;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides `--verbose`.
fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("jose_probe={log_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch to the selected command handler.
///
/// Returns instead of calling `process::exit` so all destructors
/// (including `Zeroizing`) run.
fn run(cli: &Cli) -> Result<()> {
    let limits = cli.limits();

    match &cli.command {
        Commands::Inspect(args) => commands::inspect::execute(args, &limits),
        Commands::Scan(args) => commands::scan::execute(args, &limits),
        Commands::Assemble(args) => commands::assemble::execute(args),
        Commands::Keys(args) => commands::keys::execute(args, &limits),
    }
}

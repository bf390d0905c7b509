//! corefile-sync CLI
//!
//! Merges rewrite rules into CoreDNS Corefiles and reconciles them against
//! a routing entity list on disk.

mod cli;
mod commands;
mod error;
mod logging;

use std::io::Write;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

/// Log level used before any configuration is loaded
const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() {
    match run() {
        Ok(code) => {
            // process::exit skips destructors, so flush buffered output first.
            let _ = std::io::stdout().flush();
            std::process::exit(code)
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Parse arguments, set up logging and dispatch. Returns the exit code.
fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge(args) => {
            init_logging(cli.verbose, DEFAULT_LOG_LEVEL)?;
            commands::run_merge(&args)
        }
        Commands::Check(store) => {
            let config = commands::resolve_config(&store)?;
            init_logging(cli.verbose, &config.telemetry.log_level)?;
            commands::run_check(&store, config)
        }
        Commands::Reconcile { store, dry_run } => {
            let config = commands::resolve_config(&store)?;
            init_logging(cli.verbose, &config.telemetry.log_level)?;
            commands::run_reconcile(&store, config, dry_run)
        }
    }
}

fn init_logging(verbose: bool, level: &str) -> Result<()> {
    logging::init(verbose, level)
        .map_err(|e| CliError::user(format!("failed to set up logging: {e}")))
}

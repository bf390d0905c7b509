//! Check and reconcile command implementations
//!
//! Both run a reconcile cycle against a [`FileStore`]; `check` always as a
//! dry run.

use colored::Colorize;
use corefile_meta::Config;
use corefile_sync::{FileStore, Outcome, ReconcileOptions, ReconcileReport, Reconciler};

use super::{EXIT_DRIFT, EXIT_OK};
use crate::cli::StoreArgs;
use crate::error::{CliError, Result};

/// Load the config file (or defaults) and apply command-line overrides.
///
/// The result is validated when the reconciler is built.
pub fn resolve_config(args: &StoreArgs) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => corefile_meta::load_config(path)?,
        None => Config::default(),
    };

    if let Some(target) = &args.target {
        config.rules.target = target.clone();
    }
    if let Some(annotation) = &args.annotation {
        config.rules.annotation = Some(annotation.clone());
    }
    if !args.excluded.is_empty() {
        config.rules.excluded_namespaces = args.excluded.clone();
    }

    Ok(config)
}

fn reconcile(args: &StoreArgs, config: Config, dry_run: bool) -> Result<ReconcileReport> {
    let store = FileStore::new(&args.corefile, &args.entities);
    let reconciler = Reconciler::new(store, config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(reconciler.reconcile(None, &ReconcileOptions { dry_run }))?;
    Ok(report)
}

fn print_diff(report: &ReconcileReport) {
    if let Some(diff) = &report.diff {
        println!();
        print!("{}", diff.unified());
    }
}

/// Run the check command
///
/// Returns [`EXIT_DRIFT`] when the Corefile lacks the desired rules.
pub fn run_check(args: &StoreArgs, config: Config) -> Result<i32> {
    println!(
        "{} Checking {}...",
        "=>".blue().bold(),
        args.corefile.display()
    );

    let report = reconcile(args, config, true)?;

    match &report.outcome {
        Outcome::Unchanged => {
            println!(
                "{} Corefile is up to date ({} rule(s)).",
                "OK".green().bold(),
                report.rules
            );
            Ok(EXIT_OK)
        }
        Outcome::WouldUpdate | Outcome::Updated => {
            println!("{} Corefile has drifted:", "DRIFTED".red().bold());
            print_diff(&report);
            println!();
            println!("Run {} to repair.", "corefile-sync reconcile".cyan());
            Ok(EXIT_DRIFT)
        }
        Outcome::Skipped { reason } => {
            Err(CliError::user(format!("nothing to check: {reason}")))
        }
    }
}

/// Run the reconcile command
pub fn run_reconcile(args: &StoreArgs, config: Config, dry_run: bool) -> Result<i32> {
    println!(
        "{} Reconciling {}...",
        "=>".blue().bold(),
        args.corefile.display()
    );

    let report = reconcile(args, config, dry_run)?;

    match &report.outcome {
        Outcome::Unchanged => {
            println!(
                "{} Already up to date. No changes needed.",
                "OK".green().bold()
            );
        }
        Outcome::Updated => {
            println!(
                "{} Wrote {} rule(s) after {} attempt(s).",
                "OK".green().bold(),
                report.rules,
                report.attempts
            );
        }
        Outcome::WouldUpdate => {
            println!(
                "{} Would write {} rule(s):",
                "DRY RUN".yellow().bold(),
                report.rules
            );
            print_diff(&report);
        }
        Outcome::Skipped { reason } => {
            println!("{} {}", "SKIPPED".yellow().bold(), reason);
        }
    }

    Ok(EXIT_OK)
}

//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// corefile-sync - Keep CoreDNS rewrite rules in step with routed hosts
#[derive(Parser, Debug)]
#[command(name = "corefile-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge a rules file into a Corefile
    ///
    /// Prints the merged Corefile to stdout unless --in-place or --diff is
    /// given.
    ///
    /// Examples:
    ///   corefile-sync merge --corefile Corefile --rules rules.toml
    ///   corefile-sync merge --corefile Corefile --rules rules.toml --exclude kube-system
    ///   corefile-sync merge --corefile Corefile --rules rules.toml --in-place
    Merge(MergeArgs),

    /// Check whether the Corefile holds the desired rules
    ///
    /// Exits with status 2 and prints a diff when the Corefile has drifted.
    Check(StoreArgs),

    /// Run one reconcile cycle against the Corefile on disk
    Reconcile {
        #[command(flatten)]
        store: StoreArgs,

        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Arguments of the `merge` command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct MergeArgs {
    /// Corefile to merge into
    #[arg(long)]
    pub corefile: PathBuf,

    /// Rules file with one [[rule]] table (pattern, target) per rule
    #[arg(long)]
    pub rules: PathBuf,

    /// Client namespace the rules must not apply to (repeatable)
    #[arg(long = "exclude", value_name = "NAMESPACE")]
    pub excluded: Vec<String>,

    /// Configuration file providing the marker vocabulary
    #[arg(long, env = "COREFILE_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the result back to the Corefile
    #[arg(long, conflicts_with = "diff")]
    pub in_place: bool,

    /// Print a unified diff instead of the merged Corefile
    #[arg(long)]
    pub diff: bool,
}

/// Where the Corefile and routing entities live, plus config overrides
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct StoreArgs {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(long, env = "COREFILE_SYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Corefile to manage
    #[arg(long, env = "COREFILE_SYNC_COREFILE")]
    pub corefile: PathBuf,

    /// Routing entity list (TOML, JSON or YAML)
    #[arg(long, env = "COREFILE_SYNC_ENTITIES")]
    pub entities: PathBuf,

    /// Name routed hosts are rewritten to (overrides rules.target)
    #[arg(long, env = "COREFILE_SYNC_TARGET")]
    pub target: Option<String>,

    /// Annotation an entity must carry to be routed (overrides rules.annotation)
    #[arg(long)]
    pub annotation: Option<String>,

    /// Client namespace the rules must not apply to (replaces rules.excluded_namespaces)
    #[arg(long = "exclude", value_name = "NAMESPACE")]
    pub excluded: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_merge_with_exclusions() {
        let cli = Cli::parse_from([
            "corefile-sync",
            "merge",
            "--corefile",
            "Corefile",
            "--rules",
            "rules.toml",
            "--exclude",
            "kube-system",
            "--exclude",
            "monitoring",
        ]);
        let Commands::Merge(args) = cli.command else {
            panic!("expected merge");
        };
        assert_eq!(args.excluded, vec!["kube-system", "monitoring"]);
        assert!(!args.in_place);
    }

    #[test]
    fn in_place_conflicts_with_diff() {
        let result = Cli::try_parse_from([
            "corefile-sync",
            "merge",
            "--corefile",
            "Corefile",
            "--rules",
            "rules.toml",
            "--in-place",
            "--diff",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_reconcile_dry_run_with_global_verbose() {
        let cli = Cli::parse_from([
            "corefile-sync",
            "reconcile",
            "--corefile",
            "Corefile",
            "--entities",
            "entities.toml",
            "--target",
            "ingress.svc",
            "--dry-run",
            "-v",
        ]);
        assert!(cli.verbose);
        let Commands::Reconcile { store, dry_run } = cli.command else {
            panic!("expected reconcile");
        };
        assert!(dry_run);
        assert_eq!(store.target.as_deref(), Some("ingress.svc"));
    }
}

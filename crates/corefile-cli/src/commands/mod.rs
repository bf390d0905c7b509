//! Command implementations for corefile-cli

pub mod merge;
pub mod reconcile;

pub use merge::run_merge;
pub use reconcile::{resolve_config, run_check, run_reconcile};

/// Exit code for a successful command
pub const EXIT_OK: i32 = 0;

/// Exit code when `check` finds drift
pub const EXIT_DRIFT: i32 = 2;

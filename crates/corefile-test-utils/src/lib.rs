//! Shared test utilities for the corefile-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`corefile`] - canonical Corefile texts
//! - [`workspace`] - [`TestWorkspace`] for tests that need files on disk

pub mod corefile;
pub mod workspace;

pub use workspace::TestWorkspace;

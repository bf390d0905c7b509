//! Reconciles CoreDNS rewrite rules with the hosts of routing entities.
//!
//! A [`Reconciler`] reads the Corefile and the routing entities from a
//! [`DocumentStore`], derives one `rewrite` rule per routed host, merges the
//! rules into the Corefile's managed region with [`corefile_blocks::merge`]
//! and writes the result back when it changed.

pub mod entity;
pub mod error;
pub mod reconcile;
pub mod store;

pub use entity::{EntityKey, RoutingEntity, derive_rules};
pub use error::{Error, Result};
pub use reconcile::{Outcome, ReconcileOptions, ReconcileReport, Reconciler};
pub use store::{DocumentStore, Fault, Fetched, FileStore, MemoryStore, Operation, Revision};

//! Managed rewrite-rule blocks for CoreDNS Corefiles.
//!
//! This crate owns one marker-delimited region of an otherwise hand-edited
//! Corefile and keeps it filled with generated `rewrite` rules:
//!
//! ```text
//! .:53 {
//!     kubernetes cluster.local {
//!         pods insecure
//!     }
//! # BEGIN IngressReconciler managed rules
//! rewrite name app.example.com ingress.ingress-nginx.svc.cluster.local
//! # END IngressReconciler managed rules
//!     forward . /etc/resolv.conf
//! }
//! ```
//!
//! The pipeline is a pure function of its inputs:
//!
//! 1. [`render`] turns rules into directive lines, optionally inside an
//!    `expression` guard.
//! 2. [`marker`] finds an existing region; [`anchor`] finds where a new one
//!    belongs when there is none.
//! 3. [`merge`] splices the region, adds the auxiliary `metadata` directive
//!    when a guard needs it, and normalizes trailing whitespace.
//!
//! # Example
//!
//! ```
//! use corefile_blocks::{Rule, Vocabulary, merge};
//!
//! let corefile = ".:53 {\n    kubernetes cluster.local\n    forward .\n}\n";
//! let rules = [Rule::new("app.example.com", "ingress.svc")];
//! let merged = merge(corefile, &rules, &[], &Vocabulary::default());
//!
//! assert!(merged.contains("rewrite name app.example.com ingress.svc"));
//! assert_eq!(merge(&merged, &rules, &[], &Vocabulary::default()), merged);
//! ```

pub mod anchor;
pub mod diff;
pub mod document;
pub mod error;
pub mod marker;
pub mod merge;
pub mod render;
pub mod vocabulary;

pub use anchor::resolve_anchor;
pub use diff::LineDiff;
pub use document::Document;
pub use error::{Error, Result};
pub use marker::{ManagedRegion, locate_region};
pub use merge::{Merged, Placement, merge, merge_with_report};
pub use render::{RenderedRules, Rule, render_rules};
pub use vocabulary::Vocabulary;

//! External document stores.
//!
//! The reconciler only talks to a [`DocumentStore`]. Two implementations
//! ship with the crate:
//!
//! - [`FileStore`] keeps the Corefile and entity list on local disk
//! - [`MemoryStore`] keeps them in memory, with scripted failures for tests

mod file;
mod memory;

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::entity::RoutingEntity;

pub use self::file::FileStore;
pub use self::memory::{Fault, MemoryStore, Operation};

/// Opaque version of a fetched document, used for optimistic writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fetched document and the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub text: String,
    pub revision: Revision,
}

/// Access to the Corefile and the routing entities.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the current document.
    ///
    /// Fails with `NotFound` when there is no document yet, or `Transient`.
    async fn fetch_document(&self) -> Result<Fetched>;

    /// List routing entities in discovery order.
    async fn list_routing_entities(&self) -> Result<Vec<RoutingEntity>>;

    /// Replace the document, provided it is still at `revision`.
    ///
    /// Fails with `Conflict` when another writer got there first.
    async fn write_document(&self, text: &str, revision: &Revision) -> Result<()>;
}

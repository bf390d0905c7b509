//! In-memory document store

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{DocumentStore, Fetched, Revision};
use crate::entity::RoutingEntity;
use crate::{Error, Result};

/// Store operation a [`Fault`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Fetch,
    List,
    Write,
}

/// Failure returned instead of performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    NotFound,
    Conflict,
    Transient,
}

#[derive(Debug, Default)]
struct State {
    document: Option<String>,
    revision: u64,
    entities: Vec<RoutingEntity>,
    faults: HashMap<Operation, VecDeque<Fault>>,
    writes: usize,
}

/// Mutex-guarded store with a monotonically increasing revision.
///
/// Faults are queued per operation and consumed one per call, which lets
/// tests script conflicts and outages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new(document: Option<&str>, entities: Vec<RoutingEntity>) -> Self {
        Self {
            state: Mutex::new(State {
                document: document.map(str::to_string),
                entities,
                ..State::default()
            }),
        }
    }

    /// Queue `count` failures for `operation`.
    pub fn inject(&self, operation: Operation, fault: Fault, count: usize) {
        let mut state = self.lock();
        let queue = state.faults.entry(operation).or_default();
        queue.extend(std::iter::repeat_n(fault, count));
    }

    /// Replace the document as another writer would, bumping the revision.
    pub fn set_document(&self, text: &str) {
        let mut state = self.lock();
        state.document = Some(text.to_string());
        state.revision += 1;
    }

    pub fn set_entities(&self, entities: Vec<RoutingEntity>) {
        self.lock().entities = entities;
    }

    pub fn document(&self) -> Option<String> {
        self.lock().document.clone()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-operation.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_fault(state: &mut State, operation: Operation) -> Result<()> {
        let fault = state
            .faults
            .get_mut(&operation)
            .and_then(VecDeque::pop_front);
        match fault {
            None => Ok(()),
            Some(Fault::NotFound) => Err(Error::NotFound(format!("{operation:?} (injected)"))),
            Some(Fault::Conflict) => Err(Error::Conflict(format!("{operation:?} (injected)"))),
            Some(Fault::Transient) => Err(Error::Transient(format!("{operation:?} (injected)"))),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_document(&self) -> Result<Fetched> {
        let mut state = self.lock();
        Self::take_fault(&mut state, Operation::Fetch)?;
        let text = state
            .document
            .clone()
            .ok_or_else(|| Error::NotFound("document".into()))?;
        Ok(Fetched {
            text,
            revision: Revision::new(state.revision.to_string()),
        })
    }

    async fn list_routing_entities(&self) -> Result<Vec<RoutingEntity>> {
        let mut state = self.lock();
        Self::take_fault(&mut state, Operation::List)?;
        Ok(state.entities.clone())
    }

    async fn write_document(&self, text: &str, revision: &Revision) -> Result<()> {
        let mut state = self.lock();
        Self::take_fault(&mut state, Operation::Write)?;
        if revision.as_str() != state.revision.to_string() {
            return Err(Error::Conflict(format!(
                "document is at revision {}, write was based on {revision}",
                state.revision
            )));
        }
        state.document = Some(text.to_string());
        state.revision += 1;
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_document_is_not_found() {
        let store = MemoryStore::new(None, Vec::new());
        assert!(matches!(store.fetch_document().await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn stale_revision_conflicts() {
        let store = MemoryStore::new(Some("a"), Vec::new());
        let fetched = store.fetch_document().await.unwrap();
        store.set_document("b");

        let result = store.write_document("c", &fetched.revision).await;
        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(store.document().as_deref(), Some("b"));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn injected_faults_are_consumed_in_order() {
        let store = MemoryStore::new(Some("a"), Vec::new());
        store.inject(Operation::List, Fault::Transient, 1);
        store.inject(Operation::List, Fault::NotFound, 1);

        assert!(matches!(store.list_routing_entities().await, Err(Error::Transient(_))));
        assert!(matches!(store.list_routing_entities().await, Err(Error::NotFound(_))));
        assert!(store.list_routing_entities().await.is_ok());
    }

    #[tokio::test]
    async fn write_bumps_revision() {
        let store = MemoryStore::new(Some("a"), Vec::new());
        let first = store.fetch_document().await.unwrap();
        store.write_document("b", &first.revision).await.unwrap();

        let second = store.fetch_document().await.unwrap();
        assert_ne!(first.revision, second.revision);
        assert_eq!(second.text, "b");
    }
}

//! File-backed document store.
//!
//! The Corefile lives at one path and the entity list at another (TOML, JSON
//! or YAML, one `[[entity]]` table per entity). A document's revision is the
//! SHA-256 of its bytes; a write re-reads the file under an exclusive lock
//! and fails with `Conflict` if the checksum moved, then replaces the file
//! via a temp file persisted over it.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{DocumentStore, Fetched, Revision};
use crate::entity::RoutingEntity;
use crate::{Error, Result};

/// On-disk layout of the entity list.
#[derive(Debug, Default, Deserialize)]
struct EntityFile {
    #[serde(default, alias = "entities")]
    entity: Vec<RoutingEntity>,
}

/// Store backed by two local files.
#[derive(Debug, Clone)]
pub struct FileStore {
    document: PathBuf,
    entities: PathBuf,
}

impl FileStore {
    pub fn new(document: impl Into<PathBuf>, entities: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
            entities: entities.into(),
        }
    }

    pub fn document_path(&self) -> &Path {
        &self.document
    }

    pub fn entities_path(&self) -> &Path {
        &self.entities
    }
}

/// Hex SHA-256 of `content`.
fn revision_of(content: &[u8]) -> Revision {
    let mut hasher = Sha256::new();
    hasher.update(content);
    Revision::new(format!("{:x}", hasher.finalize()))
}

/// Map an I/O error on `path` to a store error.
fn classify(path: &Path, error: io::Error) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Error::Transient(format!("{}: {error}", path.display()))
        }
        _ => Error::io(path, error),
    }
}

fn lock_path(document: &Path) -> PathBuf {
    let name = document
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    document.with_file_name(format!(".{name}.lock"))
}

/// Compare-and-swap `text` into `document` if it is still at `expected`.
fn write_if_unchanged(document: &Path, text: &str, expected: &Revision) -> Result<()> {
    let lock_path = lock_path(document);
    let lock = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| classify(&lock_path, e))?;
    lock.lock_exclusive()
        .map_err(|e| Error::Transient(format!("lock {}: {e}", lock_path.display())))?;

    let current = fs::read(document).map_err(|e| classify(document, e))?;
    let actual = revision_of(&current);
    if &actual != expected {
        return Err(Error::Conflict(format!(
            "{} changed since it was read ({expected} -> {actual})",
            document.display()
        )));
    }

    replace_file(document, text)?;

    // Released on drop as well; unlocking explicitly surfaces errors.
    FileExt::unlock(&lock).map_err(|e| Error::io(&lock_path, e))?;
    Ok(())
}

/// Write `text` to a temp file beside `document` and persist it over it.
///
/// The temp file is removed on every error path.
fn replace_file(document: &Path, text: &str) -> Result<()> {
    let dir = match document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = document
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;
    temp.write_all(text.as_bytes())
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.persist(document)
        .map_err(|e| Error::io(document, e.error))?;

    Ok(())
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| Error::Transient(format!("blocking task failed: {e}")))?
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn fetch_document(&self) -> Result<Fetched> {
        let bytes = tokio::fs::read(&self.document)
            .await
            .map_err(|e| classify(&self.document, e))?;
        let revision = revision_of(&bytes);
        let text = String::from_utf8(bytes).map_err(|e| {
            Error::io(
                &self.document,
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        Ok(Fetched { text, revision })
    }

    async fn list_routing_entities(&self) -> Result<Vec<RoutingEntity>> {
        let path = self.entities.clone();
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let file: EntityFile = blocking(move || Ok(corefile_meta::load_structured(&path)?)).await?;
        Ok(file.entity)
    }

    async fn write_document(&self, text: &str, revision: &Revision) -> Result<()> {
        let document = self.document.clone();
        let text = text.to_string();
        let revision = revision.clone();
        blocking(move || write_if_unchanged(&document, &text, &revision)).await
    }
}

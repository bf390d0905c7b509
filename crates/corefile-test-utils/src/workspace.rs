//! [`TestWorkspace`] for tests that read and write Corefiles on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a Corefile, an entity list and a config.
///
/// # Example
///
/// ```rust,no_run
/// use corefile_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_corefile(corefile_test_utils::corefile::STOCK);
/// ws.write_entities_toml("");
/// assert!(ws.corefile().exists());
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn corefile(&self) -> PathBuf {
        self.root().join("Corefile")
    }

    pub fn entities(&self) -> PathBuf {
        self.root().join("entities.toml")
    }

    pub fn config(&self) -> PathBuf {
        self.root().join("corefile-sync.toml")
    }

    pub fn write_corefile(&self, content: &str) -> PathBuf {
        self.write("Corefile", content)
    }

    pub fn write_entities_toml(&self, content: &str) -> PathBuf {
        self.write("entities.toml", content)
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("corefile-sync.toml", content)
    }

    /// Write `content` to `name` under the workspace root.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestWorkspace: failed to write {}: {e}", path.display()));
        path
    }

    /// Read a file under the workspace root.
    pub fn read(&self, name: &str) -> String {
        let path = self.root().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("TestWorkspace: failed to read {}: {e}", path.display()))
    }

    pub fn read_corefile(&self) -> String {
        self.read("Corefile")
    }
}

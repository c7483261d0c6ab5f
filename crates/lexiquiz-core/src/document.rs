//! Document backends and JSON encoding helpers.

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::traits::DocumentStore;

/// A JSON document on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for FileDocument {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::DataUnavailable {
                location: self.location(),
                reason: e.to_string(),
            }),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::Write {
            location: self.location(),
            source,
        };

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(write_err)?;

        // Write next to the target so the final rename stays on one filesystem.
        let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
        temp.write_all(contents.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        tracing::debug!("wrote {} bytes to {}", contents.len(), self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    contents: Option<String>,
    writes: usize,
    fail_writes: bool,
}

/// An in-memory document. Clones share the same contents, so a test can keep
/// a handle while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryDocument {
    /// A document that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with initial contents.
    pub fn with_contents(contents: &str) -> Self {
        let doc = Self::new();
        doc.state.borrow_mut().contents = Some(contents.to_string());
        doc
    }

    /// Current contents, if any were written.
    pub fn contents(&self) -> Option<String> {
        self.state.borrow().contents.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    /// Make every following write fail with a permission error.
    pub fn fail_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_writes = fail;
    }
}

impl DocumentStore for MemoryDocument {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.state.borrow().contents.clone())
    }

    fn write(&self, contents: &str) -> Result<(), StoreError> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(StoreError::Write {
                location: self.location(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "writes disabled",
                ),
            });
        }
        state.contents = Some(contents.to_string());
        state.writes += 1;
        Ok(())
    }
}

/// Read and decode a JSON document. `Ok(None)` if it does not exist.
pub fn read_json<T: DeserializeOwned>(
    document: &dyn DocumentStore,
) -> Result<Option<T>, StoreError> {
    let Some(content) = document.read()? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::DataUnavailable {
            location: document.location(),
            reason: e.to_string(),
        })
}

/// Encode `value` as pretty JSON with four-space indentation and write it.
pub fn write_json<T: Serialize>(
    document: &dyn DocumentStore,
    value: &T,
) -> Result<(), StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| StoreError::Encode {
            location: document.location(),
            source,
        })?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8.
    let text = String::from_utf8_lossy(&buf);
    document.write(&text)
}

//! Persistence backends for the serialized consent record.

use crate::error::{ConsentError, ConsentResult};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Raw storage for one serialized consent record.
///
/// Backends store opaque strings; encoding and validation belong to the
/// store. `load` returning `Ok(None)` means no decision was ever recorded.
pub trait ConsentBackend: Send + Sync {
    fn load(&self) -> ConsentResult<Option<String>>;

    fn save(&self, raw: &str) -> ConsentResult<()>;

    fn remove(&self) -> ConsentResult<()>;
}

/// In-process backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a pre-existing raw value, e.g. one read from a cookie.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    fn slot(&self) -> ConsentResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|e| ConsentError::Unavailable(e.to_string()))
    }
}

impl ConsentBackend for MemoryBackend {
    fn load(&self) -> ConsentResult<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, raw: &str) -> ConsentResult<()> {
        *self.slot()? = Some(raw.to_string());
        Ok(())
    }

    fn remove(&self) -> ConsentResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Stores the record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsentBackend for FileBackend {
    fn load(&self) -> ConsentResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, raw: &str) -> ConsentResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        debug!("Saved consent record to {:?}", self.path);
        Ok(())
    }

    fn remove(&self) -> ConsentResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

//! The consent store: get, set, clear.

use crate::backend::{ConsentBackend, MemoryBackend};
use crate::error::{ConsentError, ConsentResult};
use pixelgate_types::{ConsentRecord, ConsentStatus, ConsentUpdate};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Owns the persisted consent record.
///
/// State machine: `none -> {necessary, custom, all}` on set, any state
/// `-> none` on clear. Each update toggles categories independently and the
/// status is recomputed from the resulting flags.
pub struct ConsentStore {
    backend: Box<dyn ConsentBackend>,
    /// Serializes read-modify-write updates.
    write_lock: Mutex<()>,
}

impl ConsentStore {
    pub fn new(backend: impl ConsentBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store backed by memory only.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Returns the current record, or `None` if absent or unreadable.
    pub fn get_consent(&self) -> Option<ConsentRecord> {
        let raw = match self.backend.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read consent record: {}", e);
                return None;
            }
        };
        match ConsentRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Discarding unreadable consent record: {}", e);
                None
            }
        }
    }

    /// Derived status of the current record.
    pub fn status(&self) -> ConsentStatus {
        ConsentStatus::of(self.get_consent().as_ref())
    }

    /// Applies a partial update over the current record and persists it.
    pub fn set_consent(&self, update: ConsentUpdate) -> ConsentResult<ConsentRecord> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ConsentError::Unavailable(e.to_string()))?;
        let current = self.get_consent();
        let next = update.apply(current.as_ref());
        self.backend.save(&next.to_json()?)?;
        info!(
            "Consent {} -> {}",
            ConsentStatus::of(current.as_ref()),
            next.status()
        );
        Ok(next)
    }

    /// Grants every optional category.
    pub fn accept_all(&self) -> ConsentResult<ConsentRecord> {
        self.set_consent(ConsentUpdate::uniform(true))
    }

    /// Declines every optional category.
    pub fn accept_necessary(&self) -> ConsentResult<ConsentRecord> {
        self.set_consent(ConsentUpdate::uniform(false))
    }

    /// Removes the persisted record; status reverts to `none`.
    pub fn clear_consent(&self) -> ConsentResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| ConsentError::Unavailable(e.to_string()))?;
        self.backend.remove()?;
        debug!("Consent record cleared");
        Ok(())
    }
}

impl std::fmt::Debug for ConsentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentStore")
            .field("status", &self.status())
            .finish()
    }
}

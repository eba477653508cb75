//! The document seam loader tags are injected through.

use crate::error::RuntimeResult;
use pixelgate_mapper::LoaderSpec;
use pixelgate_types::{PixelType, Placement};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Identity of an injected loader tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderKey {
    pub vendor: PixelType,
    pub pixel_id: String,
    pub placement: Placement,
}

impl LoaderKey {
    pub fn of(loader: &LoaderSpec) -> Self {
        Self {
            vendor: loader.vendor,
            pixel_id: loader.pixel_id.clone(),
            placement: loader.placement,
        }
    }
}

impl fmt::Display for LoaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.vendor, self.pixel_id, self.placement)
    }
}

/// Receives loader tags. Injection is additive only.
pub trait DocumentSink: Send + Sync {
    fn inject(&self, loader: &LoaderSpec) -> RuntimeResult<()>;
}

/// Collects injected loaders per placement.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    tags: Mutex<HashMap<Placement, Vec<LoaderSpec>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loaders injected at `placement`, in injection order.
    pub fn tags(&self, placement: Placement) -> Vec<LoaderSpec> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&placement)
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentSink for MemoryDocument {
    fn inject(&self, loader: &LoaderSpec) -> RuntimeResult<()> {
        self.tags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(loader.placement)
            .or_default()
            .push(loader.clone());
        Ok(())
    }
}

//! Structured results of runtime operations.

use crate::document::LoaderKey;
use chrono::{DateTime, Utc};
use pixelgate_types::PixelType;
use serde::Serialize;

/// What happened to one native call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Sent,
    /// The vendor global is absent; expected while SDKs load or when blocked.
    VendorNotLoaded,
    /// The vendor SDK failed or panicked; caught and recorded.
    VendorCallError { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchEntry {
    pub vendor: PixelType,
    pub pixel_id: String,
    pub target: String,
    pub method: String,
    pub outcome: DispatchOutcome,
}

/// Outcome of one `dispatch` call, entry per native call in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub entries: Vec<DispatchEntry>,
    pub dispatched_at: DateTime<Utc>,
}

impl DispatchReport {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            dispatched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Sent))
    }

    pub fn not_loaded(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::VendorNotLoaded))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::VendorCallError { .. }))
    }

    fn count(&self, pred: impl Fn(&DispatchOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// Outcome of one `load_placement_scripts` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub injected: Vec<LoaderKey>,
    /// Already present from an earlier call; skipped.
    pub already_present: Vec<LoaderKey>,
    pub failed: Vec<LoaderKey>,
}

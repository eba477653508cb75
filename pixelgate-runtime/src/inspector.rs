//! Read-only debug view of dispatch state.

use crate::dispatcher::PixelDispatcher;
use crate::document::LoaderKey;
use crate::report::DispatchReport;
use pixelgate_catalog::CatalogStatus;
use pixelgate_filter::{find_issues, ConfigIssue};
use pixelgate_types::{ConsentRecord, ConsentStatus, PixelDefinition};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshot {
    pub catalog: CatalogStatus,
    pub pixels: Vec<PixelDefinition>,
    pub consent: Option<ConsentRecord>,
    pub consent_status: ConsentStatus,
    pub injected: Vec<LoaderKey>,
    pub last_report: Option<DispatchReport>,
    pub issues: Vec<ConfigIssue>,
}

/// Exposes what the dispatcher knows without changing any of it. Reads the
/// cached catalog only; it never triggers a fetch.
pub struct DebugInspector {
    dispatcher: Arc<PixelDispatcher>,
}

impl DebugInspector {
    pub fn new(dispatcher: Arc<PixelDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn snapshot(&self) -> DebugSnapshot {
        let catalog = self.dispatcher.catalog();
        let pixels = catalog.get_all().await;
        let consent = self.dispatcher.consent().get_consent();
        let runtime = self.dispatcher.runtime();
        DebugSnapshot {
            catalog: catalog.status().await,
            issues: find_issues(&pixels),
            pixels: pixels.as_ref().clone(),
            consent_status: ConsentStatus::of(consent.as_ref()),
            consent,
            injected: runtime.injected(),
            last_report: runtime.last_report(),
        }
    }
}

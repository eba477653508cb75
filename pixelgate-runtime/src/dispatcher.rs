//! Wires catalog, consent, planning and runtime together.

use crate::plan::{plan_event, plan_placement, EventPlan};
use crate::report::{DispatchReport, LoadReport};
use crate::runtime::DispatchRuntime;
use pixelgate_catalog::PixelCatalog;
use pixelgate_consent::ConsentStore;
use pixelgate_filter::ConfigIssue;
use pixelgate_types::{DispatchEvent, PixelDefinition, PixelType, Placement};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result of loading one placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementOutcome {
    pub page: String,
    pub placement: Placement,
    pub load: LoadReport,
    pub issues: Vec<ConfigIssue>,
    /// Set when the catalog could not be refreshed and a cached (possibly
    /// empty) list was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<String>,
}

/// Result of tracking one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOutcome {
    pub plan: EventPlan,
    pub report: DispatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<String>,
}

/// End-to-end orchestration for a client session.
pub struct PixelDispatcher {
    catalog: Arc<PixelCatalog>,
    consent: Arc<ConsentStore>,
    runtime: Arc<DispatchRuntime>,
}

impl PixelDispatcher {
    pub fn new(
        catalog: Arc<PixelCatalog>,
        consent: Arc<ConsentStore>,
        runtime: Arc<DispatchRuntime>,
    ) -> Self {
        Self {
            catalog,
            consent,
            runtime,
        }
    }

    pub fn catalog(&self) -> &Arc<PixelCatalog> {
        &self.catalog
    }

    pub fn consent(&self) -> &Arc<ConsentStore> {
        &self.consent
    }

    pub fn runtime(&self) -> &Arc<DispatchRuntime> {
        &self.runtime
    }

    /// Injects loaders for every pixel eligible at `placement` on `page`.
    pub async fn load_placement(&self, page: &str, placement: Placement) -> PlacementOutcome {
        let (pixels, catalog_error) = self.snapshot().await;
        let consent = self.consent.get_consent();
        let plan = plan_placement(&pixels, consent.as_ref(), page, placement);
        let load = self.runtime.load_placement_scripts(&plan.selection.pixels);
        info!(
            "Loaded {} on {}: {} injected, {} already present",
            placement,
            page,
            load.injected.len(),
            load.already_present.len()
        );
        PlacementOutcome {
            page: page.to_string(),
            placement,
            load,
            issues: plan.selection.issues,
            catalog_error,
        }
    }

    /// Maps `event` for every eligible pixel and dispatches the calls.
    pub async fn track(&self, event: &DispatchEvent) -> TrackOutcome {
        self.track_for(event, None).await
    }

    /// Like [`track`](Self::track), restricted to `pixel_types` when given.
    pub async fn track_for(
        &self,
        event: &DispatchEvent,
        pixel_types: Option<Vec<PixelType>>,
    ) -> TrackOutcome {
        let (pixels, catalog_error) = self.snapshot().await;
        let consent = self.consent.get_consent();
        let plan = plan_event(&pixels, consent.as_ref(), event, pixel_types);
        let report = self.runtime.dispatch(&plan.calls);
        info!(
            "Tracked '{}' ({}): {} calls, {} sent",
            event.name,
            event.id,
            plan.calls.len(),
            report.sent()
        );
        TrackOutcome {
            plan,
            report,
            catalog_error,
        }
    }

    async fn snapshot(&self) -> (Arc<Vec<PixelDefinition>>, Option<String>) {
        let pixels = self.catalog.current().await;
        let catalog_error = self.catalog.status().await.last_failure;
        (pixels, catalog_error)
    }
}

//! Request handlers and wire types.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderName};
use axum::response::Json;
use pixelgate_catalog::CatalogStatus;
use pixelgate_consent::cookie;
use pixelgate_filter::{
    find_issues, group_by_placement, select_eligible, ByPlacement, ConfigIssue, PixelQuery,
};
use pixelgate_mapper::{loader_for, LoaderSpec};
use pixelgate_runtime::plan::plan_event;
use pixelgate_runtime::SkippedPixel;
use pixelgate_types::{
    ConsentRecord, ConsentStatus, ConsentUpdate, DefinitionId, DispatchEvent, EventData,
    NativeCall, PixelDefinition, PixelType, Placement, ALL_PAGES,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

fn all_pages() -> String {
    ALL_PAGES.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActiveQuery {
    #[serde(default = "all_pages")]
    pub page: String,
    pub placement: Option<Placement>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePixelsResponse {
    pub pixels: Vec<PixelDefinition>,
    pub pixels_by_placement: ByPlacement,
    pub loaders: Vec<LoaderSpec>,
    pub total: usize,
    pub issues: Vec<ConfigIssue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub event_name: String,
    #[serde(default)]
    pub event_data: EventData,
    pub pixel_types: Option<Vec<PixelType>>,
    pub page: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub calls: Vec<NativeCall>,
    pub pixels_triggered: usize,
    pub triggered: Vec<DefinitionId>,
    pub skipped: Vec<SkippedPixel>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentResponse {
    pub consent: Option<ConsentRecord>,
    pub status: ConsentStatus,
}

impl ConsentResponse {
    fn of(consent: Option<ConsentRecord>) -> Self {
        Self {
            status: ConsentStatus::of(consent.as_ref()),
            consent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResponse {
    pub catalog: CatalogStatus,
    pub pixels: Vec<PixelDefinition>,
    pub issues: Vec<ConfigIssue>,
}

/// The consent record carried by the request, if any readable one exists.
fn request_consent(headers: &HeaderMap, cookie_name: &str) -> Option<ConsentRecord> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie::from_cookie_header(header, cookie_name))
}

pub(crate) async fn active_pixels(
    State(state): State<AppState>,
    Query(query): Query<ActiveQuery>,
    headers: HeaderMap,
) -> Json<ActivePixelsResponse> {
    let consent = request_consent(&headers, &state.consent.cookie_name);
    let catalog = state.catalog.current().await;

    let mut pixel_query = PixelQuery::page(query.page.clone());
    if let Some(placement) = query.placement {
        pixel_query = pixel_query.with_placement(placement);
    }
    let selection = select_eligible(&catalog, consent.as_ref(), &pixel_query);
    debug!(
        "Active pixels for page {} ({}): {} of {}",
        query.page,
        ConsentStatus::of(consent.as_ref()),
        selection.pixels.len(),
        catalog.len()
    );

    Json(ActivePixelsResponse {
        pixels_by_placement: group_by_placement(&selection.pixels),
        loaders: selection.pixels.iter().map(loader_for).collect(),
        total: selection.pixels.len(),
        pixels: selection.pixels,
        issues: selection.issues,
    })
}

pub(crate) async fn track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<TrackRequest>,
) -> Json<TrackResponse> {
    let consent = request_consent(&headers, &state.consent.cookie_name);
    let catalog = state.catalog.current().await;

    let event = DispatchEvent::new(request.event_name)
        .on_page(request.page.unwrap_or_else(all_pages))
        .with_data(request.event_data);
    let plan = plan_event(&catalog, consent.as_ref(), &event, request.pixel_types);

    let message = format!(
        "Event '{}' mapped for {} pixel(s), {} skipped",
        event.name,
        plan.calls.len(),
        plan.skipped.len()
    );
    debug!("{}", message);

    Json(TrackResponse {
        pixels_triggered: plan.triggered.len(),
        calls: plan.calls,
        triggered: plan.triggered,
        skipped: plan.skipped,
        message,
    })
}

pub(crate) async fn get_consent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ConsentResponse> {
    Json(ConsentResponse::of(request_consent(
        &headers,
        &state.consent.cookie_name,
    )))
}

pub(crate) async fn put_consent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<ConsentUpdate>,
) -> Result<([(HeaderName, String); 1], Json<ConsentResponse>), ApiError> {
    let current = request_consent(&headers, &state.consent.cookie_name);
    let next = update.apply(current.as_ref());
    let set_cookie = cookie::set_cookie(
        &state.consent.cookie_name,
        &next,
        state.consent.max_age_secs,
    )?;
    info!(
        "Consent {} -> {}",
        ConsentStatus::of(current.as_ref()),
        next.status()
    );
    Ok((
        [(SET_COOKIE, set_cookie)],
        Json(ConsentResponse::of(Some(next))),
    ))
}

pub(crate) async fn delete_consent(
    State(state): State<AppState>,
) -> ([(HeaderName, String); 1], Json<ConsentResponse>) {
    debug!("Consent cookie cleared");
    (
        [(SET_COOKIE, cookie::clear_cookie(&state.consent.cookie_name))],
        Json(ConsentResponse::of(None)),
    )
}

pub(crate) async fn debug_state(State(state): State<AppState>) -> Json<DebugResponse> {
    let pixels = state.catalog.get_all().await;
    Json(DebugResponse {
        catalog: state.catalog.status().await,
        issues: find_issues(&pixels),
        pixels: pixels.as_ref().clone(),
    })
}

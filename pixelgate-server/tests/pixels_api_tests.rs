mod common;

use common::{consent_cookie, spawn_test_server};
use pixelgate_types::ConsentRecord;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn ids(body: &Value, key: &str) -> Vec<String> {
    body[key]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

async fn get_active(base: &str, query: &str, cookie: Option<String>) -> Value {
    let mut req = reqwest::Client::new().get(format!("{}/api/v1/pixels/active{}", base, query));
    if let Some(cookie) = cookie {
        req = req.header("cookie", cookie);
    }
    let resp = req.send().await.unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

// ============================================================================
// GET /api/v1/pixels/active
// ============================================================================

#[tokio::test]
async fn no_consent_returns_only_compliant_pixels() {
    let base = spawn_test_server(false).await;
    let body = get_active(&base, "", None).await;

    assert_eq!(ids(&body, "pixels"), vec!["ga4"]);
    assert_eq!(body["total"], 1);
    assert_eq!(body["issues"][0]["kind"], "invalid_pixel_id");
    assert_eq!(body["issues"][0]["definition_id"], "broken");
}

#[tokio::test]
async fn consent_cookie_unlocks_marketing_pixels() {
    let base = spawn_test_server(false).await;

    let necessary = get_active(&base, "", Some(consent_cookie(&ConsentRecord::necessary_only()))).await;
    assert_eq!(ids(&necessary, "pixels"), vec!["ga4"]);

    let marketing = ConsentRecord::new(false, true, false);
    let body = get_active(&base, "?page=home", Some(consent_cookie(&marketing))).await;
    assert_eq!(ids(&body, "pixels"), vec!["fb", "vk", "ga4"]);
    assert_eq!(body["total"], 3);
}

#[tokio::test]
async fn page_targeting_applies() {
    let base = spawn_test_server(false).await;
    let cookie = consent_cookie(&ConsentRecord::all());

    let home = get_active(&base, "?page=home", Some(cookie.clone())).await;
    assert!(!ids(&home, "pixels").contains(&"ym".to_string()));

    let checkout = get_active(&base, "?page=checkout", Some(cookie)).await;
    assert!(ids(&checkout, "pixels").contains(&"ym".to_string()));
}

#[tokio::test]
async fn placement_filter_and_grouping() {
    let base = spawn_test_server(false).await;
    let cookie = consent_cookie(&ConsentRecord::all());

    let all = get_active(&base, "?page=home", Some(cookie.clone())).await;
    assert_eq!(ids(&all["pixelsByPlacement"], "head"), vec!["vk", "ga4"]);
    assert_eq!(ids(&all["pixelsByPlacement"], "body_end"), vec!["fb"]);

    let body_end = get_active(&base, "?page=home&placement=body_end", Some(cookie)).await;
    assert_eq!(ids(&body_end, "pixels"), vec!["fb"]);
    assert_eq!(body_end["loaders"].as_array().unwrap().len(), 1);
    assert_eq!(body_end["loaders"][0]["global"], "fbq");
    assert_eq!(body_end["loaders"][0]["placement"], "body_end");
}

#[tokio::test]
async fn unknown_placement_is_rejected() {
    let base = spawn_test_server(false).await;
    let resp = reqwest::get(format!("{}/api/v1/pixels/active?placement=footer", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn garbage_cookie_counts_as_no_consent() {
    let base = spawn_test_server(false).await;
    let body = get_active(&base, "", Some("pixel_consent=%%%not-base64".to_string())).await;
    assert_eq!(ids(&body, "pixels"), vec!["ga4"]);
}

// ============================================================================
// POST /api/v1/pixels/active
// ============================================================================

async fn post_event(base: &str, body: Value, cookie: Option<String>) -> Value {
    let mut req = reqwest::Client::new()
        .post(format!("{}/api/v1/pixels/active", base))
        .json(&body);
    if let Some(cookie) = cookie {
        req = req.header("cookie", cookie);
    }
    let resp = req.send().await.unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn purchase_maps_to_native_calls() {
    let base = spawn_test_server(false).await;
    let body = post_event(
        &base,
        json!({ "eventName": "purchase", "eventData": { "value": 100 } }),
        Some(consent_cookie(&ConsentRecord::all())),
    )
    .await;

    assert_eq!(body["pixelsTriggered"], 3);
    let calls = body["calls"].as_array().unwrap();
    let fb = calls.iter().find(|c| c["target"] == "fbq").unwrap();
    assert_eq!(fb["method"], "track");
    assert_eq!(fb["args"][0], "Purchase");
    assert_eq!(fb["args"][1], json!({ "value": 100 }));
    assert!(body["message"].as_str().unwrap().contains("purchase"));
}

#[tokio::test]
async fn pixel_types_restrict_the_event() {
    let base = spawn_test_server(false).await;
    let body = post_event(
        &base,
        json!({ "eventName": "lead", "eventData": {}, "pixelTypes": ["vk"] }),
        Some(consent_cookie(&ConsentRecord::all())),
    )
    .await;

    assert_eq!(body["pixelsTriggered"], 1);
    assert_eq!(body["calls"][0]["target"], "VK");
    assert_eq!(body["calls"][0]["method"], "Goal");
    assert_eq!(body["triggered"], json!(["vk"]));
}

#[tokio::test]
async fn event_without_consent_reaches_compliant_only() {
    let base = spawn_test_server(false).await;
    let body = post_event(&base, json!({ "eventName": "page_view" }), None).await;

    assert_eq!(body["pixelsTriggered"], 1);
    assert_eq!(body["calls"][0]["target"], "gtag");
    assert!(body["skipped"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_event_body_is_rejected() {
    let base = spawn_test_server(false).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/api/v1/pixels/active", base))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

// ============================================================================
// GET /api/v1/pixels/debug
// ============================================================================

#[tokio::test]
async fn debug_route_hidden_unless_enabled() {
    let base = spawn_test_server(false).await;
    let resp = reqwest::get(format!("{}/api/v1/pixels/debug", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn debug_route_reports_catalog() {
    let base = spawn_test_server(true).await;
    // Prime the catalog.
    get_active(&base, "", None).await;

    let resp = reqwest::get(format!("{}/api/v1/pixels/debug", base))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["catalog"]["source"], "static");
    assert_eq!(body["catalog"]["pixelCount"], 5);
    assert_eq!(body["pixels"].as_array().unwrap().len(), 5);
    assert_eq!(body["issues"].as_array().unwrap().len(), 1);
}

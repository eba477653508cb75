use pixelgate_mapper::vocabulary::{CANONICAL_EVENTS, PAGE_VIEW, PURCHASE};
use pixelgate_mapper::{loader_for, map_event, map_for_pixel, table_for};
use pixelgate_types::{DispatchEvent, EventData, EventValue, PixelDefinition, PixelType, Placement};
use pretty_assertions::assert_eq;
use serde_json::json;

fn data(pairs: &[(&str, EventValue)]) -> EventData {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn sample_id(vendor: PixelType) -> &'static str {
    match vendor {
        PixelType::YandexMetrica => "12345678",
        PixelType::Vk => "VK-RTRG-1-abc",
        PixelType::VkAds => "3412345",
        PixelType::Facebook => "123456789012345",
        PixelType::Ga4 => "G-ABC1234",
        PixelType::GoogleAds => "AW-123456789",
        PixelType::Tiktok => "C4ABCDEFGHIJ12345678",
    }
}

// ── Completeness ─────────────────────────────────────────────────

#[test]
fn every_vendor_and_canonical_event_is_defined() {
    let empty = EventData::new();
    for vendor in PixelType::ALL {
        let table = table_for(vendor);
        assert_eq!(table.vendor(), vendor);
        for event in CANONICAL_EVENTS {
            let call = map_event(vendor, sample_id(vendor), event, &empty);
            assert_eq!(
                call.is_some(),
                table.handles(event),
                "{vendor} / {event} mapped to {call:?}"
            );
            if let Some(call) = call {
                assert_eq!(call.target, table.global());
                assert_eq!(call.vendor, vendor);
            }
        }
    }
}

#[test]
fn skip_follows_default_flag_for_unlisted_names() {
    let empty = EventData::new();
    for vendor in PixelType::ALL {
        let table = table_for(vendor);
        let call = map_event(vendor, sample_id(vendor), "webinar_signup", &empty);
        assert_eq!(call.is_some(), table.has_default(), "{vendor}");
    }
}

#[test]
fn unmapped_events_use_defaults_or_skip() {
    let empty = EventData::new();
    let name = "webinar_signup";

    let fb = map_event(PixelType::Facebook, "123456789012345", name, &empty).unwrap();
    assert_eq!(fb.method, "trackCustom");
    assert_eq!(fb.args[0], json!(name));

    let vk = map_event(PixelType::Vk, "VK-RTRG-1-abc", name, &empty).unwrap();
    assert_eq!(vk.method, "Goal");
    assert_eq!(vk.args[0], json!("conversion"));

    let ym = map_event(PixelType::YandexMetrica, "12345678", name, &empty).unwrap();
    assert_eq!(ym.args[1], json!(name));

    let ga = map_event(PixelType::Ga4, "G-ABC1234", name, &empty).unwrap();
    assert_eq!(ga.args[0], json!(name));

    assert!(map_event(PixelType::GoogleAds, "AW-123456789", name, &empty).is_none());
    assert!(map_event(PixelType::Tiktok, "C4ABCDEFGHIJ12345678", name, &empty).is_none());
}

// ── Vendor shapes ────────────────────────────────────────────────

#[test]
fn facebook_purchase() {
    let call = map_event(
        PixelType::Facebook,
        "123456789012345",
        PURCHASE,
        &data(&[("value", 100_i64.into())]),
    )
    .unwrap();
    assert_eq!(call.target, "fbq");
    assert_eq!(call.method, "track");
    assert_eq!(call.args, vec![json!("Purchase"), json!({"value": 100})]);
}

#[test]
fn facebook_carries_event_id_for_dedup() {
    let pixel = PixelDefinition::new("fb", PixelType::Facebook, "123456789012345");
    let event = DispatchEvent::new(PURCHASE).with("value", 10_i64);
    let call = map_for_pixel(&pixel, &event).unwrap();
    assert_eq!(call.args[2], json!({"eventID": event.id.to_string()}));
}

#[test]
fn ga4_passes_through_with_send_to() {
    let call = map_event(
        PixelType::Ga4,
        "G-ABC1234",
        "add_to_cart",
        &data(&[("item_id", "sku-1".into())]),
    )
    .unwrap();
    assert_eq!(call.method, "event");
    assert_eq!(
        call.args,
        vec![json!("add_to_cart"), json!({"item_id": "sku-1", "send_to": "G-ABC1234"})]
    );
}

#[test]
fn yandex_goal_and_hit() {
    let goal = map_event(
        PixelType::YandexMetrica,
        "12345678",
        "lead",
        &data(&[("form", "contact".into())]),
    )
    .unwrap();
    assert_eq!(goal.method, "reachGoal");
    assert_eq!(goal.args, vec![json!(12345678), json!("lead"), json!({"form": "contact"})]);

    let hit = map_event(
        PixelType::YandexMetrica,
        "12345678",
        PAGE_VIEW,
        &data(&[("url", "/blog/post".into())]),
    )
    .unwrap();
    assert_eq!(hit.method, "hit");
    assert_eq!(hit.args, vec![json!(12345678), json!("/blog/post")]);
}

#[test]
fn vk_goal_with_value() {
    let call = map_event(
        PixelType::Vk,
        "VK-RTRG-1-abc",
        PURCHASE,
        &data(&[("value", "1490".into())]),
    )
    .unwrap();
    assert_eq!(call.target, "VK");
    assert_eq!(call.method, "Goal");
    assert_eq!(call.args, vec![json!("purchase"), json!({"value": 1490.0})]);

    let hit = map_event(PixelType::Vk, "VK-RTRG-1-abc", PAGE_VIEW, &EventData::new()).unwrap();
    assert_eq!(hit.method, "Retargeting.Hit");
    assert!(hit.args.is_empty());
}

#[test]
fn vk_ads_reach_goal() {
    let call = map_event(
        PixelType::VkAds,
        "3412345",
        "sign_up",
        &data(&[("value", 5_i64.into())]),
    )
    .unwrap();
    assert_eq!(call.target, "_tmr");
    assert_eq!(call.method, "push");
    assert_eq!(
        call.args,
        vec![json!({"id": 3412345, "type": "reachGoal", "goal": "sign_up", "value": 5.0})]
    );
}

#[test]
fn google_ads_conversion() {
    let pixel = PixelDefinition::new("aw", PixelType::GoogleAds, "AW-123456789")
        .with_conversion_label("AbC-dEf");
    let event = DispatchEvent::new(PURCHASE)
        .with("value", 2500_i64)
        .with("currency", "USD")
        .with("transaction_id", "order-77");
    let call = map_for_pixel(&pixel, &event).unwrap();
    assert_eq!(call.args[0], json!("conversion"));
    assert_eq!(
        call.args[1],
        json!({
            "send_to": "AW-123456789/AbC-dEf",
            "value": 2500.0,
            "currency": "USD",
            "transaction_id": "order-77",
        })
    );
}

#[test]
fn google_ads_falls_back_to_event_id_for_transaction() {
    let pixel = PixelDefinition::new("aw", PixelType::GoogleAds, "AW-123456789");
    let event = DispatchEvent::new("lead");
    let call = map_for_pixel(&pixel, &event).unwrap();
    assert_eq!(call.args[1]["transaction_id"], json!(event.id.to_string()));
    assert_eq!(call.args[1]["send_to"], json!("AW-123456789"));
}

#[test]
fn tiktok_standard_events() {
    let call = map_event(
        PixelType::Tiktok,
        "C4ABCDEFGHIJ12345678",
        PURCHASE,
        &EventData::new(),
    )
    .unwrap();
    assert_eq!(call.method, "track");
    assert_eq!(call.args[0], json!("CompletePayment"));

    let page = map_event(PixelType::Tiktok, "C4ABCDEFGHIJ12345678", PAGE_VIEW, &EventData::new())
        .unwrap();
    assert_eq!(page.method, "page");
}

#[test]
fn event_data_is_never_spliced_into_names() {
    let hostile = "x'); alert(document.cookie); ('";
    let call = map_event(
        PixelType::Facebook,
        "123456789012345",
        PURCHASE,
        &data(&[("note", hostile.into())]),
    )
    .unwrap();
    assert_eq!(call.method, "track");
    assert_eq!(call.args[1]["note"], json!(hostile));
}

// ── Loaders ──────────────────────────────────────────────────────

#[test]
fn loaders_describe_every_vendor() {
    for vendor in PixelType::ALL {
        let pixel = PixelDefinition::new("p", vendor, sample_id(vendor))
            .with_placement(Placement::BodyEnd);
        let loader = loader_for(&pixel);
        assert_eq!(loader.vendor, vendor);
        assert_eq!(loader.placement, Placement::BodyEnd);
        assert!(loader.src.starts_with("https://"), "{vendor}: {}", loader.src);
        assert!(!loader.init_calls.is_empty());
        assert!(loader.init_calls.iter().all(|c| c.target == loader.global));
    }
}

#[test]
fn facebook_loader_initializes_pixel() {
    let pixel = PixelDefinition::new("fb", PixelType::Facebook, "123456789012345");
    let loader = loader_for(&pixel);
    assert_eq!(loader.src, "https://connect.facebook.net/en_US/fbevents.js");
    assert_eq!(loader.init_calls[0].method, "init");
    assert_eq!(loader.init_calls[0].args, vec![json!("123456789012345")]);
    assert!(loader.noscript.unwrap().contains("id=123456789012345"));
}

#[test]
fn gtag_loader_embeds_measurement_id() {
    let pixel = PixelDefinition::new("ga", PixelType::Ga4, "G-ABC1234");
    let loader = loader_for(&pixel);
    assert_eq!(loader.src, "https://www.googletagmanager.com/gtag/js?id=G-ABC1234");
    assert_eq!(loader.init_calls[1].method, "config");
}

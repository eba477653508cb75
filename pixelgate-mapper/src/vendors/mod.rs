//! One mapping table per vendor.

pub mod facebook;
pub mod ga4;
pub mod google_ads;
pub mod tiktok;
pub mod vk;
pub mod vk_ads;
pub mod yandex;

use serde_json::Value;

/// Looks up `canonical` in a `(canonical, native)` table.
pub(crate) fn lookup(table: &[(&str, &'static str)], canonical: &str) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(from, to)| (*from == canonical).then_some(*to))
}

/// Counter ids are numeric for some vendors; pass them as numbers when they
/// parse so the SDK sees the type it documents.
pub(crate) fn counter_arg(pixel_id: &str) -> Value {
    pixel_id
        .parse::<u64>()
        .map_or_else(|_| Value::String(pixel_id.to_string()), Value::from)
}

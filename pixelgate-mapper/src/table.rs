//! The per-vendor table contract.

use crate::loader::LoaderSpec;
use crate::vendors;
use pixelgate_types::{EventData, EventId, NativeCall, PixelDefinition, PixelType};
use serde_json::{Map, Value};

/// Everything a table may read while mapping one event for one pixel.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub pixel_id: &'a str,
    pub name: &'a str,
    pub data: &'a EventData,
    pub event_id: Option<EventId>,
    pub conversion_label: Option<&'a str>,
}

impl<'a> EventContext<'a> {
    pub fn new(pixel_id: &'a str, name: &'a str, data: &'a EventData) -> Self {
        Self {
            pixel_id,
            name,
            data,
            event_id: None,
            conversion_label: None,
        }
    }

    /// Event parameters as a JSON object.
    pub fn params(&self) -> Map<String, Value> {
        self.data
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// A numeric parameter, accepting numeric strings.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.data.get(key).and_then(|v| v.as_f64())
    }

    pub fn text(&self, key: &str) -> Option<&'a str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

/// One vendor's mapping table and loader description.
pub trait VendorTable: Sync {
    fn vendor(&self) -> PixelType;

    /// Name of the vendor's global runtime object.
    fn global(&self) -> &'static str;

    /// Native event name for a canonical name, if the table lists one.
    fn native_name(&self, canonical: &str) -> Option<&'static str>;

    /// Whether unlisted names fall back to a default call. Vendors returning
    /// false skip unlisted events.
    fn has_default(&self) -> bool;

    /// Builds the call for an event this table handles.
    fn build(&self, ctx: &EventContext<'_>) -> NativeCall;

    /// Whether `name` produces a call: listed in the table, or covered by the
    /// vendor's default.
    fn handles(&self, name: &str) -> bool {
        self.has_default() || self.native_name(name).is_some()
    }

    /// Maps an event, returning `None` for names the vendor does not handle.
    fn map(&self, ctx: &EventContext<'_>) -> Option<NativeCall> {
        self.handles(ctx.name).then(|| self.build(ctx))
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec;

    /// Starts a call on this vendor's global.
    fn call(&self, ctx: &EventContext<'_>, method: &str) -> NativeCall {
        NativeCall::new(self.vendor(), ctx.pixel_id, self.global(), method)
    }
}

/// The table for `vendor`.
pub fn table_for(vendor: PixelType) -> &'static dyn VendorTable {
    match vendor {
        PixelType::YandexMetrica => &vendors::yandex::YandexMetrica,
        PixelType::Vk => &vendors::vk::Vk,
        PixelType::VkAds => &vendors::vk_ads::VkAds,
        PixelType::Facebook => &vendors::facebook::Facebook,
        PixelType::Ga4 => &vendors::ga4::Ga4,
        PixelType::GoogleAds => &vendors::google_ads::GoogleAds,
        PixelType::Tiktok => &vendors::tiktok::Tiktok,
    }
}

//! Google Ads conversion tracking: `gtag`.
//!
//! Only conversion-worthy events are reported. Google Ads has no generic
//! event to fall back to, so any other name maps to `None`, including
//! `page_view`, which the loader's `config` call already covers.

use super::lookup;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::*;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Map, Value};

const CONVERSIONS: [(&str, &str); 6] = [
    (PURCHASE, "conversion"),
    (LEAD, "conversion"),
    (SIGN_UP, "conversion"),
    (SUBSCRIBE, "conversion"),
    (BEGIN_CHECKOUT, "conversion"),
    (CONTACT, "conversion"),
];

pub struct GoogleAds;

impl VendorTable for GoogleAds {
    fn vendor(&self) -> PixelType {
        PixelType::GoogleAds
    }

    fn global(&self) -> &'static str {
        "gtag"
    }

    fn native_name(&self, canonical: &str) -> Option<&'static str> {
        lookup(&CONVERSIONS, canonical)
    }

    fn has_default(&self) -> bool {
        false
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        let native = self.native_name(ctx.name).unwrap_or("conversion");

        let send_to = match ctx.conversion_label {
            Some(label) => format!("{}/{}", ctx.pixel_id, label),
            None => ctx.pixel_id.to_string(),
        };
        let mut params = Map::new();
        params.insert("send_to".into(), json!(send_to));
        if let Some(value) = ctx.number("value") {
            params.insert("value".into(), json!(value));
            params.insert("currency".into(), json!(ctx.text("currency").unwrap_or("RUB")));
        }
        let transaction_id = ctx
            .text("transaction_id")
            .map(str::to_string)
            .or_else(|| ctx.event_id.map(|id| id.to_string()));
        if let Some(transaction_id) = transaction_id {
            params.insert("transaction_id".into(), json!(transaction_id));
        }

        self.call(ctx, "event").arg(native).arg(Value::Object(params))
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(
            pixel,
            self.global(),
            format!("https://www.googletagmanager.com/gtag/js?id={}", pixel.pixel_id),
        )
        .init("js", vec![])
        .init("config", vec![json!(pixel.pixel_id)])
    }
}

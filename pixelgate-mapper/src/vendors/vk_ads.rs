//! VK Ads (Top@Mail.ru counter): `_tmr`. Goals are free-form, so every name
//! passes through as a `reachGoal` push.

use super::counter_arg;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::PAGE_VIEW;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Map, Value};

pub struct VkAds;

impl VendorTable for VkAds {
    fn vendor(&self) -> PixelType {
        PixelType::VkAds
    }

    fn global(&self) -> &'static str {
        "_tmr"
    }

    fn native_name(&self, _canonical: &str) -> Option<&'static str> {
        None
    }

    fn has_default(&self) -> bool {
        true
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        let mut payload = Map::new();
        payload.insert("id".into(), counter_arg(ctx.pixel_id));
        if ctx.name == PAGE_VIEW {
            payload.insert("type".into(), json!("pageView"));
        } else {
            payload.insert("type".into(), json!("reachGoal"));
            payload.insert("goal".into(), json!(ctx.name));
            if let Some(value) = ctx.number("value") {
                payload.insert("value".into(), json!(value));
            }
        }
        self.call(ctx, "push").arg(Value::Object(payload))
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(pixel, self.global(), "https://top-fwz1.mail.ru/js/code.js")
            .init(
                "push",
                vec![json!({ "id": counter_arg(&pixel.pixel_id), "type": "pageView", "start": true })],
            )
            .noscript(format!("https://top-fwz1.mail.ru/counter?id={};js=na", pixel.pixel_id))
    }
}

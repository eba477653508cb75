//! VK retargeting pixel: `VK` (openapi.js).

use super::lookup;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::*;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::json;

const GOALS: [(&str, &str); 11] = [
    (VIEW_CONTENT, "view_content"),
    (SEARCH, "search"),
    (ADD_TO_CART, "add_to_cart"),
    (ADD_TO_WISHLIST, "add_to_wishlist"),
    (BEGIN_CHECKOUT, "initiate_checkout"),
    (ADD_PAYMENT_INFO, "add_payment_info"),
    (PURCHASE, "purchase"),
    (LEAD, "lead"),
    (SIGN_UP, "complete_registration"),
    (SUBSCRIBE, "subscribe"),
    (CONTACT, "contact"),
];

/// Goal reported for names outside the table.
const DEFAULT_GOAL: &str = "conversion";

pub struct Vk;

impl VendorTable for Vk {
    fn vendor(&self) -> PixelType {
        PixelType::Vk
    }

    fn global(&self) -> &'static str {
        "VK"
    }

    fn native_name(&self, canonical: &str) -> Option<&'static str> {
        lookup(&GOALS, canonical)
    }

    fn has_default(&self) -> bool {
        true
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        if ctx.name == PAGE_VIEW {
            return self.call(ctx, "Retargeting.Hit");
        }
        let goal = self.native_name(ctx.name).unwrap_or(DEFAULT_GOAL);
        let call = self.call(ctx, "Goal").arg(goal);
        match ctx.number("value") {
            Some(value) => call.arg(json!({ "value": value })),
            None => call,
        }
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(pixel, self.global(), "https://vk.com/js/api/openapi.js?169")
            .init("Retargeting.Init", vec![json!(pixel.pixel_id)])
            .init("Retargeting.Hit", vec![])
            .noscript(format!("https://vk.com/rtrg?p={}", pixel.pixel_id))
    }
}

//! TikTok pixel: `ttq`.
//!
//! TikTok optimizes on standard events only; unlisted names map to `None`.
//! `page_view` is reported through `ttq.page()` rather than `track`.

use super::lookup;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::*;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Value};

const STANDARD_EVENTS: [(&str, &str); 12] = [
    (PAGE_VIEW, "Pageview"),
    (VIEW_CONTENT, "ViewContent"),
    (SEARCH, "Search"),
    (ADD_TO_CART, "AddToCart"),
    (ADD_TO_WISHLIST, "AddToWishlist"),
    (BEGIN_CHECKOUT, "InitiateCheckout"),
    (ADD_PAYMENT_INFO, "AddPaymentInfo"),
    (PURCHASE, "CompletePayment"),
    (LEAD, "SubmitForm"),
    (SIGN_UP, "CompleteRegistration"),
    (SUBSCRIBE, "Subscribe"),
    (CONTACT, "Contact"),
];

pub struct Tiktok;

impl VendorTable for Tiktok {
    fn vendor(&self) -> PixelType {
        PixelType::Tiktok
    }

    fn global(&self) -> &'static str {
        "ttq"
    }

    fn native_name(&self, canonical: &str) -> Option<&'static str> {
        lookup(&STANDARD_EVENTS, canonical)
    }

    fn has_default(&self) -> bool {
        false
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        if ctx.name == PAGE_VIEW {
            return self.call(ctx, "page");
        }
        let native = self.native_name(ctx.name).unwrap_or(ctx.name);
        let call = self
            .call(ctx, "track")
            .arg(native)
            .arg(Value::Object(ctx.params()));
        match ctx.event_id {
            Some(id) => call.arg(json!({ "event_id": id.to_string() })),
            None => call,
        }
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(
            pixel,
            self.global(),
            format!(
                "https://analytics.tiktok.com/i18n/pixel/events.js?sdkid={}&lib=ttq",
                pixel.pixel_id
            ),
        )
        .init("load", vec![json!(pixel.pixel_id)])
        .init("page", vec![])
    }
}

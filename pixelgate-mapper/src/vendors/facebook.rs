//! Meta (Facebook) pixel: `fbq`.

use super::lookup;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::*;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Value};

const STANDARD_EVENTS: [(&str, &str); 12] = [
    (PAGE_VIEW, "PageView"),
    (VIEW_CONTENT, "ViewContent"),
    (SEARCH, "Search"),
    (ADD_TO_CART, "AddToCart"),
    (ADD_TO_WISHLIST, "AddToWishlist"),
    (BEGIN_CHECKOUT, "InitiateCheckout"),
    (ADD_PAYMENT_INFO, "AddPaymentInfo"),
    (PURCHASE, "Purchase"),
    (LEAD, "Lead"),
    (SIGN_UP, "CompleteRegistration"),
    (SUBSCRIBE, "Subscribe"),
    (CONTACT, "Contact"),
];

pub struct Facebook;

impl VendorTable for Facebook {
    fn vendor(&self) -> PixelType {
        PixelType::Facebook
    }

    fn global(&self) -> &'static str {
        "fbq"
    }

    fn native_name(&self, canonical: &str) -> Option<&'static str> {
        lookup(&STANDARD_EVENTS, canonical)
    }

    fn has_default(&self) -> bool {
        true
    }

    /// Standard events use `track`; anything else is a custom event.
    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        let call = match self.native_name(ctx.name) {
            Some(native) => self.call(ctx, "track").arg(native),
            None => self.call(ctx, "trackCustom").arg(ctx.name),
        };
        let call = call.arg(Value::Object(ctx.params()));
        match ctx.event_id {
            Some(id) => call.arg(json!({ "eventID": id.to_string() })),
            None => call,
        }
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(pixel, self.global(), "https://connect.facebook.net/en_US/fbevents.js")
            .init("init", vec![json!(pixel.pixel_id)])
            .init("track", vec![json!("PageView")])
            .noscript(format!(
                "https://www.facebook.com/tr?id={}&ev=PageView&noscript=1",
                pixel.pixel_id
            ))
    }
}

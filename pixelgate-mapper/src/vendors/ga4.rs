//! Google Analytics 4: `gtag`. Its event namespace is already
//! vendor-neutral, so names pass through untouched.

use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Value};

pub struct Ga4;

impl VendorTable for Ga4 {
    fn vendor(&self) -> PixelType {
        PixelType::Ga4
    }

    fn global(&self) -> &'static str {
        "gtag"
    }

    fn native_name(&self, _canonical: &str) -> Option<&'static str> {
        None
    }

    fn has_default(&self) -> bool {
        true
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        let mut params = ctx.params();
        // Route to this property only when several tags share the page.
        params.insert("send_to".into(), json!(ctx.pixel_id));
        self.call(ctx, "event").arg(ctx.name).arg(Value::Object(params))
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

//! Yandex Metrika: `ym`. Goal names are site-defined, so canonical names
//! pass through as `reachGoal` targets.

use super::counter_arg;
use crate::loader::LoaderSpec;
use crate::table::{EventContext, VendorTable};
use crate::vocabulary::PAGE_VIEW;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType};
use serde_json::{json, Value};

pub struct YandexMetrica;

impl VendorTable for YandexMetrica {
    fn vendor(&self) -> PixelType {
        PixelType::YandexMetrica
    }

    fn global(&self) -> &'static str {
        "ym"
    }

    fn native_name(&self, _canonical: &str) -> Option<&'static str> {
        None
    }

    fn has_default(&self) -> bool {
        true
    }

    fn build(&self, ctx: &EventContext<'_>) -> NativeCall {
        let counter = counter_arg(ctx.pixel_id);
        if ctx.name == PAGE_VIEW {
            let call = self.call(ctx, "hit").arg(counter);
            return match ctx.text("url") {
                Some(url) => call.arg(url),
                None => call,
            };
        }
        self.call(ctx, "reachGoal")
            .arg(counter)
            .arg(ctx.name)
            .arg(Value::Object(ctx.params()))
    }

    fn loader(&self, pixel: &PixelDefinition) -> LoaderSpec {
        LoaderSpec::new(pixel, self.global(), "https://mc.yandex.ru/metrika/tag.js")
            .init(
                "init",
                vec![
                    counter_arg(&pixel.pixel_id),
                    json!({
                        "clickmap": true,
                        "trackLinks": true,
                        "accurateTrackBounce": true,
                    }),
                ],
            )
            .noscript(format!("https://mc.yandex.ru/watch/{}", pixel.pixel_id))
    }
}

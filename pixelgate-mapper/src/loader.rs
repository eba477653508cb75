//! Vendor loader script descriptions.

use crate::table::table_for;
use pixelgate_types::{NativeCall, PixelDefinition, PixelType, Placement};
use serde::Serialize;

/// What to inject into the document for one pixel: the SDK script, the
/// bootstrap calls to run once it is queued, and an optional tracking image
/// for clients without script support.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderSpec {
    pub vendor: PixelType,
    pub pixel_id: String,
    pub placement: Placement,
    /// Global the SDK installs.
    pub global: &'static str,
    pub src: String,
    pub init_calls: Vec<NativeCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noscript: Option<String>,
}

impl LoaderSpec {
    pub(crate) fn new(pixel: &PixelDefinition, global: &'static str, src: impl Into<String>) -> Self {
        Self {
            vendor: pixel.pixel_type,
            pixel_id: pixel.pixel_id.clone(),
            placement: pixel.placement,
            global,
            src: src.into(),
            init_calls: Vec::new(),
            noscript: None,
        }
    }

    pub(crate) fn init(mut self, method: &str, args: Vec<serde_json::Value>) -> Self {
        let mut call = NativeCall::new(self.vendor, &self.pixel_id, self.global, method);
        call.args = args;
        self.init_calls.push(call);
        self
    }

    pub(crate) fn noscript(mut self, url: impl Into<String>) -> Self {
        self.noscript = Some(url.into());
        self
    }
}

/// The loader for a configured pixel.
pub fn loader_for(pixel: &PixelDefinition) -> LoaderSpec {
    table_for(pixel.pixel_type).loader(pixel)
}

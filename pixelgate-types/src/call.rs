//! Structured vendor invocations.

use crate::pixel::PixelType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A vendor-specific call, already mapped and ready to execute.
///
/// `target` names the vendor's global runtime object (`fbq`, `gtag`, `ym`,
/// ...), `method` the entry point on it. Arguments are data, never program
/// text, so nothing downstream has to evaluate strings built from event
/// parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCall {
    pub vendor: PixelType,
    pub pixel_id: String,
    pub target: String,
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl NativeCall {
    #[must_use]
    pub fn new(
        vendor: PixelType,
        pixel_id: impl Into<String>,
        target: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            vendor,
            pixel_id: pixel_id.into(),
            target: target.into(),
            method: method.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

impl fmt::Display for NativeCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{} args", self.target, self.method, self.args.len())
    }
}

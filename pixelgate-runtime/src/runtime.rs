//! The dispatch runtime.

use crate::capability::{VendorCallError, VendorCapabilities};
use crate::document::{DocumentSink, LoaderKey};
use crate::error::RuntimeError;
use crate::report::{DispatchEntry, DispatchOutcome, DispatchReport, LoadReport};
use pixelgate_mapper::loader_for;
use pixelgate_types::{NativeCall, PixelDefinition};
use std::any::Any;
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

/// Executes native calls and injects loaders without ever failing the
/// caller. It never touches consent or the catalog.
pub struct DispatchRuntime {
    capabilities: Arc<dyn VendorCapabilities>,
    document: Arc<dyn DocumentSink>,
    /// Loaders already injected, keyed by vendor, pixel id and placement.
    injected: Mutex<HashSet<LoaderKey>>,
    last_report: Mutex<Option<DispatchReport>>,
}

impl DispatchRuntime {
    pub fn new(capabilities: Arc<dyn VendorCapabilities>, document: Arc<dyn DocumentSink>) -> Self {
        Self {
            capabilities,
            document,
            injected: Mutex::new(HashSet::new()),
            last_report: Mutex::new(None),
        }
    }

    /// Ensures one loader tag per pixel is present. Re-running with the same
    /// pixels is a no-op.
    pub fn load_placement_scripts(&self, pixels: &[PixelDefinition]) -> LoadReport {
        let mut report = LoadReport::default();
        for pixel in pixels {
            let loader = loader_for(pixel);
            let key = LoaderKey::of(&loader);

            // Check-and-inject under one lock so concurrent loads cannot
            // both inject the same key.
            let mut injected = self.injected.lock().unwrap_or_else(PoisonError::into_inner);
            if injected.contains(&key) {
                report.already_present.push(key);
                continue;
            }
            let result = catch_unwind(AssertUnwindSafe(|| self.document.inject(&loader)))
                .unwrap_or_else(|panic| Err(RuntimeError::Injection(panic_message(panic))));
            match result {
                Ok(()) => {
                    debug!("Injected loader {}", key);
                    injected.insert(key.clone());
                    report.injected.push(key);
                }
                Err(e) => {
                    warn!("Failed to inject loader {}: {}", key, e);
                    report.failed.push(key);
                }
            }
        }
        report
    }

    /// Runs each call against its vendor global, recording one outcome per
    /// call. A missing or failing vendor never blocks the others.
    pub fn dispatch(&self, calls: &[NativeCall]) -> DispatchReport {
        let mut report = DispatchReport::empty();
        for call in calls {
            let outcome = self.execute(call);
            report.entries.push(DispatchEntry {
                vendor: call.vendor,
                pixel_id: call.pixel_id.clone(),
                target: call.target.clone(),
                method: call.method.clone(),
                outcome,
            });
        }
        debug!(
            "Dispatched {} calls: {} sent, {} not loaded, {} failed",
            report.len(),
            report.sent(),
            report.not_loaded(),
            report.failed()
        );
        *self.last_report.lock().unwrap_or_else(PoisonError::into_inner) = Some(report.clone());
        report
    }

    fn execute(&self, call: &NativeCall) -> DispatchOutcome {
        let Some(global) = self.capabilities.lookup(&call.target) else {
            debug!("Vendor global {} not loaded, skipping {}", call.target, call);
            return DispatchOutcome::VendorNotLoaded;
        };
        let result = catch_unwind(AssertUnwindSafe(|| global.call(&call.method, &call.args)))
            .unwrap_or_else(|panic| Err(VendorCallError(panic_message(panic))));
        match result {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) => {
                warn!("Vendor call {} failed: {}", call, e);
                DispatchOutcome::VendorCallError { message: e.0 }
            }
        }
    }

    /// Keys of every loader injected so far, sorted.
    pub fn injected(&self) -> Vec<LoaderKey> {
        let mut keys: Vec<LoaderKey> = self
            .injected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    pub fn last_report(&self) -> Option<DispatchReport> {
        self.last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

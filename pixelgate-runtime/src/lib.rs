//! Dispatch runtime for pixelgate.
//!
//! Executes mapped vendor calls against whatever vendor globals are present
//! and injects loader scripts into the document, tolerating any vendor being
//! absent or broken.
//!
//! # Architecture
//!
//! ```text
//! ConsentStore ─┐
//!               ├─→ plan (filter + mapper) ─→ DispatchRuntime ─→ VendorCapabilities
//! PixelCatalog ─┘                               │
//!                                               └─→ DocumentSink (loader tags)
//! ```
//!
//! - [`plan`] is pure: catalog snapshot + consent + request in, calls or
//!   loaders out. The HTTP surface uses it directly.
//! - [`DispatchRuntime`] owns the only mutable dispatch state: the set of
//!   loaders already injected and the last report.
//! - [`PixelDispatcher`] wires the stores, planner and runtime together.
//! - [`DebugInspector`] exposes read-only state for verification.

mod capability;
mod dispatcher;
mod document;
mod error;
mod inspector;
pub mod plan;
mod report;
mod runtime;

pub use capability::{CapabilitySet, VendorCallError, VendorCapabilities, VendorGlobal};
pub use dispatcher::{PixelDispatcher, PlacementOutcome, TrackOutcome};
pub use document::{DocumentSink, LoaderKey, MemoryDocument};
pub use error::{RuntimeError, RuntimeResult};
pub use inspector::{DebugInspector, DebugSnapshot};
pub use plan::{EventPlan, PlacementPlan, SkipReason, SkippedPixel};
pub use report::{DispatchEntry, DispatchOutcome, DispatchReport, LoadReport};
pub use runtime::DispatchRuntime;

//! Vendor event mapping for pixelgate.
//!
//! Each vendor has exactly one table module under [`vendors`]. A table turns a
//! vendor-neutral event into a structured [`NativeCall`] and describes the
//! vendor's loader script. Adding a vendor means adding one table and
//! registering it in [`table_for`]; dispatch logic never changes.
//!
//! Unmapped event names fall back to the vendor's default call when it has
//! one. Vendors without a sensible default return `None`, which skips that
//! vendor for that event only.

mod loader;
mod table;
pub mod vendors;
pub mod vocabulary;

pub use loader::{loader_for, LoaderSpec};
pub use table::{table_for, EventContext, VendorTable};

use pixelgate_types::{DispatchEvent, EventData, NativeCall, PixelDefinition, PixelType};
use tracing::debug;

/// Maps an event for one vendor pixel.
pub fn map_event(
    vendor: PixelType,
    pixel_id: &str,
    event_name: &str,
    data: &EventData,
) -> Option<NativeCall> {
    table_for(vendor).map(&EventContext::new(pixel_id, event_name, data))
}

/// Maps a dispatch event for a configured pixel, carrying the event id and
/// any per-pixel settings the vendor needs.
pub fn map_for_pixel(pixel: &PixelDefinition, event: &DispatchEvent) -> Option<NativeCall> {
    let ctx = EventContext {
        pixel_id: &pixel.pixel_id,
        name: &event.name,
        data: &event.data,
        event_id: Some(event.id),
        conversion_label: pixel.conversion_label.as_deref(),
    };
    let call = table_for(pixel.pixel_type).map(&ctx);
    if call.is_none() {
        debug!(
            "No {} mapping for event '{}', skipping pixel {}",
            pixel.pixel_type, event.name, pixel.id
        );
    }
    call
}

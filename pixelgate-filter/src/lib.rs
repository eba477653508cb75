//! Pixel eligibility filtering.
//!
//! [`select_eligible`] is a pure function of the catalog snapshot, the
//! consent record and the request. It performs no I/O and holds no state, so
//! any number of dispatches may call it concurrently.

mod select;
mod validate;

pub use select::{
    find_issues, group_by_placement, select_eligible, ByPlacement, ConfigIssue, PixelQuery, Selection,
};
pub use validate::{is_valid_pixel_id, pixel_id_pattern};

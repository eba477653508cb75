//! Pixel catalog for pixelgate.
//!
//! A read-only, memoized view of the pixel definitions held by the
//! configuration collaborator.
//!
//! # Failure model
//!
//! Fetching never raises into callers. A failed or timed-out fetch keeps the
//! last successfully fetched snapshot (empty before the first success) and
//! reports the failure next to it in a [`Refresh`].

mod catalog;
mod error;
mod source;

pub use catalog::{CatalogConfig, CatalogStatus, PixelCatalog, Refresh};
pub use error::{CatalogError, CatalogResult};
pub use source::{parse_payload, ConfigSource, FileSource, HttpSource, StaticSource};

//! Core type definitions for pixelgate.
//!
//! This crate defines the vendor-neutral types shared by every stage of the
//! dispatch pipeline:
//! - Pixel definitions as read from the configuration collaborator
//! - The consent record and its derived status
//! - Vendor-neutral dispatch events
//! - Structured native calls produced by the vendor mappers
//!
//! Nothing here performs I/O. Fetching, persistence and execution live in
//! their respective crates.

mod call;
mod consent;
mod event;
mod ids;
mod pixel;

pub use call::NativeCall;
pub use consent::{
    ConsentCategory, ConsentRecord, ConsentStatus, ConsentUpdate, CONSENT_RECORD_VERSION,
};
pub use event::{DispatchEvent, EventData, EventValue};
pub use ids::{DefinitionId, EventId};
pub use pixel::{PageTargets, PixelDefinition, PixelType, Placement, ALL_PAGES};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("unknown pixel type: {0}")]
    UnknownPixelType(String),

    #[error("unknown placement: {0}")]
    UnknownPlacement(String),

    #[error("unsupported consent record version {found} (max {supported})")]
    UnsupportedConsentVersion { found: u32, supported: u32 },
}

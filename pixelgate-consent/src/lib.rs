//! User tracking consent for pixelgate.
//!
//! The [`ConsentStore`] is the single source of truth for gating. It owns
//! one [`ConsentRecord`](pixelgate_types::ConsentRecord) persisted through a
//! [`ConsentBackend`]:
//! - [`MemoryBackend`] for tests and embedding
//! - [`FileBackend`] for a JSON file on disk
//!
//! The [`cookie`] module encodes the same record as an HTTP cookie value so
//! a request handler can read and write it without server-side state.
//!
//! Reading an absent or unreadable record always yields `None`, which the
//! filter treats as status `none`.

mod backend;
pub mod cookie;
mod error;
mod store;

pub use backend::{ConsentBackend, FileBackend, MemoryBackend};
pub use error::{ConsentError, ConsentResult};
pub use store::ConsentStore;

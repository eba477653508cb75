//! Vendor capability seams.
//!
//! Vendor SDK globals are optional capabilities probed at call time. Their
//! absence is a normal condition, never an error.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A vendor SDK call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorCallError(pub String);

impl fmt::Display for VendorCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for VendorCallError {}

/// A vendor's global runtime object (`fbq`, `gtag`, `ym`, ...).
pub trait VendorGlobal: Send + Sync {
    /// Invokes `method` with structured arguments. Dotted methods address
    /// nested members, e.g. `Retargeting.Hit`.
    fn call(&self, method: &str, args: &[Value]) -> Result<(), VendorCallError>;
}

/// Looks up vendor globals by symbol.
pub trait VendorCapabilities: Send + Sync {
    fn lookup(&self, symbol: &str) -> Option<Arc<dyn VendorGlobal>>;
}

/// In-memory capability table.
#[derive(Default, Clone)]
pub struct CapabilitySet {
    globals: HashMap<String, Arc<dyn VendorGlobal>>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the global for `symbol`.
    pub fn with(mut self, symbol: impl Into<String>, global: Arc<dyn VendorGlobal>) -> Self {
        self.globals.insert(symbol.into(), global);
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, global: Arc<dyn VendorGlobal>) {
        self.globals.insert(symbol.into(), global);
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(String::as_str)
    }
}

impl VendorCapabilities for CapabilitySet {
    fn lookup(&self, symbol: &str) -> Option<Arc<dyn VendorGlobal>> {
        self.globals.get(symbol).cloned()
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<&str> = self.symbols().collect();
        symbols.sort_unstable();
        f.debug_struct("CapabilitySet").field("globals", &symbols).finish()
    }
}

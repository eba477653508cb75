//! Consent state model.
//!
//! A single versioned record holds the user's per-category decision. The
//! overall status is always derived from the category flags and never
//! trusted from storage.

use crate::{Result, TypesError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current serialized layout version of [`ConsentRecord`].
pub const CONSENT_RECORD_VERSION: u32 = 1;

/// A consent category gating which pixels may load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    /// Always granted once any record exists.
    Necessary,
    Analytics,
    Marketing,
    Preferences,
}

impl ConsentCategory {
    /// The user-controllable categories.
    pub const OPTIONAL: [ConsentCategory; 3] =
        [Self::Analytics, Self::Marketing, Self::Preferences];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Necessary => "necessary",
            Self::Analytics => "analytics",
            Self::Marketing => "marketing",
            Self::Preferences => "preferences",
        }
    }
}

impl fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall consent status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    /// No decision recorded.
    None,
    /// Every optional category declined.
    Necessary,
    /// Some optional categories granted.
    Custom,
    /// Every optional category granted.
    All,
}

impl ConsentStatus {
    /// Status of a possibly absent record.
    #[must_use]
    pub fn of(record: Option<&ConsentRecord>) -> Self {
        record.map_or(Self::None, ConsentRecord::status)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Necessary => "necessary",
            Self::Custom => "custom",
            Self::All => "all",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's consent decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    #[serde(default = "default_version")]
    version: u32,
    necessary: bool,
    #[serde(default)]
    analytics: bool,
    #[serde(default)]
    marketing: bool,
    #[serde(default)]
    preferences: bool,
    /// Derived on every write; recomputed on read.
    #[serde(default = "default_status")]
    status: ConsentStatus,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    CONSENT_RECORD_VERSION
}

fn default_status() -> ConsentStatus {
    ConsentStatus::Necessary
}

impl ConsentRecord {
    /// Creates a record. `necessary` is always granted.
    #[must_use]
    pub fn new(analytics: bool, marketing: bool, preferences: bool) -> Self {
        let mut record = Self {
            version: CONSENT_RECORD_VERSION,
            necessary: true,
            analytics,
            marketing,
            preferences,
            status: ConsentStatus::Necessary,
            updated_at: Utc::now(),
        };
        record.status = record.derive_status();
        record
    }

    /// Every optional category declined.
    #[must_use]
    pub fn necessary_only() -> Self {
        Self::new(false, false, false)
    }

    /// Every optional category granted.
    #[must_use]
    pub fn all() -> Self {
        Self::new(true, true, true)
    }

    /// Parses a persisted record, enforcing the invariants storage cannot:
    /// `necessary` is forced on and `status` is recomputed.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(json)?;
        if record.version > CONSENT_RECORD_VERSION {
            return Err(TypesError::UnsupportedConsentVersion {
                found: record.version,
                supported: CONSENT_RECORD_VERSION,
            });
        }
        Ok(record.normalized())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn analytics(&self) -> bool {
        self.analytics
    }

    #[must_use]
    pub fn marketing(&self) -> bool {
        self.marketing
    }

    #[must_use]
    pub fn preferences(&self) -> bool {
        self.preferences
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Derived overall status.
    #[must_use]
    pub fn status(&self) -> ConsentStatus {
        self.status
    }

    /// Returns true if the category is granted.
    #[must_use]
    pub fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Necessary => self.necessary,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
            ConsentCategory::Preferences => self.preferences,
        }
    }

    fn derive_status(&self) -> ConsentStatus {
        let granted = ConsentCategory::OPTIONAL
            .iter()
            .filter(|c| self.allows(**c))
            .count();
        match granted {
            0 => ConsentStatus::Necessary,
            n if n == ConsentCategory::OPTIONAL.len() => ConsentStatus::All,
            _ => ConsentStatus::Custom,
        }
    }

    fn normalized(mut self) -> Self {
        self.version = CONSENT_RECORD_VERSION;
        self.necessary = true;
        self.status = self.derive_status();
        self
    }
}

/// A partial consent change. `None` leaves a category as it was; an absent
/// current record counts as every optional category declined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<bool>,
}

impl ConsentUpdate {
    /// Sets every optional category to `granted`.
    #[must_use]
    pub fn uniform(granted: bool) -> Self {
        Self {
            analytics: Some(granted),
            marketing: Some(granted),
            preferences: Some(granted),
        }
    }

    #[must_use]
    pub fn analytics(mut self, granted: bool) -> Self {
        self.analytics = Some(granted);
        self
    }

    #[must_use]
    pub fn marketing(mut self, granted: bool) -> Self {
        self.marketing = Some(granted);
        self
    }

    #[must_use]
    pub fn preferences(mut self, granted: bool) -> Self {
        self.preferences = Some(granted);
        self
    }

    /// Merges this update over `current`, producing a fresh record.
    #[must_use]
    pub fn apply(&self, current: Option<&ConsentRecord>) -> ConsentRecord {
        let (analytics, marketing, preferences) = current
            .map(|r| (r.analytics, r.marketing, r.preferences))
            .unwrap_or_default();
        ConsentRecord::new(
            self.analytics.unwrap_or(analytics),
            self.marketing.unwrap_or(marketing),
            self.preferences.unwrap_or(preferences),
        )
    }
}

//! Pixel definitions as configured by the site operator.
//!
//! Definitions are owned by the configuration collaborator and are read-only
//! to the engine. Field names follow the collaborator's camelCase records so
//! a list query result deserializes directly.

use crate::consent::ConsentCategory;
use crate::ids::DefinitionId;
use crate::TypesError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page tag sentinel matching every page.
pub const ALL_PAGES: &str = "all";

/// Tracking vendor of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelType {
    YandexMetrica,
    Vk,
    VkAds,
    Facebook,
    Ga4,
    GoogleAds,
    Tiktok,
}

impl PixelType {
    /// Every supported vendor, in declaration order.
    pub const ALL: [PixelType; 7] = [
        Self::YandexMetrica,
        Self::Vk,
        Self::VkAds,
        Self::Facebook,
        Self::Ga4,
        Self::GoogleAds,
        Self::Tiktok,
    ];

    /// Wire name of the vendor.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YandexMetrica => "yandex_metrica",
            Self::Vk => "vk",
            Self::VkAds => "vk_ads",
            Self::Facebook => "facebook",
            Self::Ga4 => "ga4",
            Self::GoogleAds => "google_ads",
            Self::Tiktok => "tiktok",
        }
    }

    /// Optional consent category a non-GDPR-compliant pixel of this vendor
    /// requires. Measurement vendors need `analytics`; advertising and
    /// retargeting vendors need `marketing`.
    #[must_use]
    pub fn category(&self) -> ConsentCategory {
        match self {
            Self::YandexMetrica | Self::Ga4 => ConsentCategory::Analytics,
            Self::Vk | Self::VkAds | Self::Facebook | Self::GoogleAds | Self::Tiktok => {
                ConsentCategory::Marketing
            }
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PixelType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypesError::UnknownPixelType(s.to_string()))
    }
}

/// Document location a loader script is injected into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Head,
    BodyStart,
    BodyEnd,
}

impl Placement {
    pub const ALL: [Placement; 3] = [Self::Head, Self::BodyStart, Self::BodyEnd];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::BodyStart => "body_start",
            Self::BodyEnd => "body_end",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| TypesError::UnknownPlacement(s.to_string()))
    }
}

/// The set of page tags a pixel targets.
///
/// An empty set matches nothing. The [`ALL_PAGES`] sentinel matches every page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageTargets(Vec<String>);

impl PageTargets {
    #[must_use]
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(pages.into_iter().map(Into::into).collect())
    }

    /// Targets every page.
    #[must_use]
    pub fn all() -> Self {
        Self(vec![ALL_PAGES.to_string()])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn targets_all(&self) -> bool {
        self.0.iter().any(|p| p == ALL_PAGES)
    }

    /// Returns true if a request for `page` is targeted.
    #[must_use]
    pub fn matches(&self, page: &str) -> bool {
        self.0.iter().any(|p| p == ALL_PAGES || p == page)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for PageTargets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // The collaborator stores either a list of tags or the bare sentinel.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(page) => Self(vec![page]),
            Raw::Many(pages) => Self(pages),
        })
    }
}

/// A configured third-party tracking integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelDefinition {
    /// Opaque identifier from the configuration collaborator.
    pub id: DefinitionId,

    /// Optional operator-facing label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Tracking vendor.
    #[serde(rename = "type")]
    pub pixel_type: PixelType,

    /// Vendor-assigned identifier. Accepts a string or a number on input.
    #[serde(deserialize_with = "string_or_number")]
    pub pixel_id: String,

    /// Inactive pixels are never eligible.
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Where the vendor loader script goes.
    #[serde(default)]
    pub placement: Placement,

    /// Targeted page tags.
    #[serde(default)]
    pub pages: PageTargets,

    /// May load under necessary-only consent.
    #[serde(default)]
    pub gdpr_compliant: bool,

    /// Lower loads first.
    #[serde(default)]
    pub load_priority: i32,

    /// Google Ads conversion label appended to `send_to`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_label: Option<String>,
}

fn default_active() -> bool {
    true
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s.trim().to_string(),
        Raw::Number(n) => n.to_string(),
    })
}

impl PixelDefinition {
    /// Creates an active definition targeting every page in `head`.
    #[must_use]
    pub fn new(id: impl Into<DefinitionId>, pixel_type: PixelType, pixel_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            pixel_type,
            pixel_id: pixel_id.into(),
            is_active: true,
            placement: Placement::Head,
            pages: PageTargets::all(),
            gdpr_compliant: false,
            load_priority: 0,
            conversion_label: None,
        }
    }

    #[must_use]
    pub fn with_pages(mut self, pages: PageTargets) -> Self {
        self.pages = pages;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, load_priority: i32) -> Self {
        self.load_priority = load_priority;
        self
    }

    #[must_use]
    pub fn gdpr_compliant(mut self, compliant: bool) -> Self {
        self.gdpr_compliant = compliant;
        self
    }

    #[must_use]
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    #[must_use]
    pub fn with_conversion_label(mut self, label: impl Into<String>) -> Self {
        self.conversion_label = Some(label.into());
        self
    }
}

//! Eligibility selection.

use crate::validate::is_valid_pixel_id;
use pixelgate_types::{
    ConsentRecord, DefinitionId, PixelDefinition, PixelType, Placement, ALL_PAGES,
};
use serde::Serialize;
use tracing::{debug, warn};

/// What the caller is asking pixels for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelQuery {
    pub page: String,
    pub placement: Option<Placement>,
    /// Restricts an event request to these vendors.
    pub pixel_types: Option<Vec<PixelType>>,
}

impl PixelQuery {
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            placement: None,
            pixel_types: None,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_pixel_types(mut self, pixel_types: Vec<PixelType>) -> Self {
        self.pixel_types = Some(pixel_types);
        self
    }
}

impl Default for PixelQuery {
    fn default() -> Self {
        Self::page(ALL_PAGES)
    }
}

/// A configuration problem found while filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigIssue {
    /// The pixel id does not match its vendor's format; the pixel is excluded.
    InvalidPixelId {
        definition_id: DefinitionId,
        pixel_type: PixelType,
        pixel_id: String,
    },
}

/// Ordered eligible pixels plus any configuration diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub pixels: Vec<PixelDefinition>,
    pub issues: Vec<ConfigIssue>,
}

/// Selects the pixels eligible for `query` under `consent`.
///
/// Pixels are kept when active, targeted at the page, in the requested
/// placement and vendor set, well-formed, and allowed by consent. A
/// GDPR-compliant pixel needs no optional category; any other pixel needs
/// its vendor's category. Output is sorted by `load_priority`, ties keeping
/// catalog order.
pub fn select_eligible(
    catalog: &[PixelDefinition],
    consent: Option<&ConsentRecord>,
    query: &PixelQuery,
) -> Selection {
    let mut selection = Selection::default();

    for def in catalog {
        if !def.is_active || !def.pages.matches(&query.page) {
            continue;
        }
        if query.placement.is_some_and(|p| p != def.placement) {
            continue;
        }
        if let Some(types) = &query.pixel_types {
            if !types.contains(&def.pixel_type) {
                continue;
            }
        }
        if !is_valid_pixel_id(def.pixel_type, &def.pixel_id) {
            warn!(
                "Excluding pixel {} ({}): malformed pixel id {:?}",
                def.id, def.pixel_type, def.pixel_id
            );
            selection.issues.push(ConfigIssue::InvalidPixelId {
                definition_id: def.id.clone(),
                pixel_type: def.pixel_type,
                pixel_id: def.pixel_id.clone(),
            });
            continue;
        }
        if !consent_allows(def, consent) {
            debug!(
                "Pixel {} ({}) gated: requires {} consent",
                def.id,
                def.pixel_type,
                def.pixel_type.category()
            );
            continue;
        }
        selection.pixels.push(def.clone());
    }

    // `sort_by_key` is stable, so equal priorities keep catalog order.
    selection.pixels.sort_by_key(|def| def.load_priority);
    selection
}

/// Every malformed pixel id in the catalog, regardless of targeting or consent.
pub fn find_issues(catalog: &[PixelDefinition]) -> Vec<ConfigIssue> {
    catalog
        .iter()
        .filter(|def| !is_valid_pixel_id(def.pixel_type, &def.pixel_id))
        .map(|def| ConfigIssue::InvalidPixelId {
            definition_id: def.id.clone(),
            pixel_type: def.pixel_type,
            pixel_id: def.pixel_id.clone(),
        })
        .collect()
}

fn consent_allows(def: &PixelDefinition, consent: Option<&ConsentRecord>) -> bool {
    if def.gdpr_compliant {
        // Necessary is implied by any record, and an absent record still
        // admits compliant pixels.
        return true;
    }
    consent.is_some_and(|record| record.allows(def.pixel_type.category()))
}

/// Eligible pixels grouped by document placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ByPlacement {
    pub head: Vec<PixelDefinition>,
    pub body_start: Vec<PixelDefinition>,
    pub body_end: Vec<PixelDefinition>,
}

/// Groups pixels by placement, preserving their relative order.
pub fn group_by_placement(pixels: &[PixelDefinition]) -> ByPlacement {
    let mut groups = ByPlacement::default();
    for def in pixels {
        let bucket = match def.placement {
            Placement::Head => &mut groups.head,
            Placement::BodyStart => &mut groups.body_start,
            Placement::BodyEnd => &mut groups.body_end,
        };
        bucket.push(def.clone());
    }
    groups
}

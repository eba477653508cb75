//! Pure planning: catalog snapshot plus consent plus request in, calls or
//! loaders out. Nothing here touches vendor globals or the document.

use pixelgate_filter::{select_eligible, ConfigIssue, PixelQuery, Selection};
use pixelgate_mapper::{loader_for, map_for_pixel, LoaderSpec};
use pixelgate_types::{
    ConsentRecord, DefinitionId, DispatchEvent, NativeCall, PixelDefinition, PixelType, Placement,
};
use serde::Serialize;

/// Why an eligible pixel produced no call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The vendor has no mapping for the event name.
    NoMapping,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedPixel {
    pub definition_id: DefinitionId,
    pub vendor: PixelType,
    pub reason: SkipReason,
}

/// Calls to run for one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPlan {
    pub calls: Vec<NativeCall>,
    /// Definition ids of the pixels that produced a call, in call order.
    pub triggered: Vec<DefinitionId>,
    pub skipped: Vec<SkippedPixel>,
    pub issues: Vec<ConfigIssue>,
}

/// Loaders to inject for one page placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementPlan {
    pub selection: Selection,
    pub loaders: Vec<LoaderSpec>,
}

/// Plans the native calls for `event`.
///
/// Every pixel eligible for the event's page is considered regardless of
/// placement; `pixel_types` optionally narrows the vendors.
pub fn plan_event(
    catalog: &[PixelDefinition],
    consent: Option<&ConsentRecord>,
    event: &DispatchEvent,
    pixel_types: Option<Vec<PixelType>>,
) -> EventPlan {
    let mut query = PixelQuery::page(event.page.clone());
    if let Some(types) = pixel_types {
        query = query.with_pixel_types(types);
    }
    let selection = select_eligible(catalog, consent, &query);

    let mut plan = EventPlan {
        issues: selection.issues,
        ..EventPlan::default()
    };
    for pixel in &selection.pixels {
        match map_for_pixel(pixel, event) {
            Some(call) => {
                plan.calls.push(call);
                plan.triggered.push(pixel.id.clone());
            }
            None => plan.skipped.push(SkippedPixel {
                definition_id: pixel.id.clone(),
                vendor: pixel.pixel_type,
                reason: SkipReason::NoMapping,
            }),
        }
    }
    plan
}

/// Plans the loaders for `page` at `placement`.
pub fn plan_placement(
    catalog: &[PixelDefinition],
    consent: Option<&ConsentRecord>,
    page: &str,
    placement: Placement,
) -> PlacementPlan {
    let selection = select_eligible(
        catalog,
        consent,
        &PixelQuery::page(page).with_placement(placement),
    );
    let loaders = selection.pixels.iter().map(loader_for).collect();
    PlacementPlan { selection, loaders }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelgate_types::EventValue;

    fn catalog() -> Vec<PixelDefinition> {
        vec![
            PixelDefinition::new("ads", PixelType::GoogleAds, "AW-123456789").gdpr_compliant(true),
            PixelDefinition::new("ga", PixelType::Ga4, "G-ABC1234").gdpr_compliant(true),
        ]
    }

    #[test]
    fn unmapped_event_skips_only_that_vendor() {
        let event = DispatchEvent::new("page_view");
        let plan = plan_event(&catalog(), None, &event, None);

        assert_eq!(plan.calls.len(), 1);
        assert_eq!(plan.calls[0].vendor, PixelType::Ga4);
        assert_eq!(plan.triggered, vec![DefinitionId::new("ga")]);
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].vendor, PixelType::GoogleAds);
        assert_eq!(plan.skipped[0].reason, SkipReason::NoMapping);
    }

    #[test]
    fn pixel_types_narrow_the_vendors() {
        let event = DispatchEvent::new("purchase").with("value", EventValue::from(10.0));
        let plan = plan_event(&catalog(), None, &event, Some(vec![PixelType::GoogleAds]));

        assert_eq!(plan.calls.len(), 1);
        assert_eq!(plan.calls[0].vendor, PixelType::GoogleAds);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn placement_plan_has_one_loader_per_pixel() {
        let plan = plan_placement(&catalog(), None, "all", Placement::Head);
        assert_eq!(plan.loaders.len(), 2);
        assert_eq!(plan.selection.pixels.len(), 2);
        assert!(plan_placement(&catalog(), None, "all", Placement::BodyEnd)
            .loaders
            .is_empty());
    }
}

//! Presentation helpers shared by locator front ends.

use apfinder_core::{Coordinates, GeocodedEntity, Plan, RadiusSelection};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Distances above this are ranked but not printed on a card.
pub const DISPLAY_DISTANCE_LIMIT_KM: f64 = 100.0;

/// Circle drawn for an unbounded search, in meters.
pub const UNBOUNDED_CIRCLE_METERS: u32 = 100_000;

/// Geographic centre of Brazil, used when there is no reference point.
pub const BRAZIL_CENTER: Coordinates = Coordinates {
    latitude: -15.779_72,
    longitude: -47.929_72,
};

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

// Everything except the characters a URI component may carry unescaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const KNOWN_PLANS: [(&str, &str); 4] = [
    ("0a27bbe3-87ab-4e37-9713-28dbb616a293", "Pro"),
    ("7961c2e1-8b33-4134-bdc9-4b3f4412a196", "Starter"),
    ("7bba2a12-aa37-45e9-943e-60303026394d", "Business"),
    ("a610653e-f2f4-418f-b142-167629bac2a3", "Master"),
];

const DEFAULT_PLAN_BADGE: &str = "Business";

/// Whether a card should print the entry's distance.
#[must_use]
pub fn should_display_distance(entry: &GeocodedEntity) -> bool {
    entry
        .distance_km
        .is_some_and(|km| km <= DISPLAY_DISTANCE_LIMIT_KM)
}

/// Map zoom level that frames the search circle.
#[must_use]
pub fn map_zoom_for_radius(radius: RadiusSelection) -> u8 {
    match radius {
        RadiusSelection::Unbounded => 8,
        RadiusSelection::Km(km) => match km {
            0..=10 => 12,
            11..=25 => 11,
            26..=50 => 10,
            51..=100 => 9,
            _ => 8,
        },
    }
}

/// Radius of the search circle drawn on the map.
#[must_use]
pub fn map_circle_radius_meters(radius: RadiusSelection) -> u32 {
    match radius {
        RadiusSelection::Km(km) => km.saturating_mul(1000),
        RadiusSelection::Unbounded => UNBOUNDED_CIRCLE_METERS,
    }
}

/// Centre the map on the reference point, else on the first located entry,
/// else on Brazil.
#[must_use]
pub fn map_center(reference: Option<Coordinates>, entries: &[GeocodedEntity]) -> Coordinates {
    reference
        .or_else(|| entries.iter().find_map(GeocodedEntity::coordinates))
        .unwrap_or(BRAZIL_CENTER)
}

/// Badge text for a distributor's plan.
///
/// The joined plan name wins; a plan without a name falls back to the fixed
/// label for its id. No plan at all, or an unknown unnamed one, shows
/// `"Business"`.
#[must_use]
pub fn plan_badge(plan: Option<&Plan>) -> &str {
    let Some(plan) = plan else {
        return DEFAULT_PLAN_BADGE;
    };
    let name = plan.name.trim();
    if !name.is_empty() {
        return name;
    }
    let id = plan.id.to_string();
    KNOWN_PLANS
        .iter()
        .find(|(known, _)| *known == id)
        .map_or(DEFAULT_PLAN_BADGE, |(_, label)| *label)
}

/// Google Maps search link for an address, `None` when the address is blank.
#[must_use]
pub fn maps_search_url(address: &str) -> Option<String> {
    let address = address.trim();
    if address.is_empty() {
        return None;
    }
    Some(format!(
        "{MAPS_SEARCH_BASE}{}",
        utf8_percent_encode(address, URI_COMPONENT)
    ))
}

/// Up to two uppercase initials for a logo placeholder; `"XX"` for a blank
/// name.
#[must_use]
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() {
        "XX".to_string()
    } else {
        initials
    }
}

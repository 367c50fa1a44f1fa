//! Great-circle distance and human-readable distance formatting.

use apfinder_core::UNKNOWN_DISTANCE;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points.
///
/// Returns `None` if any coordinate is missing. `0.0` is a real coordinate
/// (equator / prime meridian), not a missing one.
#[must_use]
pub fn haversine_distance_km(
    lat1: Option<f64>,
    lng1: Option<f64>,
    lat2: Option<f64>,
    lng2: Option<f64>,
) -> Option<f64> {
    let (lat1, lng1, lat2, lng2) = (lat1?, lng1?, lat2?, lng2?);

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(EARTH_RADIUS_KM * c)
}

/// Format a distance for display: meters below one kilometer, whole
/// kilometers otherwise, and [`UNKNOWN_DISTANCE`] for `None`.
///
/// ```
/// use apfinder_geocode::distance::format_distance;
///
/// assert_eq!(format_distance(Some(0.5)), "500m");
/// assert_eq!(format_distance(Some(99.6)), "100km");
/// ```
#[must_use]
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        None => UNKNOWN_DISTANCE.to_string(),
        Some(km) if km < 1.0 => format!("{:.0}m", (km * 1000.0).round()),
        Some(km) => format!("{:.0}km", km.round()),
    }
}

//! Geocoding adapter and distance utilities for the locator.

mod client;
pub mod distance;
mod error;
mod types;

use std::future::Future;

pub use client::GoogleGeocoder;
pub use distance::{format_distance, haversine_distance_km, EARTH_RADIUS_KM};
pub use error::GeocodeError;
pub use types::GeocodeResult;

/// Address-to-coordinates capability consumed by the ranking engine.
///
/// Implementations are stateless per call and may be invoked concurrently.
pub trait Geocoder {
    /// Whether the capability is initialized and able to serve requests.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotConfigured`] (or another setup error) when
    /// calls cannot succeed at all.
    fn ensure_ready(&self) -> Result<(), GeocodeError> {
        Ok(())
    }

    /// Resolve a free-text address. Failures are logged and reported as `None`.
    fn geocode_address(&self, address: &str) -> impl Future<Output = Option<GeocodeResult>> + Send;
}

//! Geocoding result type and the Google Geocoding API response shape.

use serde::{Deserialize, Serialize};

/// A resolved address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub lat: f64,
    pub lng: f64,
    /// Municipality (`administrative_area_level_2`, long name).
    pub city: Option<String>,
    /// State abbreviation (`administrative_area_level_1`, short name).
    pub state: Option<String>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeHit>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeHit {
    pub geometry: Geometry,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeHit {
    fn component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }

    pub(crate) fn into_result(self) -> GeocodeResult {
        let city = self
            .component("administrative_area_level_2")
            .map(|c| c.long_name.clone());
        let state = self
            .component("administrative_area_level_1")
            .map(|c| c.short_name.clone());
        GeocodeResult {
            lat: self.geometry.location.lat,
            lng: self.geometry.location.lng,
            city,
            state,
            formatted_address: self.formatted_address,
        }
    }
}

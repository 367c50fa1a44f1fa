use thiserror::Error;

/// Reasons a geocoding call can fail.
///
/// Callers of [`crate::Geocoder::geocode_address`] never see these directly;
/// they are logged and collapsed to `None`. [`GeocodeError::NotConfigured`] is
/// also returned by [`crate::Geocoder::ensure_ready`].
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// No API key was configured, so the geocoding service cannot be called.
    #[error("geocoding is not configured: GOOGLE_MAPS_API_KEY is not set")]
    NotConfigured,

    #[error("address is empty")]
    EmptyAddress,

    /// Network or TLS failure, or a non-2xx HTTP status. The request URL is
    /// stripped because it carries the API key.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The provider answered `ZERO_RESULTS`, or `OK` with an empty list.
    #[error("no match for address")]
    NoResults,

    /// Any other provider status (`OVER_QUERY_LIMIT`, `REQUEST_DENIED`, ...).
    #[error("geocoding status {status}: {message}")]
    Status { status: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err.without_url())
    }
}

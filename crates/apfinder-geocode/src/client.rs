//! HTTP client for the Google Geocoding web service.
//!
//! Wraps `reqwest` with API key management, region biasing and typed
//! response handling. [`GoogleGeocoder::try_geocode`] surfaces every failure as
//! a [`GeocodeError`]; the [`Geocoder`] implementation logs those and returns
//! `None` so one bad address never fails a batch.

use std::time::Duration;

use apfinder_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{GeocodeResponse, GeocodeResult};
use crate::Geocoder;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const GEOCODE_PATH: &str = "maps/api/geocode/json";

/// Client for the Google Geocoding API.
///
/// Use [`GoogleGeocoder::new`] for production or
/// [`GoogleGeocoder::with_base_url`] to point at a mock server in tests.
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
    region: String,
    endpoint: Url,
}

impl GoogleGeocoder {
    /// Creates a geocoder pointed at the production Google endpoint.
    ///
    /// A `None` or blank `api_key` still yields a client; it reports
    /// [`GeocodeError::NotConfigured`] from [`Geocoder::ensure_ready`].
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        region: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, region, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::new(
            config.google_maps_api_key.as_deref(),
            &config.geocode_region,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a geocoder with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        region: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(GEOCODE_PATH))
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            region: region.to_owned(),
            endpoint,
        })
    }

    /// Geocodes one address and reports the failure reason, if any.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotConfigured`] without an API key.
    /// - [`GeocodeError::EmptyAddress`] for a blank address (no request is sent).
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the body is not the expected JSON.
    /// - [`GeocodeError::NoResults`] / [`GeocodeError::Status`] for provider
    ///   statuses other than `OK`.
    pub async fn try_geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let api_key = self.api_key.as_deref().ok_or(GeocodeError::NotConfigured)?;
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let url = self.build_url(address, api_key);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("geocode(address={address})"),
                source: e,
            })?;

        match parsed.status.as_str() {
            "OK" => parsed
                .results
                .into_iter()
                .next()
                .map(crate::types::GeocodeHit::into_result)
                .ok_or(GeocodeError::NoResults),
            "ZERO_RESULTS" => Err(GeocodeError::NoResults),
            _ => Err(GeocodeError::Status {
                message: parsed
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string()),
                status: parsed.status,
            }),
        }
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, address: &str, api_key: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("address", address);
            if !self.region.is_empty() {
                pairs.append_pair("region", &self.region);
            }
            pairs.append_pair("key", api_key);
        }
        url
    }
}

impl Geocoder for GoogleGeocoder {
    fn ensure_ready(&self) -> Result<(), GeocodeError> {
        if self.api_key.is_some() {
            Ok(())
        } else {
            Err(GeocodeError::NotConfigured)
        }
    }

    async fn geocode_address(&self, address: &str) -> Option<GeocodeResult> {
        match self.try_geocode(address).await {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::warn!(address, error = %error, "geocoding failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

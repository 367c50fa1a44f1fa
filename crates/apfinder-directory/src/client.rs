//! HTTP client for the hosted data API's PostgREST interface.

use std::time::Duration;

use apfinder_core::{AppConfig, EntityKind, LocationEntity};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};

use crate::error::DirectoryError;
use crate::normalize::{normalize_rows, RawDirectoryRow};
use crate::DirectorySource;

const REST_PREFIX: &str = "rest/v1/";

/// Read-only client for directory collections.
///
/// Holds the anon key and schema; constructed once by the application entry
/// point and shared by reference.
pub struct DirectoryClient {
    client: Client,
    base_url: Url,
    anon_key: String,
    schema: String,
}

impl DirectoryClient {
    /// Creates a client for the data API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`DirectoryError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        schema: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DirectoryError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            anon_key: anon_key.to_owned(),
            schema: schema.to_owned(),
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`DirectoryClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, DirectoryError> {
        Self::new(
            &config.supabase_url,
            &config.supabase_anon_key,
            &config.db_schema,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Reads one collection with the given column selection, ordered by name.
    ///
    /// # Errors
    ///
    /// - [`DirectoryError::Http`] on network failure.
    /// - [`DirectoryError::Api`] on a non-2xx response.
    /// - [`DirectoryError::Deserialize`] if the body is not an array of rows.
    pub async fn read_collection(
        &self,
        collection: &str,
        select: &str,
    ) -> Result<Vec<LocationEntity>, DirectoryError> {
        let url = self.build_url(collection, select)?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(ACCEPT, "application/json")
            .header("Accept-Profile", &self.schema)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Api {
                collection: collection.to_string(),
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let rows: Vec<RawDirectoryRow> =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Deserialize {
                context: format!("select from {collection}"),
                source: e,
            })?;

        Ok(normalize_rows(rows, collection))
    }

    /// `{base}/rest/v1/{collection}?select=..&order=name.asc`
    fn build_url(&self, collection: &str, select: &str) -> Result<Url, DirectoryError> {
        let mut url = self
            .base_url
            .join(REST_PREFIX)
            .and_then(|u| u.join(collection))
            .map_err(|e| DirectoryError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("select", select)
            .append_pair("order", "name.asc");
        Ok(url)
    }
}

impl DirectorySource for DirectoryClient {
    async fn fetch_directory(
        &self,
        kind: EntityKind,
    ) -> Result<Vec<LocationEntity>, DirectoryError> {
        let collection = kind.collection();
        tracing::info!(collection, "fetching directory");

        let entities = match self.read_collection(collection, kind.select_columns()).await {
            Ok(entities) => entities,
            Err(primary) => {
                let Some(fallback) = kind.fallback_collection() else {
                    tracing::error!(collection, error = %primary, "directory read failed");
                    return Err(primary);
                };
                tracing::warn!(
                    collection,
                    fallback,
                    error = %primary,
                    "directory read failed, trying fallback collection"
                );
                match self.read_collection(fallback, kind.select_columns()).await {
                    Ok(entities) => entities,
                    Err(secondary) => {
                        tracing::error!(
                            collection,
                            fallback,
                            error = %secondary,
                            "fallback directory read failed"
                        );
                        return Err(primary);
                    }
                }
            }
        };

        if entities.is_empty() {
            tracing::warn!(collection, "directory is empty");
        } else {
            tracing::info!(collection, count = entities.len(), "directory loaded");
        }
        Ok(entities)
    }
}

/// Pull `message` out of a PostgREST error body, falling back to the raw text.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.chars().take(200).collect()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> DirectoryClient {
        DirectoryClient::new(base_url, "anon", "public", 30, "apfinder-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_targets_rest_collection() {
        let client = test_client("https://project.supabase.co");
        let url = client
            .build_url("parceiros", EntityKind::Partners.select_columns())
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/parceiros");
        assert!(url.as_str().contains("order=name.asc"), "{url}");
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://project.supabase.co/");
        let url = client.build_url("distribuidores", "id,name").unwrap();
        assert_eq!(url.path(), "/rest/v1/distribuidores");
    }

    #[test]
    fn build_url_encodes_select_clause() {
        let client = test_client("https://project.supabase.co");
        let url = client
            .build_url("distribuidores", EntityKind::Distributors.select_columns())
            .unwrap();
        let select = url
            .query_pairs()
            .find(|(k, _)| k == "select")
            .map(|(_, v)| v.into_owned());
        assert_eq!(
            select.as_deref(),
            Some(EntityKind::Distributors.select_columns())
        );
    }

    #[test]
    fn api_error_message_prefers_postgrest_message() {
        let body = r#"{"code":"42P01","details":null,"hint":null,"message":"relation \"public.parceiros\" does not exist"}"#;
        assert_eq!(
            api_error_message(body),
            "relation \"public.parceiros\" does not exist"
        );
    }

    #[test]
    fn api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(api_error_message(""), "empty response body");
    }
}

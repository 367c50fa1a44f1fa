use thiserror::Error;

/// Errors returned while reading the directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The data API answered with a non-2xx status.
    #[error("data API error reading {collection} (HTTP {status}): {message}")]
    Api {
        collection: String,
        status: u16,
        message: String,
    },

    /// The response body could not be deserialized into directory rows.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

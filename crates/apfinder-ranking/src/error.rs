use std::error::Error as _;

use apfinder_directory::DirectoryError;
use apfinder_geocode::GeocodeError;
use thiserror::Error;

/// Fatal ranking failures. Per-entity geocoding failures never appear here.
#[derive(Debug, Error)]
pub enum RankingError {
    /// The geocoding capability is not initialized; nothing was fetched.
    #[error("geocoding unavailable")]
    Configuration(#[source] GeocodeError),

    /// The directory could not be read; carries the underlying error unchanged.
    #[error("directory fetch failed")]
    DirectoryFetch(#[source] DirectoryError),
}

impl RankingError {
    /// One-line message including the underlying cause, for logs and
    /// fallback notices.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.source() {
            Some(source) => format!("{self}: {source}"),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_leaves_cause_to_source_chain() {
        let err = RankingError::Configuration(GeocodeError::NotConfigured);
        assert_eq!(err.to_string(), "geocoding unavailable");
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("not configured"), "{source}");
    }

    #[test]
    fn describe_includes_cause_once() {
        let err = RankingError::DirectoryFetch(DirectoryError::Api {
            collection: "parceiros".to_string(),
            status: 404,
            message: "relation does not exist".to_string(),
        });
        let message = err.describe();
        assert!(message.starts_with("directory fetch failed: "), "{message}");
        assert_eq!(message.matches("relation does not exist").count(), 1);
    }
}

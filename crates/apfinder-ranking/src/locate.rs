//! Ranked listing with an unranked fallback.
//!
//! A locator page must always show something: when there is no reference
//! point, or ranking fails fatally, the plain directory is listed instead.

use apfinder_core::{Coordinates, EntityKind, GeocodedEntity, LocationEntity, RadiusSelection};
use apfinder_directory::DirectorySource;
use apfinder_geocode::Geocoder;
use serde::Serialize;

use crate::engine::RankingEngine;
use crate::error::RankingError;

/// Why a listing is not ranked by distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrankedReason {
    NoReferencePoint,
    RankingFailed(String),
}

/// What the locator shows.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Listing {
    Ranked {
        entities: Vec<GeocodedEntity>,
    },
    Unranked {
        entities: Vec<LocationEntity>,
        reason: UnrankedReason,
    },
}

impl Listing {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Listing::Ranked { entities } => entities.len(),
            Listing::Unranked { entities, .. } => entities.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_ranked(&self) -> bool {
        matches!(self, Listing::Ranked { .. })
    }
}

impl<D, G> RankingEngine<D, G>
where
    D: DirectorySource + Sync,
    G: Geocoder + Sync,
{
    /// Rank when possible, otherwise list the whole directory unranked.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::DirectoryFetch`] only when the unranked
    /// directory read itself fails.
    pub async fn locate(
        &self,
        kind: EntityKind,
        reference: Option<Coordinates>,
        radius: RadiusSelection,
    ) -> Result<Listing, RankingError> {
        let Some(reference) = reference else {
            tracing::info!(kind = %kind, "no reference point, listing directory unranked");
            return self.unranked(kind, UnrankedReason::NoReferencePoint).await;
        };

        match self.rank_by_distance(kind, reference, radius).await {
            Ok(entities) => Ok(Listing::Ranked { entities }),
            Err(err) => {
                let message = err.describe();
                tracing::error!(
                    kind = %kind,
                    error = %message,
                    "ranking failed, falling back to unranked directory"
                );
                self.unranked(kind, UnrankedReason::RankingFailed(message)).await
            }
        }
    }

    async fn unranked(
        &self,
        kind: EntityKind,
        reason: UnrankedReason,
    ) -> Result<Listing, RankingError> {
        let entities = self
            .directory
            .fetch_directory(kind)
            .await
            .map_err(RankingError::DirectoryFetch)?;
        Ok(Listing::Unranked { entities, reason })
    }
}

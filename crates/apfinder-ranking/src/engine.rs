//! Geocode-and-rank orchestration.

use apfinder_core::{
    AppConfig, Coordinates, EntityKind, GeocodedEntity, LocationEntity, RadiusSelection,
};
use apfinder_directory::DirectorySource;
use apfinder_geocode::{format_distance, haversine_distance_km, Geocoder};
use futures::stream::{self, StreamExt};

use crate::address::build_full_address;
use crate::error::RankingError;

/// Tunables for a [`RankingEngine`].
#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// Appended to every address before geocoding (e.g. `"Brasil"`).
    pub country_suffix: String,
    /// Cap on in-flight geocoding calls. `0` geocodes every entry at once.
    pub max_concurrent_geocodes: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            country_suffix: "Brasil".to_string(),
            max_concurrent_geocodes: 0,
        }
    }
}

impl RankingOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            country_suffix: config.country_suffix.clone(),
            max_concurrent_geocodes: config.geocode_max_concurrent,
        }
    }
}

/// Ranks directory entries by distance from a reference point.
///
/// Owns its directory source and geocoder; both are built by the caller so
/// tests can substitute in-memory doubles.
pub struct RankingEngine<D, G> {
    pub(crate) directory: D,
    geocoder: G,
    options: RankingOptions,
}

impl<D, G> RankingEngine<D, G>
where
    D: DirectorySource + Sync,
    G: Geocoder + Sync,
{
    pub fn new(directory: D, geocoder: G, options: RankingOptions) -> Self {
        Self {
            directory,
            geocoder,
            options,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Entries within `radius` of `reference`, nearest first.
    ///
    /// Entries that cannot be geocoded (including entries with no address at
    /// all) are left out even when `radius` is unbounded.
    ///
    /// # Errors
    ///
    /// - [`RankingError::Configuration`] if the geocoder is not ready; the
    ///   directory is not read in that case.
    /// - [`RankingError::DirectoryFetch`] if the directory read fails.
    pub async fn rank_by_distance(
        &self,
        kind: EntityKind,
        reference: Coordinates,
        radius: RadiusSelection,
    ) -> Result<Vec<GeocodedEntity>, RankingError> {
        self.rank_within_km(kind, reference, radius.ceiling_km()).await
    }

    /// Same as [`RankingEngine::rank_by_distance`] with a raw kilometer
    /// ceiling. `f64::INFINITY` disables the upper bound.
    ///
    /// # Errors
    ///
    /// See [`RankingEngine::rank_by_distance`].
    pub async fn rank_within_km(
        &self,
        kind: EntityKind,
        reference: Coordinates,
        radius_km: f64,
    ) -> Result<Vec<GeocodedEntity>, RankingError> {
        tracing::info!(
            kind = %kind,
            latitude = reference.latitude,
            longitude = reference.longitude,
            radius_km,
            "ranking by distance"
        );

        let geocoded = self.geocode_directory(kind, reference).await?;
        let total = geocoded.len();

        let mut ranked: Vec<GeocodedEntity> = geocoded
            .into_iter()
            .filter(|entry| within_radius(entry, radius_km))
            .collect();
        ranked.sort_by(|a, b| distance_key(a).total_cmp(&distance_key(b)));

        tracing::info!(
            kind = %kind,
            total,
            within_radius = ranked.len(),
            radius_km,
            "ranking complete"
        );
        Ok(ranked)
    }

    /// Every directory entry annotated with coordinates and distance, in
    /// directory order and without radius filtering. Unresolved entries keep
    /// null coordinates.
    ///
    /// # Errors
    ///
    /// See [`RankingEngine::rank_by_distance`].
    pub async fn geocode_directory(
        &self,
        kind: EntityKind,
        reference: Coordinates,
    ) -> Result<Vec<GeocodedEntity>, RankingError> {
        self.geocoder
            .ensure_ready()
            .map_err(RankingError::Configuration)?;

        let entities = self
            .directory
            .fetch_directory(kind)
            .await
            .map_err(RankingError::DirectoryFetch)?;

        let limit = match self.options.max_concurrent_geocodes {
            0 => entities.len().max(1),
            n => n,
        };

        let geocoded = stream::iter(entities)
            .map(|entity| self.geocode_entity(kind, entity, reference))
            .buffered(limit)
            .collect::<Vec<_>>()
            .await;

        Ok(geocoded)
    }

    async fn geocode_entity(
        &self,
        kind: EntityKind,
        entity: LocationEntity,
        reference: Coordinates,
    ) -> GeocodedEntity {
        let full_address = build_full_address(&entity, &self.options.country_suffix);

        if !entity.has_address_component() {
            tracing::warn!(
                kind = kind.label(),
                id = %entity.id,
                name = %entity.name,
                "no address to geocode"
            );
            return GeocodedEntity::unresolved(entity, full_address);
        }

        let Some(location) = self.geocoder.geocode_address(&full_address).await else {
            tracing::warn!(
                kind = kind.label(),
                id = %entity.id,
                name = %entity.name,
                address = %full_address,
                "could not geocode address"
            );
            return GeocodedEntity::unresolved(entity, full_address);
        };

        let distance_km = haversine_distance_km(
            Some(reference.latitude),
            Some(reference.longitude),
            Some(location.lat),
            Some(location.lng),
        );
        let distance = format_distance(distance_km);
        tracing::debug!(
            kind = kind.label(),
            name = %entity.name,
            distance = %distance,
            "geocoded"
        );

        GeocodedEntity {
            entity,
            lat: Some(location.lat),
            lng: Some(location.lng),
            distance_km,
            distance,
            full_address,
        }
    }
}

fn within_radius(entry: &GeocodedEntity, radius_km: f64) -> bool {
    match entry.distance_km {
        None => false,
        Some(d) if d <= radius_km => true,
        Some(_) => {
            tracing::debug!(
                name = %entry.entity.name,
                distance = %entry.distance,
                "outside radius"
            );
            false
        }
    }
}

fn distance_key(entry: &GeocodedEntity) -> f64 {
    entry.distance_km.unwrap_or(f64::INFINITY)
}

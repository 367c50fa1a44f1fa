//! Command handlers for the CLI.
//!
//! Called from `main` once config is loaded and the ranking engine is built.
//! Every handler prints either a plain table or pretty JSON to stdout; logs
//! go to stderr.

use anyhow::Context;
use apfinder_core::{Coordinates, EntityKind, GeocodedEntity, LocationEntity, RadiusSelection};
use apfinder_directory::DirectorySource;
use apfinder_ranking::{view, Listing, UnrankedReason};

use crate::{Engine, ReferenceArgs, TargetArgs};

const NAME_WIDTH: usize = 40;
const MISSING: &str = "\u{2014}";

/// Resolve `--lat/--lng` or `--address` into a reference point.
///
/// # Errors
///
/// Returns an error if the coordinates are out of range or the address
/// cannot be geocoded.
pub(crate) async fn resolve_reference(
    engine: &Engine,
    reference: &ReferenceArgs,
) -> anyhow::Result<Option<Coordinates>> {
    if let (Some(lat), Some(lng)) = (reference.lat, reference.lng) {
        let point = Coordinates::validated(lat, lng).ok_or_else(|| {
            anyhow::anyhow!("coordinates ({lat}, {lng}) are outside the valid range")
        })?;
        return Ok(Some(point));
    }

    let Some(address) = reference.address.as_deref() else {
        return Ok(None);
    };
    let resolved = engine
        .geocoder()
        .try_geocode(address)
        .await
        .with_context(|| format!("could not geocode reference address '{address}'"))?;
    tracing::info!(
        address,
        lat = resolved.lat,
        lng = resolved.lng,
        "reference address resolved"
    );
    Ok(Some(Coordinates::new(resolved.lat, resolved.lng)))
}

/// Rank the directory around a required reference point.
///
/// # Errors
///
/// Returns an error if no reference point was given, the geocoder is not
/// configured, or the directory cannot be read.
pub(crate) async fn run_rank(
    engine: &Engine,
    target: &TargetArgs,
    reference: &ReferenceArgs,
    radius: RadiusSelection,
) -> anyhow::Result<()> {
    let point = resolve_reference(engine, reference)
        .await?
        .ok_or_else(|| anyhow::anyhow!("rank needs --lat and --lng, or --address"))?;

    let ranked = engine.rank_by_distance(target.kind, point, radius).await?;

    if target.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    print_ranked(target.kind, &ranked, Some(point), radius);
    Ok(())
}

/// List the directory without ranking.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub(crate) async fn run_list(engine: &Engine, target: &TargetArgs) -> anyhow::Result<()> {
    let entities = engine.directory().fetch_directory(target.kind).await?;

    if target.json {
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }
    print_directory(target.kind, &entities);
    Ok(())
}

/// Rank when a reference point is available, otherwise list unranked.
///
/// # Errors
///
/// Returns an error if the reference cannot be resolved or the directory is
/// unreachable even for the unranked listing.
pub(crate) async fn run_locate(
    engine: &Engine,
    target: &TargetArgs,
    reference: &ReferenceArgs,
    radius: RadiusSelection,
) -> anyhow::Result<()> {
    let point = resolve_reference(engine, reference).await?;
    let listing = engine.locate(target.kind, point, radius).await?;

    if target.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }
    match &listing {
        Listing::Ranked { entities } => print_ranked(target.kind, entities, point, radius),
        Listing::Unranked { entities, reason } => {
            match reason {
                UnrankedReason::NoReferencePoint => {
                    eprintln!("no reference point given; listing all entries by name");
                }
                UnrankedReason::RankingFailed(message) => {
                    eprintln!("warning: ranking failed ({message}); listing all entries by name");
                }
            }
            print_directory(target.kind, entities);
        }
    }
    Ok(())
}

/// Geocode one address and print what the geocoder knows about it.
///
/// # Errors
///
/// Returns an error if the geocoder is not configured or the address does
/// not resolve.
pub(crate) async fn run_geocode(engine: &Engine, address: &str) -> anyhow::Result<()> {
    let result = engine
        .geocoder()
        .try_geocode(address)
        .await
        .with_context(|| format!("could not geocode '{address}'"))?;

    println!("Latitude:  {}", result.lat);
    println!("Longitude: {}", result.lng);
    println!("City:      {}", result.city.as_deref().unwrap_or(MISSING));
    println!("State:     {}", result.state.as_deref().unwrap_or(MISSING));
    println!(
        "Address:   {}",
        result.formatted_address.as_deref().unwrap_or(MISSING)
    );
    if let Some(url) = view::maps_search_url(address) {
        println!("Map:       {url}");
    }
    Ok(())
}

fn print_ranked(
    kind: EntityKind,
    ranked: &[GeocodedEntity],
    reference: Option<Coordinates>,
    radius: RadiusSelection,
) {
    let center = view::map_center(reference, ranked);
    if ranked.is_empty() {
        println!("no {}s within {radius}", kind.label());
    } else {
        println!(
            "{:<4}{:<w$}{:<12}{:<24}{:<6}PLAN",
            "#",
            "NAME",
            "DISTANCE",
            "CITY",
            "STATE",
            w = NAME_WIDTH + 2
        );
        for (rank, entry) in ranked.iter().enumerate() {
            let distance = if view::should_display_distance(entry) {
                entry.distance.as_str()
            } else {
                MISSING
            };
            println!(
                "{:<4}{:<w$}{:<12}{:<24}{:<6}{}",
                rank + 1,
                truncate(&entry.entity.name),
                distance,
                entry.entity.city.as_deref().unwrap_or(MISSING),
                entry.entity.state.as_deref().unwrap_or(MISSING),
                plan_column(kind, &entry.entity),
                w = NAME_WIDTH + 2
            );
        }
    }
    println!();
    println!(
        "map: center ({:.5}, {:.5}), zoom {}, circle {} m",
        center.latitude,
        center.longitude,
        view::map_zoom_for_radius(radius),
        view::map_circle_radius_meters(radius)
    );
}

fn print_directory(kind: EntityKind, entities: &[LocationEntity]) {
    if entities.is_empty() {
        println!("no {}s found", kind.label());
        return;
    }
    println!(
        "{:<4}{:<w$}{:<24}{:<6}{:<10}PHONE",
        "",
        "NAME",
        "CITY",
        "STATE",
        "PLAN",
        w = NAME_WIDTH + 2
    );
    for entity in entities {
        println!(
            "{:<4}{:<w$}{:<24}{:<6}{:<10}{}",
            view::initials(&entity.name),
            truncate(&entity.name),
            entity.city.as_deref().unwrap_or(MISSING),
            entity.state.as_deref().unwrap_or(MISSING),
            plan_column(kind, entity),
            entity.phone.as_deref().unwrap_or(MISSING),
            w = NAME_WIDTH + 2
        );
    }
}

/// Partners carry no plan.
fn plan_column(kind: EntityKind, entity: &LocationEntity) -> &str {
    match kind {
        EntityKind::Distributors => view::plan_badge(entity.plan.as_ref()),
        EntityKind::Partners => MISSING,
    }
}

fn truncate(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        format!("{}...", name.chars().take(NAME_WIDTH - 3).collect::<String>())
    } else {
        name.to_string()
    }
}

use apfinder_core::LocationEntity;

/// Join street address, city, state and the country suffix with `", "`,
/// skipping absent or blank parts.
#[must_use]
pub fn build_full_address(entity: &LocationEntity, country_suffix: &str) -> String {
    [
        entity.address.as_deref(),
        entity.city.as_deref(),
        entity.state.as_deref(),
        Some(country_suffix),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use apfinder_core::EntityId;

    use super::*;

    fn entity(address: Option<&str>, city: Option<&str>, state: Option<&str>) -> LocationEntity {
        LocationEntity {
            id: EntityId("1".to_string()),
            name: "Loja".to_string(),
            email: None,
            phone: None,
            instagram: None,
            logo_url: None,
            address: address.map(str::to_string),
            city: city.map(str::to_string),
            state: state.map(str::to_string),
            plan: None,
        }
    }

    #[test]
    fn joins_all_parts() {
        let e = entity(Some("Rua Augusta, 500"), Some("São Paulo"), Some("SP"));
        assert_eq!(
            build_full_address(&e, "Brasil"),
            "Rua Augusta, 500, São Paulo, SP, Brasil"
        );
    }

    #[test]
    fn skips_missing_parts() {
        let e = entity(None, Some("Campinas"), None);
        assert_eq!(build_full_address(&e, "Brasil"), "Campinas, Brasil");
    }

    #[test]
    fn no_components_leaves_only_suffix() {
        let e = entity(None, None, None);
        assert_eq!(build_full_address(&e, "Brasil"), "Brasil");
        assert_eq!(build_full_address(&e, ""), "");
    }
}

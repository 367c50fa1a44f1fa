//! Directory entities (distributors and partners) and their derived,
//! distance-annotated form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Formatted distance shown when an entity could not be located.
pub const UNKNOWN_DISTANCE: &str = "Distância desconhecida";

/// Which directory collection to read.
///
/// Distributors and partners are structurally identical rows living in two
/// collections of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Distributors,
    Partners,
}

impl EntityKind {
    /// Collection (table) name in the backing store.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Distributors => "distribuidores",
            EntityKind::Partners => "parceiros",
        }
    }

    /// Singular label for log lines and CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Distributors => "distributor",
            EntityKind::Partners => "partner",
        }
    }

    /// Column selection for the directory read, including the plan join where
    /// the collection has one.
    #[must_use]
    pub fn select_columns(self) -> &'static str {
        match self {
            EntityKind::Distributors => {
                "id,name,email,phone,address,instagram,logo_url,plan_id,cidade,estado,plans(id,name)"
            }
            EntityKind::Partners => "id,name,email,phone,address,instagram,logo_url,cidade,estado",
        }
    }

    /// Collection to read instead when the primary one cannot be read.
    ///
    /// The partner listing has historically been served from the distributor
    /// table whenever `parceiros` is unavailable.
    #[must_use]
    pub fn fallback_collection(self) -> Option<&'static str> {
        match self {
            EntityKind::Distributors => None,
            EntityKind::Partners => Some(EntityKind::Distributors.collection()),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Distributors => f.write_str("distributors"),
            EntityKind::Partners => f.write_str("partners"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "distributors" | "distributor" | "distribuidores" => Ok(EntityKind::Distributors),
            "partners" | "partner" | "parceiros" => Ok(EntityKind::Partners),
            other => Err(format!(
                "unknown entity kind '{other}' (expected distributors or partners)"
            )),
        }
    }
}

/// Opaque, stable identifier assigned by the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Subscription tier joined onto distributor rows. Only used for badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub name: String,
}

/// A distributor or partner as read from the directory, after normalization.
///
/// Every optional text field is `None` rather than blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntity {
    pub id: EntityId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub logo_url: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub plan: Option<Plan>,
}

impl LocationEntity {
    /// Whether any of street address, city or state is present.
    #[must_use]
    pub fn has_address_component(&self) -> bool {
        self.address.is_some() || self.city.is_some() || self.state.is_some()
    }
}

/// Reference or resolved point on the globe, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build coordinates only if both values are finite and inside the
    /// latitude/longitude ranges.
    #[must_use]
    pub fn validated(latitude: f64, longitude: f64) -> Option<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lng_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        (lat_ok && lng_ok).then_some(Self::new(latitude, longitude))
    }
}

/// A directory entity annotated with geocoding and distance results.
///
/// Built fresh for every ranking request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedEntity {
    #[serde(flatten)]
    pub entity: LocationEntity,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Great-circle distance from the reference point.
    pub distance_km: Option<f64>,
    /// Human-readable distance, e.g. `"3km"`, `"850m"` or [`UNKNOWN_DISTANCE`].
    pub distance: String,
    /// Address string that was sent to the geocoder.
    pub full_address: String,
}

impl GeocodedEntity {
    /// An entity that could not be located.
    #[must_use]
    pub fn unresolved(entity: LocationEntity, full_address: String) -> Self {
        Self {
            entity,
            lat: None,
            lng: None,
            distance_km: None,
            distance: UNKNOWN_DISTANCE.to_string(),
            full_address,
        }
    }

    /// Resolved coordinates, when geocoding succeeded.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }
}

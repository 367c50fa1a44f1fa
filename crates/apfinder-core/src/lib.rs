//! Shared domain types and configuration for the distributor/partner locator.

mod app_config;
mod config;
pub mod entity;
pub mod radius;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entity::{
    Coordinates, EntityId, EntityKind, GeocodedEntity, LocationEntity, Plan, UNKNOWN_DISTANCE,
};
pub use radius::{RadiusParseError, RadiusSelection};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

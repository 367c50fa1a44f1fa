use crate::app_config::{AppConfig, Environment};
use crate::radius::RadiusSelection;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let supabase_url = require("SUPABASE_URL")?;
    let supabase_anon_key = require("SUPABASE_ANON_KEY")?;
    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());

    let env = parse_environment(&or_default("APFINDER_ENV", "development"));
    let log_level = or_default("APFINDER_LOG_LEVEL", "info");
    let db_schema = or_default("APFINDER_DB_SCHEMA", "public");
    let geocode_region = or_default("APFINDER_GEOCODE_REGION", "br");
    let country_suffix = or_default("APFINDER_COUNTRY_SUFFIX", "Brasil");

    let default_radius = or_default("APFINDER_DEFAULT_RADIUS", "100km")
        .parse::<RadiusSelection>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "APFINDER_DEFAULT_RADIUS".to_string(),
            reason: e.to_string(),
        })?;

    let geocode_max_concurrent = parse_usize("APFINDER_GEOCODE_MAX_CONCURRENT", "0")?;
    let request_timeout_secs = parse_u64("APFINDER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("APFINDER_USER_AGENT", "apfinder/0.1 (distributor-locator)");

    Ok(AppConfig {
        env,
        log_level,
        supabase_url,
        supabase_anon_key,
        db_schema,
        google_maps_api_key,
        geocode_region,
        country_suffix,
        default_radius,
        geocode_max_concurrent,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::radius::RadiusSelection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the hosted data API, e.g. `https://<project>.supabase.co`.
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Schema sent as `Accept-Profile` on every directory read.
    pub db_schema: String,
    /// Absent key leaves the geocoder unconfigured; ranking then fails fast.
    pub google_maps_api_key: Option<String>,
    pub geocode_region: String,
    /// Appended to every address before geocoding.
    pub country_suffix: String,
    pub default_radius: RadiusSelection,
    /// `0` means one in-flight geocode per directory entry.
    pub geocode_max_concurrent: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[redacted]")
            .field("db_schema", &self.db_schema)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocode_region", &self.geocode_region)
            .field("country_suffix", &self.country_suffix)
            .field("default_radius", &self.default_radius)
            .field("geocode_max_concurrent", &self.geocode_max_concurrent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

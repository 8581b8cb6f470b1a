//! Centralized constants for the place-picker crate
//!
//! Values here are fixed behaviour, not configuration. Tunable settings live
//! in [`crate::config::defaults`].

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Geocoding request settings
pub mod http {
    use std::time::Duration;

    /// Per-request timeout
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Response format requested from the provider
    pub const RESPONSE_FORMAT: &str = "geojson";
}

/// Search behaviour
pub mod search {
    use std::time::Duration;

    /// Quiet period before a typed query is sent
    pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

    /// Maximum number of results requested per search
    pub const RESULT_LIMIT: usize = 10;

    /// Number of selections kept in history
    pub const HISTORY_CAPACITY: usize = 10;
}

/// Cache settings
pub mod cache {
    /// Last-known position freshness in seconds (1 hour)
    pub const POSITION_TTL_SECS: u64 = 3600;

    /// Last-known position cache file name
    pub const POSITION_CACHE_FILE: &str = "last_position.json";
}

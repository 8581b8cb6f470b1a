//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api;

/// Default geocoding provider base URL
pub const DEFAULT_PROVIDER_URL: &str = api::NOMINATIM_URL;

/// Default User-Agent sent to the geocoding provider
pub const DEFAULT_USER_AGENT: &str = concat!("place-picker/", env!("CARGO_PKG_VERSION"));

/// Default IP geolocation endpoint
pub const DEFAULT_IP_URL: &str = api::IP_API_URL;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "place-picker";

//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/place-picker/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::locale::Locale;
use crate::location::zoom::DEFAULT_ZOOM;
use crate::location::Location;
use crate::position::Permission;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Language and region override
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Device position settings
    #[serde(default)]
    pub location: LocationConfig,

    /// CLI defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of a Nominatim-compatible service
    #[serde(default = "default_provider_url")]
    pub url: String,

    /// Identifying User-Agent, required by the public instance
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Locale settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale tag such as `de-AT`; empty means use the environment
    #[serde(default)]
    pub tag: String,
}

/// Device position settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Whether location services count as switched on
    #[serde(default = "default_true")]
    pub services_enabled: bool,

    /// Permission state reported to the resolver
    #[serde(default)]
    pub permission: Permission,

    /// IP geolocation endpoint used for the device fix
    #[serde(default = "default_ip_url")]
    pub ip_url: String,
}

/// Default values for CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_provider_url() -> String {
    DEFAULT_PROVIDER_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_true() -> bool {
    true
}
fn default_ip_url() -> String {
    DEFAULT_IP_URL.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            url: default_provider_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            services_enabled: true,
            permission: Permission::default(),
            ip_url: default_ip_url(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Locale configured in `[locale] tag`, if it parses
    ///
    /// Falling back to the process environment is the caller's decision.
    pub fn locale(&self) -> Option<Locale> {
        Locale::parse(&self.locale.tag)
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "url"] => Some(self.provider.url.clone()),
            ["provider", "user_agent"] => Some(self.provider.user_agent.clone()),

            ["locale", "tag"] => Some(self.locale.tag.clone()),

            ["location", "services_enabled"] => Some(self.location.services_enabled.to_string()),
            ["location", "permission"] => Some(self.location.permission.to_string()),
            ["location", "ip_url"] => Some(self.location.ip_url.clone()),

            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),
            ["url", "providers", name] => self.url.providers.get(*name).cloned(),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "url"] => {
                self.provider.url = value.to_string();
            }
            ["provider", "user_agent"] => {
                if value.trim().is_empty() {
                    return Err(Error::Config("User-Agent must not be empty".to_string()));
                }
                self.provider.user_agent = value.to_string();
            }

            ["locale", "tag"] => {
                if !value.is_empty() && Locale::parse(value).is_none() {
                    return Err(Error::Config(format!("Invalid locale tag: {}", value)));
                }
                self.locale.tag = value.to_string();
            }

            ["location", "services_enabled"] => {
                self.location.services_enabled = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }
            ["location", "permission"] => {
                self.location.permission = value.parse().map_err(Error::Config)?;
            }
            ["location", "ip_url"] => {
                self.location.ip_url = value.to_string();
            }

            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }
            ["url", "providers", name] => {
                self.url.providers.insert(name.to_string(), value.to_string());
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "provider.url",
            "provider.user_agent",
            "locale.tag",
            "location.services_enabled",
            "location.permission",
            "location.ip_url",
            "defaults.format",
            "server.host",
            "server.port",
            "url.default",
            "url.providers.<name>",
        ]
    }

    /// Format a map URL for `location` using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders
    pub fn format_url(&self, provider: Option<&str>, location: &Location) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &location.latitude.to_string())
            .replace("{lng}", &location.longitude.to_string())
            .replace("{zoom}", &location.zoom.unwrap_or(DEFAULT_ZOOM).to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

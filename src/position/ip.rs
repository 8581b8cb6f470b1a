//! IP-based position provider
//!
//! Uses ip-api.com for the live fix and a small file cache for the
//! last-known position. Service enablement and permission are not real
//! device state here; they come from configuration so the resolver's
//! failure paths stay reachable from the CLI.

use crate::config::Config;
use crate::constants::cache::{POSITION_CACHE_FILE, POSITION_TTL_SECS};
use crate::constants::http::REQUEST_TIMEOUT;
use crate::error::{Error, Result};
use crate::location::Coordinates;
use crate::position::{Permission, PositionProvider};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;

/// Position provider backed by IP geolocation
#[derive(Debug)]
pub struct IpPositionProvider {
    client: reqwest::Client,
    url: String,
    cache_path: Option<PathBuf>,
    services_enabled: bool,
    permission: Permission,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Cached position data
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPosition {
    position: Coordinates,
    timestamp: u64,
}

impl IpPositionProvider {
    /// Create a provider for `url` with the default cache path
    pub fn new(url: impl Into<String>) -> Self {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(crate::config::defaults::APP_DIR_NAME).join(POSITION_CACHE_FILE));

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            url: url.into(),
            cache_path,
            services_enabled: true,
            permission: Permission::Granted,
        }
    }

    /// Create a provider from the `[location]` config section
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.location.ip_url.clone())
            .with_services_enabled(config.location.services_enabled)
            .with_permission(config.location.permission)
    }

    /// Use a specific cache path
    pub fn with_cache_path(mut self, cache_path: PathBuf) -> Self {
        self.cache_path = Some(cache_path);
        self
    }

    /// Disable the last-known cache
    pub fn without_cache(mut self) -> Self {
        self.cache_path = None;
        self
    }

    pub fn with_services_enabled(mut self, enabled: bool) -> Self {
        self.services_enabled = enabled;
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }

    /// Fetch position from the IP geolocation service
    async fn fetch_position(&self) -> Result<Coordinates> {
        debug!(url = %self.url, "IP position request");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::NoConnection(format!("IP location request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            return Err(Error::ServerError {
                status: response.status().as_u16(),
            });
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            Error::MalformedResponse(format!("Failed to parse IP location response: {}", e))
        })?;

        if data.status != "success" {
            return Err(Error::ProviderError {
                message: data
                    .message
                    .unwrap_or_else(|| "IP location lookup failed".to_string()),
            });
        }

        let (Some(lat), Some(lng)) = (data.lat, data.lon) else {
            return Err(Error::MissingCoordinates);
        };
        let position = Coordinates::new(lat, lng);
        position.validate()?;
        Ok(position)
    }

    /// Load cached position if still fresh
    fn load_cache(&self) -> Option<Coordinates> {
        let cache_path = self.cache_path.as_ref()?;

        if !cache_path.exists() {
            return None;
        }

        let content = fs::read_to_string(cache_path).ok()?;
        let cached: CachedPosition = serde_json::from_str(&content).ok()?;

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        if now.saturating_sub(cached.timestamp) < POSITION_TTL_SECS {
            Some(cached.position)
        } else {
            None
        }
    }

    /// Save position to cache
    fn save_cache(&self, position: Coordinates) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let cached = CachedPosition {
            position,
            timestamp,
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }
}

impl PositionProvider for IpPositionProvider {
    async fn is_location_service_enabled(&self) -> Result<bool> {
        Ok(self.services_enabled)
    }

    async fn check_permission(&self) -> Result<Permission> {
        Ok(self.permission)
    }

    /// There is nobody to prompt; a re-request reports the configured state
    async fn request_permission(&self) -> Result<Permission> {
        Ok(self.permission)
    }

    async fn current_position(&self) -> Result<Coordinates> {
        let position = self.fetch_position().await?;
        self.save_cache(position);
        Ok(position)
    }

    async fn last_known_position(&self) -> Result<Option<Coordinates>> {
        Ok(self.load_cache())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::{Json, Router};
    use tempfile::TempDir;
    use tokio::net::TcpListener;

    async fn spawn_ip_api(body: serde_json::Value) -> String {
        let router = Router::new().route("/json", get(move || async move { Json(body) }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/json", addr)
    }

    #[test]
    fn test_provider_creation() {
        let provider = IpPositionProvider::new("http://localhost/json");
        assert!(provider.cache_path.is_some());
        assert!(provider.without_cache().cache_path.is_none());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.location.services_enabled = false;
        config.location.permission = Permission::Denied;

        let provider = IpPositionProvider::from_config(&config);
        assert!(!provider.services_enabled);
        assert_eq!(provider.permission, Permission::Denied);
        assert_eq!(provider.url, config.location.ip_url);
    }

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("test_cache.json");
        let provider = IpPositionProvider::new("http://localhost/json").with_cache_path(cache_path);

        assert!(provider.load_cache().is_none());

        provider.save_cache(Coordinates::new(40.7128, -74.0060));
        let loaded = provider.load_cache().unwrap();
        assert_eq!(loaded.lat, 40.7128);
        assert_eq!(loaded.lng, -74.0060);

        fs::remove_file(temp_dir.path().join("test_cache.json")).unwrap();
        assert!(provider.load_cache().is_none());
    }

    #[test]
    fn test_stale_cache_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("stale.json");
        let stale = CachedPosition {
            position: Coordinates::new(1.0, 2.0),
            timestamp: 0,
        };
        fs::write(&cache_path, serde_json::to_string(&stale).unwrap()).unwrap();

        let provider = IpPositionProvider::new("http://localhost/json").with_cache_path(cache_path);
        assert!(provider.load_cache().is_none());
    }

    #[test]
    fn test_cache_within_ttl_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let cache_path = temp_dir.path().join("fresh.json");
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let fresh = CachedPosition {
            position: Coordinates::new(1.0, 2.0),
            timestamp: now - (POSITION_TTL_SECS - 60),
        };
        fs::write(&cache_path, serde_json::to_string(&fresh).unwrap()).unwrap();

        let provider = IpPositionProvider::new("http://localhost/json").with_cache_path(cache_path);
        assert_eq!(provider.load_cache(), Some(Coordinates::new(1.0, 2.0)));
    }

    #[tokio::test]
    async fn test_current_position_fills_cache() {
        let url = spawn_ip_api(serde_json::json!({
            "status": "success",
            "lat": 47.0707,
            "lon": 15.4395,
            "city": "Graz"
        }))
        .await;
        let temp_dir = TempDir::new().unwrap();
        let provider =
            IpPositionProvider::new(url).with_cache_path(temp_dir.path().join("pos.json"));

        assert!(provider.last_known_position().await.unwrap().is_none());

        let position = provider.current_position().await.unwrap();
        assert_eq!(position, Coordinates::new(47.0707, 15.4395));
        assert_eq!(provider.last_known_position().await.unwrap(), Some(position));
    }

    #[tokio::test]
    async fn test_failed_lookup() {
        let url = spawn_ip_api(serde_json::json!({
            "status": "fail",
            "message": "reserved range"
        }))
        .await;
        let provider = IpPositionProvider::new(url).without_cache();

        match provider.current_position().await {
            Err(Error::ProviderError { message }) => assert_eq!(message, "reserved range"),
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_configured_permission_is_reported() {
        let provider = IpPositionProvider::new("http://localhost/json")
            .without_cache()
            .with_services_enabled(false)
            .with_permission(Permission::DeniedForever);

        assert!(!provider.is_location_service_enabled().await.unwrap());
        assert_eq!(provider.check_permission().await.unwrap(), Permission::DeniedForever);
        assert_eq!(provider.request_permission().await.unwrap(), Permission::DeniedForever);
    }
}

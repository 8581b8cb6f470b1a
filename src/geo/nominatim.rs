//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Speaks the Nominatim `/search` and `/reverse` API with `format=geojson`.
//! The public instance requires an identifying User-Agent and allows about
//! one request per second, which is why callers debounce before reaching
//! this client.

use crate::config::Config;
use crate::constants::http::{REQUEST_TIMEOUT, RESPONSE_FORMAT};
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, QueryParams};
use crate::locale::Locale;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Nominatim geocoding client
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
    language: String,
}

impl NominatimClient {
    /// Create a client for `base_url`
    ///
    /// `user_agent` is mandatory for the public Nominatim instance and must
    /// not be empty.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        language: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(base_url, user_agent, language, REQUEST_TIMEOUT)
    }

    /// Create a client from configuration and an injected locale
    pub fn from_config(config: &Config, locale: &Locale) -> Result<Self> {
        Self::new(
            config.provider.url.clone(),
            &config.provider.user_agent,
            locale.language.clone(),
        )
    }

    pub(crate) fn with_timeout(
        base_url: impl Into<String>,
        user_agent: &str,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        if user_agent.trim().is_empty() {
            return Err(Error::Config(
                "A User-Agent identifying the application is required".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    /// Language sent as `accept-language`
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Caller parameters plus the ones the provider always needs
    fn full_params(&self, params: &QueryParams) -> QueryParams {
        let mut full = params.clone();
        full.insert("format", RESPONSE_FORMAT);
        full.insert("addressdetails", 1);
        full.insert("accept-language", &self.language);
        full
    }

    /// Map a transport failure onto the error taxonomy
    fn classify(err: &reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::NoConnection(err.to_string())
        }
    }

    /// Decode a body, surfacing an embedded `error` field as a provider error
    fn decode(body: &str) -> Result<Value> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::MalformedResponse(format!("Response is not JSON: {}", e)))?;

        if let Some(message) = provider_error(&value) {
            return Err(Error::ProviderError { message });
        }

        Ok(value)
    }
}

/// `{"error": "..."}` or `{"error": {"message": "..."}}`
fn provider_error(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    let message = match error {
        Value::String(s) => s.clone(),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string),
        other => other.to_string(),
    };
    Some(message)
}

impl GeoBackend for NominatimClient {
    async fn request(&self, path: &str, params: &QueryParams) -> Result<Value> {
        let url = self.endpoint(path);
        let params = self.full_params(params);
        debug!(url = %url, params = ?params.pairs(), "geocoding request");

        let response = self
            .client
            .get(&url)
            .query(params.pairs())
            .send()
            .await
            .map_err(|e| Self::classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| Self::classify(&e))?;
        Self::decode(&body)
    }
}

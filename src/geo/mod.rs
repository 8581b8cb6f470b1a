//! Geocoding module
//!
//! Provides forward and reverse geocoding against a Nominatim-compatible
//! provider. [`GeoBackend::request`] is the one required operation; the
//! search helpers decode feature collections into [`Location`]s on top of it.

pub mod nominatim;

use crate::constants::search::RESULT_LIMIT;
use crate::error::Result;
use crate::location::normalize::from_response;
use crate::location::{Coordinates, Location};
use serde_json::Value;
use std::fmt::Display;
use std::future::Future;

/// Query parameters for a provider request
///
/// Values are stringified on insertion so the wire format never depends on
/// the caller's numeric types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier value for the same key
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Issue one request to `path` and return the decoded JSON body
    ///
    /// Implementations append provider-required parameters and classify
    /// failures into the crate's error taxonomy. No retries.
    fn request(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Value>> + Send;

    /// Forward geocode free text, up to `limit` candidates
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Location>>> + Send {
        let params = QueryParams::new().with("q", query).with("limit", limit);
        async move {
            let body = self.request("search", &params).await?;
            from_response(&body)
        }
    }

    /// Reverse geocode a coordinate to its most specific enclosing place
    ///
    /// Returns `None` when the provider has no coverage there.
    fn reverse(
        &self,
        coords: Coordinates,
    ) -> impl Future<Output = Result<Option<Location>>> + Send {
        let params = QueryParams::new()
            .with("lat", coords.lat)
            .with("lon", coords.lng);
        async move {
            let body = self.request("reverse", &params).await?;
            Ok(from_response(&body)?.into_iter().next())
        }
    }

    /// Search by ISO country code
    fn search_country(
        &self,
        country_code: &str,
    ) -> impl Future<Output = Result<Vec<Location>>> + Send {
        let params = QueryParams::new()
            .with("country", country_code)
            .with("limit", RESULT_LIMIT);
        async move {
            let body = self.request("search", &params).await?;
            from_response(&body)
        }
    }
}

/// Get the default geocoding backend
pub fn get_geocoder(
    config: &crate::config::Config,
    locale: &crate::locale::Locale,
) -> Result<nominatim::NominatimClient> {
    nominatim::NominatimClient::from_config(config, locale)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted backend for exercising callers without a network

    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// One scripted reply
    pub enum Reply {
        Body(Value),
        Fail(fn() -> Error),
        Delayed(Duration, Value),
    }

    /// Backend that replays scripted replies and records every request
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<Vec<(String, QueryParams)>>,
    }

    impl ScriptedBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, reply: Reply) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub fn calls(&self) -> Vec<(String, QueryParams)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl GeoBackend for ScriptedBackend {
        async fn request(&self, path: &str, params: &QueryParams) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), params.clone()));
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Body(body)) => Ok(body),
                Some(Reply::Fail(make)) => Err(make()),
                Some(Reply::Delayed(delay, body)) => {
                    tokio::time::sleep(delay).await;
                    Ok(body)
                }
                None => Ok(serde_json::json!({ "features": [] })),
            }
        }
    }

    /// A feature collection with one point feature per (name, lat, lng)
    pub fn features(places: &[(&str, f64, f64)]) -> Value {
        let features: Vec<Value> = places
            .iter()
            .map(|(name, lat, lng)| {
                serde_json::json!({
                    "type": "Feature",
                    "properties": { "name": name, "addresstype": "city" },
                    "geometry": { "type": "Point", "coordinates": [lng, lat] }
                })
            })
            .collect();
        serde_json::json!({ "type": "FeatureCollection", "features": features })
    }
}

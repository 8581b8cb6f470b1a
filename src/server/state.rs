//! Server shared state
//!
//! Holds configuration plus the long-lived search coordinator and resolver.
//! The coordinator keeps this process's selection history, so it lives as
//! long as the server does.

use crate::config::Config;
use crate::error::Result;
use crate::events::{LocationEvents, TracingEvents};
use crate::geo::nominatim::NominatimClient;
use crate::geo::GeoBackend;
use crate::locale::Locale;
use crate::position::ip::IpPositionProvider;
use crate::position::PositionProvider;
use crate::resolver::LocationResolver;
use crate::search::SearchCoordinator;
use std::sync::Arc;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState<B, P> {
    /// Configuration the server was started with
    pub config: Config,

    /// Locale injected into the geocoder and resolver
    pub locale: Locale,

    pub coordinator: SearchCoordinator<B>,

    pub resolver: LocationResolver<B, P>,

    started: Instant,
}

impl<B: GeoBackend, P: PositionProvider> AppState<B, P> {
    /// Wire a coordinator and resolver around shared backends
    pub fn new(config: Config, locale: Locale, backend: Arc<B>, positions: Arc<P>) -> Self {
        let events: Arc<dyn LocationEvents> = Arc::new(TracingEvents);
        let coordinator = SearchCoordinator::new(backend.clone()).with_events(events.clone());
        let resolver =
            LocationResolver::new(backend, positions, locale.clone()).with_events(events);

        Self {
            config,
            locale,
            coordinator,
            resolver,
            started: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

impl AppState<NominatimClient, IpPositionProvider> {
    /// State backed by the configured Nominatim instance and IP geolocation
    pub fn from_config(config: Config, locale: Locale) -> Result<Self> {
        let backend = Arc::new(NominatimClient::from_config(&config, &locale)?);
        let positions = Arc::new(IpPositionProvider::from_config(&config));
        Ok(Self::new(config, locale, backend, positions))
    }
}

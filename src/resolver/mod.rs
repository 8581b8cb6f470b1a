//! Initial location resolution
//!
//! Decides where the picker opens. [`LocationResolver::resolve_initial`]
//! walks a fallback chain and settles for nothing rather than failing;
//! [`LocationResolver::current_location`] is the strict "use my position"
//! action that reports why it could not get a fix.

use crate::error::{Error, Result};
use crate::events::{LocationEvents, NoopEvents};
use crate::geo::GeoBackend;
use crate::locale::Locale;
use crate::location::Location;
use crate::position::{Permission, PositionProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a starting location from explicit input, device position or locale
pub struct LocationResolver<B, P> {
    backend: Arc<B>,
    positions: Arc<P>,
    locale: Locale,
    events: Arc<dyn LocationEvents>,
}

impl<B: GeoBackend, P: PositionProvider> LocationResolver<B, P> {
    pub fn new(backend: Arc<B>, positions: Arc<P>, locale: Locale) -> Self {
        Self {
            backend,
            positions,
            locale,
            events: Arc::new(NoopEvents),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn LocationEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Pick the initial location
    ///
    /// Order: the explicit location, then the reverse-geocoded last-known
    /// position, then the first hit for the locale's country. A failing step
    /// is logged and skipped. Errors only when every step that ran failed.
    pub async fn resolve_initial(&self, explicit: Option<Location>) -> Result<Option<Location>> {
        if let Some(location) = explicit {
            debug!("using explicit initial location");
            self.events.on_location_resolved(&location);
            return Ok(Some(location));
        }

        let mut attempted = 0;
        let mut failed = 0;
        let mut last_error = None;

        attempted += 1;
        match self.from_last_known().await {
            Ok(Some(location)) => return Ok(Some(self.resolved(location))),
            Ok(None) => debug!("no location from last-known position"),
            Err(e) => {
                warn!(error = %e, "last-known position lookup failed");
                failed += 1;
                last_error = Some(e);
            }
        }

        match self.locale.country_code() {
            Some(code) => {
                attempted += 1;
                match self.backend.search_country(&code).await {
                    Ok(results) => match results.into_iter().next() {
                        Some(location) => return Ok(Some(self.resolved(location))),
                        None => debug!(country = %code, "country search found nothing"),
                    },
                    Err(e) => {
                        warn!(country = %code, error = %e, "country search failed");
                        failed += 1;
                        last_error = Some(e);
                    }
                }
            }
            None => debug!(locale = %self.locale, "locale has no region, skipping country search"),
        }

        match last_error {
            Some(e) if failed == attempted => Err(e),
            _ => Ok(None),
        }
    }

    /// Reverse geocode the cached fix, if there is one
    async fn from_last_known(&self) -> Result<Option<Location>> {
        let Some(position) = self.positions.last_known_position().await? else {
            return Ok(None);
        };
        debug!(lat = position.lat, lng = position.lng, "reverse geocoding last-known position");
        self.backend.reverse(position).await
    }

    /// Location of the device right now
    ///
    /// Asks for permission once if it was denied. Address lookup is best
    /// effort: without it the result carries only coordinates.
    pub async fn current_location(&self) -> Result<Location> {
        match self.locate().await {
            Ok(location) => Ok(self.resolved(location)),
            Err(e) => {
                self.events.on_resolution_error(e.kind(), &e.to_string());
                Err(e)
            }
        }
    }

    async fn locate(&self) -> Result<Location> {
        if !self.positions.is_location_service_enabled().await? {
            return Err(Error::ServicesDisabled);
        }

        let mut permission = self.positions.check_permission().await?;
        if permission == Permission::Denied {
            debug!("location permission denied, requesting once");
            permission = self.positions.request_permission().await?;
        }
        match permission {
            Permission::Granted => {}
            Permission::Denied => return Err(Error::PermissionDenied),
            Permission::DeniedForever => return Err(Error::PermissionDeniedForever),
        }

        let position = self.positions.current_position().await?;
        position.validate()?;

        match self.backend.reverse(position).await {
            Ok(Some(location)) => Ok(location),
            Ok(None) => {
                debug!("no address at current position");
                Ok(Location::from_coordinates(position))
            }
            Err(e) => {
                warn!(error = %e, "reverse geocoding of current position failed");
                Ok(Location::from_coordinates(position))
            }
        }
    }

    fn resolved(&self, location: Location) -> Location {
        self.events.on_location_resolved(&location);
        location
    }
}

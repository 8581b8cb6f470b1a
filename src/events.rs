//! Outbound notifications
//!
//! The resolver and the search coordinator report what happened through a
//! [`LocationEvents`] sink instead of returning errors to whoever happens to
//! be rendering. All methods default to doing nothing.

use crate::error::ErrorKind;
use crate::location::Location;
use tracing::{info, warn};

/// Receiver of location and search notifications
pub trait LocationEvents: Send + Sync {
    fn on_location_resolved(&self, _location: &Location) {}

    fn on_search_results(&self, _query: &str, _results: &[Location]) {}

    fn on_resolution_error(&self, _kind: ErrorKind, _message: &str) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl LocationEvents for NoopEvents {}

/// Writes events to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEvents;

impl LocationEvents for TracingEvents {
    fn on_location_resolved(&self, location: &Location) {
        info!(
            lat = location.latitude,
            lng = location.longitude,
            label = %location.label(),
            "location resolved"
        );
    }

    fn on_search_results(&self, query: &str, results: &[Location]) {
        info!(query, count = results.len(), "search results");
    }

    fn on_resolution_error(&self, kind: ErrorKind, message: &str) {
        warn!(%kind, message, "location error");
    }
}

//! Search coordination
//!
//! [`SearchCoordinator`] sits between a text box and the geocoding backend.
//! Keystrokes are debounced, every network dispatch takes a ticket from a
//! monotonic sequence, and a response whose ticket is no longer the newest
//! is dropped. Clearing the query bumps the sequence as well, so a cleared box
//! never fills up again with late results.

pub mod debounce;

use crate::constants::search::RESULT_LIMIT;
use crate::events::{LocationEvents, NoopEvents};
use crate::geo::GeoBackend;
use crate::history::SearchHistory;
use crate::location::Location;
use debounce::Debouncer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Debounced search plus the session's selection history
pub struct SearchCoordinator<B> {
    backend: Arc<B>,
    debouncer: Debouncer,
    history: Mutex<SearchHistory>,
    dispatched: AtomicU64,
    limit: usize,
    events: Arc<dyn LocationEvents>,
}

impl<B: GeoBackend> SearchCoordinator<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            debouncer: Debouncer::default(),
            history: Mutex::new(SearchHistory::new()),
            dispatched: AtomicU64::new(0),
            limit: RESULT_LIMIT,
            events: Arc::new(NoopEvents),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn LocationEvents>) -> Self {
        self.events = events;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Search for `query` once typing has settled
    ///
    /// Resolves to `None` when this call was superseded, either during the
    /// debounce wait or because a newer request was dispatched before its
    /// response arrived. Failures are reported to the events sink and come
    /// back as an empty list.
    pub async fn search(&self, query: &str) -> Option<Vec<Location>> {
        let query = query.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            self.dispatched.fetch_add(1, Ordering::SeqCst);
            debug!("empty query, pending searches dropped");
            return Some(Vec::new());
        }

        self.debouncer
            .run(query.to_string(), |q| self.dispatch(q))
            .await
            .flatten()
    }

    /// One network round trip guarded by a dispatch ticket
    async fn dispatch(&self, query: String) -> Option<Vec<Location>> {
        let ticket = self.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(query = %query, ticket, "dispatching search");

        let result = self.backend.search(&query, self.limit).await;

        let newest = self.dispatched.load(Ordering::SeqCst);
        if newest != ticket {
            debug!(query = %query, ticket, newest, "discarding stale search response");
            return None;
        }

        match result {
            Ok(results) => {
                self.events.on_search_results(&query, &results);
                Some(results)
            }
            Err(e) => {
                warn!(query = %query, error = %e, "search failed");
                self.events.on_resolution_error(e.kind(), &e.to_string());
                Some(Vec::new())
            }
        }
    }

    /// Record a location the user picked
    pub fn select_result(&self, location: Location) {
        self.lock_history().add(location);
    }

    /// History snapshot, most recent first
    pub fn history(&self) -> Vec<Location> {
        self.lock_history().entries()
    }

    pub fn clear_history(&self) {
        self.lock_history().clear();
    }

    /// Drop any pending debounced search
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    fn lock_history(&self) -> MutexGuard<'_, SearchHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::search::DEBOUNCE_DELAY;
    use crate::error::{Error, ErrorKind};
    use crate::events::testing::{Event, RecordingEvents};
    use crate::geo::testing::{features, Reply, ScriptedBackend};
    use crate::location::Coordinates;

    fn coordinator(backend: ScriptedBackend) -> Arc<SearchCoordinator<ScriptedBackend>> {
        Arc::new(SearchCoordinator::new(Arc::new(backend)))
    }

    fn with_recorder(
        backend: ScriptedBackend,
    ) -> (Arc<SearchCoordinator<ScriptedBackend>>, Arc<RecordingEvents>) {
        let events = Arc::new(RecordingEvents::default());
        let coordinator =
            SearchCoordinator::new(Arc::new(backend)).with_events(events.clone());
        (Arc::new(coordinator), events)
    }

    fn spawn_search(
        coordinator: &Arc<SearchCoordinator<ScriptedBackend>>,
        query: &'static str,
    ) -> tokio::task::JoinHandle<Option<Vec<Location>>> {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.search(query).await })
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_query_skips_network() {
        let coordinator = coordinator(ScriptedBackend::new());

        assert_eq!(coordinator.search("").await, Some(Vec::new()));
        assert_eq!(coordinator.search("   ").await, Some(Vec::new()));
        assert_eq!(coordinator.backend().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_are_delivered() {
        let (coordinator, events) = with_recorder(
            ScriptedBackend::new().reply(Reply::Body(features(&[("Graz", 47.07, 15.44)]))),
        );

        let results = coordinator.search("Graz").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name.as_deref(), Some("Graz"));

        let calls = coordinator.backend().calls();
        assert_eq!(calls[0].1.get("q"), Some("Graz"));
        assert_eq!(calls[0].1.get("limit"), Some("10"));
        assert_eq!(events.events(), vec![Event::Results("Graz".to_string(), 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_sends_one_request() {
        let coordinator = coordinator(ScriptedBackend::new());

        let first = spawn_search(&coordinator, "Gr");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = spawn_search(&coordinator, "Gra");
        tokio::time::sleep(Duration::from_millis(100)).await;
        let third = spawn_search(&coordinator, "Graz");

        assert_eq!(first.await.unwrap(), None);
        assert_eq!(second.await.unwrap(), None);
        assert_eq!(third.await.unwrap(), Some(Vec::new()));

        let calls = coordinator.backend().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.get("q"), Some("Graz"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_swallowed() {
        let (coordinator, events) =
            with_recorder(ScriptedBackend::new().reply(Reply::Fail(|| Error::Timeout)));

        assert_eq!(coordinator.search("Graz").await, Some(Vec::new()));
        assert_eq!(events.errors(), vec![ErrorKind::Timeout]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_cancels_pending_search() {
        let coordinator = coordinator(ScriptedBackend::new());

        let pending = spawn_search(&coordinator, "Graz");
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(coordinator.search("").await, Some(Vec::new()));
        assert_eq!(pending.await.unwrap(), None);
        assert_eq!(coordinator.backend().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_discards_in_flight_response() {
        let coordinator = coordinator(ScriptedBackend::new().reply(Reply::Delayed(
            Duration::from_secs(2),
            features(&[("Graz", 47.07, 15.44)]),
        )));

        let in_flight = spawn_search(&coordinator, "Graz");
        tokio::time::sleep(DEBOUNCE_DELAY + Duration::from_millis(100)).await;
        assert_eq!(coordinator.backend().call_count(), 1);

        assert_eq!(coordinator.search("").await, Some(Vec::new()));
        assert_eq!(in_flight.await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let (coordinator, events) = with_recorder(
            ScriptedBackend::new()
                .reply(Reply::Delayed(
                    Duration::from_secs(2),
                    features(&[("Graz", 47.07, 15.44)]),
                ))
                .reply(Reply::Body(features(&[("Linz", 48.3, 14.29)]))),
        );

        let slow = spawn_search(&coordinator, "Graz");
        tokio::time::sleep(Duration::from_secs(1)).await;
        let fast = spawn_search(&coordinator, "Linz");

        let fast = fast.await.unwrap().unwrap();
        assert_eq!(fast[0].name.as_deref(), Some("Linz"));
        assert_eq!(slow.await.unwrap(), None);

        assert_eq!(coordinator.backend().call_count(), 2);
        assert_eq!(events.events(), vec![Event::Results("Linz".to_string(), 1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_does_not_touch_history() {
        let coordinator = coordinator(
            ScriptedBackend::new().reply(Reply::Body(features(&[("Graz", 47.07, 15.44)]))),
        );

        coordinator.search("Graz").await;
        assert!(coordinator.history().is_empty());
    }

    #[test]
    fn test_select_result_history() {
        let coordinator = coordinator(ScriptedBackend::new());
        let graz = Location::from_coordinates(Coordinates::new(47.07, 15.44));
        let linz = Location::from_coordinates(Coordinates::new(48.3, 14.29));

        coordinator.select_result(graz.clone());
        coordinator.select_result(linz.clone());
        coordinator.select_result(graz.clone());

        assert_eq!(coordinator.history(), vec![graz, linz]);

        coordinator.clear_history();
        assert!(coordinator.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_limit_and_delay() {
        let coordinator = Arc::new(
            SearchCoordinator::new(Arc::new(ScriptedBackend::new()))
                .with_limit(3)
                .with_delay(Duration::from_millis(50)),
        );

        let started = tokio::time::Instant::now();
        coordinator.search("Wien").await;
        assert!(started.elapsed() < DEBOUNCE_DELAY);
        assert_eq!(coordinator.backend().calls()[0].1.get("limit"), Some("3"));
    }
}

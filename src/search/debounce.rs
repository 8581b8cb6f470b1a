//! Debouncing of rapid calls
//!
//! A [`Debouncer`] collapses a burst of calls into one: every call cancels
//! the wait of the call before it, and only a wait that runs for the full
//! delay goes on to execute. Cancelled calls resolve to `None`.
//!
//! ```text
//! call(a) ──wait──✗
//!      call(b) ──wait──✗
//!           call(c) ──────wait──────► f(c)
//! ```

use crate::constants::search::DEBOUNCE_DELAY;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Handle on one pending debounced invocation
///
/// Cancelling is idempotent and takes effect immediately.
#[derive(Debug, Clone)]
pub struct DebounceToken {
    id: u64,
    cancel: CancellationToken,
}

impl DebounceToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Keeps at most one pending wait
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    next_id: AtomicU64,
    pending: Mutex<Option<DebounceToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_id: AtomicU64::new(1),
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wrap `f` so every call through the wrapper is debounced
    pub fn wrap<F>(self, f: F) -> Debounced<F> {
        Debounced { debouncer: self, f }
    }

    /// Wait out the delay, then run `f(arg)` unless a newer call arrived
    ///
    /// Returns `None` when this call was superseded or cancelled.
    pub async fn run<A, F, Fut>(&self, arg: A, f: F) -> Option<Fut::Output>
    where
        F: FnOnce(A) -> Fut,
        Fut: Future,
    {
        let token = self.begin();

        tokio::select! {
            biased;
            () = token.cancel.cancelled() => {
                trace!(id = token.id, "debounced call superseded");
                None
            }
            () = tokio::time::sleep(self.delay) => {
                self.finish(&token);
                trace!(id = token.id, "debounce wait elapsed");
                Some(f(arg).await)
            }
        }
    }

    /// Cancel the pending wait, if any
    pub fn cancel(&self) {
        if let Some(token) = self.lock().take() {
            token.cancel();
        }
    }

    /// Whether a wait is currently pending
    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Register a new wait, cancelling the previous one
    fn begin(&self) -> DebounceToken {
        let token = DebounceToken {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            cancel: CancellationToken::new(),
        };
        if let Some(previous) = self.lock().replace(token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Clear the pending slot if it still belongs to `token`
    fn finish(&self, token: &DebounceToken) {
        let mut pending = self.lock();
        if pending.as_ref().is_some_and(|p| p.id == token.id) {
            *pending = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<DebounceToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

/// A function wrapped by a [`Debouncer`]
#[derive(Debug)]
pub struct Debounced<F> {
    debouncer: Debouncer,
    f: F,
}

impl<F> Debounced<F> {
    /// Debounced call of the wrapped function
    pub async fn call<A, Fut>(&self, arg: A) -> Option<Fut::Output>
    where
        F: Fn(A) -> Fut,
        Fut: Future,
    {
        self.debouncer.run(arg, &self.f).await
    }

    pub fn cancel(&self) {
        self.debouncer.cancel();
    }
}

//! Recent selection history
//!
//! An in-memory, most-recent-first list of selected locations. Selecting a
//! location that is already present moves it to the front instead of
//! duplicating it; going over capacity evicts the oldest entry. Nothing here
//! touches the filesystem.

use crate::constants::search::HISTORY_CAPACITY;
use crate::location::Location;
use std::collections::VecDeque;

/// Bounded, deduplicated history of selected locations
#[derive(Debug, Clone)]
pub struct SearchHistory {
    entries: VecDeque<Location>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// History holding at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, moving an equal entry rather than duplicating it
    pub fn add(&mut self, location: Location) {
        if let Some(idx) = self.entries.iter().position(|e| *e == location) {
            self.entries.remove(idx);
        }

        self.entries.push_front(location);
        self.entries.truncate(self.capacity);
    }

    /// Snapshot, most recent first
    pub fn entries(&self) -> Vec<Location> {
        self.entries.iter().cloned().collect()
    }

    /// Up to `count` most recent entries
    pub fn recent(&self, count: usize) -> Vec<Location> {
        self.entries.iter().take(count).cloned().collect()
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.entries.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Location> {
        self.entries.remove(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new()
    }
}

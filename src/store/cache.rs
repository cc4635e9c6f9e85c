//! Read-through cache for post listings.
//!
//! A listing is served from memory while it is younger than the validity
//! window. Writes invalidate the entry, but its records are kept as the
//! last known snapshot for when the backend fails.

use std::time::{Duration, Instant};

use crate::board::PostRecord;

#[derive(Debug)]
struct CacheEntry {
    records: Vec<PostRecord>,
    fetched_at: Instant,
    invalidated: bool,
}

/// Cache of the most recent successful `list_posts` result.
#[derive(Debug)]
pub struct ReadCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl ReadCache {
    /// Create an empty cache with the given validity window.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Records still inside the validity window and not invalidated.
    pub fn fresh(&self) -> Option<&[PostRecord]> {
        self.entry
            .as_ref()
            .filter(|e| !e.invalidated && e.fetched_at.elapsed() < self.ttl)
            .map(|e| e.records.as_slice())
    }

    /// The most recent records regardless of age.
    pub fn last_known(&self) -> Option<&[PostRecord]> {
        self.entry.as_ref().map(|e| e.records.as_slice())
    }

    /// Replace the cached listing.
    pub fn store(&mut self, records: Vec<PostRecord>) {
        self.entry = Some(CacheEntry {
            records,
            fetched_at: Instant::now(),
            invalidated: false,
        });
    }

    /// Force the next read to go to the backend.
    pub fn invalidate(&mut self) {
        if let Some(entry) = self.entry.as_mut() {
            entry.invalidated = true;
        }
    }
}

//! Snapshot Cache Module
//! Holds the last loaded ward with its fetch time; staleness is a pure
//! function of the clock.

use super::record::Ward;
use std::time::{Duration, Instant};

/// One cache slot for the ward snapshot.
///
/// The snapshot is replaced wholesale on every store, so readers see either
/// the previous ward or the new one.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    ward: Ward,
    fetched_at: Option<Instant>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ward: Ward::empty(),
            fetched_at: None,
            ttl,
        }
    }

    pub fn ward(&self) -> &Ward {
        &self.ward
    }

    pub fn fetched_at(&self) -> Option<Instant> {
        self.fetched_at
    }

    /// Replace the snapshot.
    pub fn store(&mut self, ward: Ward, now: Instant) {
        self.ward = ward;
        self.fetched_at = Some(now);
    }

    /// Mark the snapshot stale while keeping it readable until replaced.
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }

    /// True when nothing has been fetched or the TTL has elapsed.
    pub fn is_stale(&self, now: Instant) -> bool {
        match self.fetched_at {
            Some(at) => now.saturating_duration_since(at) >= self.ttl,
            None => true,
        }
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.fetched_at.map(|at| at + self.ttl)
    }
}

//! Cached replication status
//!
//! Holds the last fetched snapshot together with its lower-cased projection.
//! Both are replaced in one step on every refresh, so readers never see a raw
//! snapshot paired with the projection of a different fetch.

use tracing::{debug, info};

use crate::backend::DbHandle;

use super::fetcher::{FetchError, StatusFetcher};
use super::snapshot::StatusSnapshot;

/// Cache state
#[derive(Debug, Clone, PartialEq, Eq)]
enum CacheState {
    /// Nothing fetched yet (or invalidated)
    Uninitialized,
    /// Raw snapshot and its normalized projection from the same fetch
    Cached {
        raw: StatusSnapshot,
        normalized: StatusSnapshot,
    },
}

pub struct StatusCache<H> {
    fetcher: StatusFetcher<H>,
    state: CacheState,
    refreshes: u64,
}

impl<H: DbHandle> StatusCache<H> {
    pub fn new(fetcher: StatusFetcher<H>) -> Self {
        Self {
            fetcher,
            state: CacheState::Uninitialized,
            refreshes: 0,
        }
    }

    /// Fetch a new snapshot and replace whatever was cached
    ///
    /// On failure the previous state is left untouched.
    pub fn refresh(&mut self) -> Result<(), FetchError> {
        let raw = self.fetcher.fetch()?;
        let normalized = raw.normalized();

        if !self.is_cached() {
            info!(fields = raw.len(), "Replica status cached");
        }

        self.state = CacheState::Cached { raw, normalized };
        self.refreshes += 1;
        debug!(refreshes = self.refreshes, "Replica status refreshed");
        Ok(())
    }

    /// Current snapshot, refreshing first if nothing is cached
    pub fn current(&mut self, normalized: bool) -> Result<&StatusSnapshot, FetchError> {
        if !self.is_cached() {
            self.refresh()?;
        }

        match &self.state {
            CacheState::Cached {
                raw,
                normalized: lower,
            } => Ok(if normalized { lower } else { raw }),
            // refresh() either succeeded and cached, or returned early
            CacheState::Uninitialized => Err(FetchError::NoRow),
        }
    }

    /// Drop the cached snapshot; the next `current()` refreshes
    pub fn invalidate(&mut self) {
        debug!("Replica status invalidated");
        self.state = CacheState::Uninitialized;
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.state, CacheState::Cached { .. })
    }

    /// Number of successful refreshes so far
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn fetcher(&self) -> &StatusFetcher<H> {
        &self.fetcher
    }

    pub fn fetcher_mut(&mut self) -> &mut StatusFetcher<H> {
        &mut self.fetcher
    }
}

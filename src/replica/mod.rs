//! Replica status monitoring
//!
//! This module provides:
//! - Status fetching through an injected database handle
//! - A lazily filled status cache with a lower-cased field projection
//! - Running/stopped/healthy checks over the cached status
//! - A bounded wait for a freshly started replica to leave "Connecting to master"

mod cache;
mod fetcher;
mod health;
mod monitor;
mod sleep;
mod snapshot;

#[cfg(test)]
mod testing;

pub use cache::StatusCache;
pub use fetcher::{FetchError, StatusFetcher, STATUS_QUERY};
pub use health::{
    HealthEvaluator, HealthFacts, CONNECTING_IO_STATE, FIELD_IO_RUNNING, FIELD_IO_STATE,
    FIELD_LAST_IO_ERROR, FIELD_LAST_SQL_ERROR, FIELD_SECONDS_BEHIND, FIELD_SQL_RUNNING,
};
pub use monitor::{ReplicaMonitor, START_STATEMENT, STOP_STATEMENT};
pub use sleep::{Sleeper, ThreadSleeper};
pub use snapshot::StatusSnapshot;

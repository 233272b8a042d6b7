//! Replication health derived from the cached status
//!
//! Field names are looked up on the lower-cased projection, but values are
//! compared verbatim: `slave_io_running` must be exactly `"Yes"` (or `"No"`).
//! A replica with one thread running and the other stopped is neither
//! running nor stopped.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::DbHandle;
use crate::config::MonitorConfig;

use super::cache::StatusCache;
use super::fetcher::FetchError;
use super::sleep::Sleeper;
use super::snapshot::StatusSnapshot;

pub const FIELD_IO_RUNNING: &str = "slave_io_running";
pub const FIELD_SQL_RUNNING: &str = "slave_sql_running";
pub const FIELD_SECONDS_BEHIND: &str = "seconds_behind_master";
pub const FIELD_IO_STATE: &str = "slave_io_state";
pub const FIELD_LAST_IO_ERROR: &str = "last_io_error";
pub const FIELD_LAST_SQL_ERROR: &str = "last_sql_error";

/// I/O thread state reported while the replica is still reaching its master
pub const CONNECTING_IO_STATE: &str = "Connecting to master";

const YES: &str = "Yes";
const NO: &str = "No";

/// Health facts of one snapshot; recomputed on every call, never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthFacts {
    pub io_running: bool,
    pub sql_running: bool,
    /// `None` when the replica is not tracking a master position
    pub seconds_behind_master: Option<u64>,
    pub io_state: Option<String>,
    pub last_io_error: Option<String>,
    pub last_sql_error: Option<String>,
}

impl HealthFacts {
    /// Derive facts from a normalized snapshot
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        Self {
            io_running: snapshot.field_is(FIELD_IO_RUNNING, YES),
            sql_running: snapshot.field_is(FIELD_SQL_RUNNING, YES),
            seconds_behind_master: parse_seconds_behind(snapshot.get(FIELD_SECONDS_BEHIND)),
            io_state: snapshot.get(FIELD_IO_STATE).map(str::to_string),
            last_io_error: non_empty(snapshot.get(FIELD_LAST_IO_ERROR)),
            last_sql_error: non_empty(snapshot.get(FIELD_LAST_SQL_ERROR)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.io_running && self.sql_running
    }

    /// Running and lagging no more than `max_seconds_behind_master`
    ///
    /// A missing lag figure is never acceptable.
    pub fn is_healthy(&self, max_seconds_behind_master: u64) -> bool {
        self.is_running()
            && self
                .seconds_behind_master
                .is_some_and(|lag| lag <= max_seconds_behind_master)
    }

    /// I/O thread is still establishing its connection
    pub fn is_connecting(&self) -> bool {
        self.io_state.as_deref() == Some(CONNECTING_IO_STATE)
    }
}

fn parse_seconds_behind(value: Option<&str>) -> Option<u64> {
    let value = value?;
    match value.trim().parse::<u64>() {
        Ok(seconds) => Some(seconds),
        Err(_) => {
            warn!(value = %value, "Unexpected Seconds_Behind_Master value, treating as unknown");
            None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Health checks over a status cache
pub struct HealthEvaluator;

impl HealthEvaluator {
    /// Facts for the cached snapshot (refreshing lazily)
    pub fn facts<H: DbHandle>(cache: &mut StatusCache<H>) -> Result<HealthFacts, FetchError> {
        Ok(HealthFacts::from_snapshot(cache.current(true)?))
    }

    /// Both replication threads report `Yes`
    pub fn is_running<H: DbHandle>(cache: &mut StatusCache<H>) -> Result<bool, FetchError> {
        let status = cache.current(true)?;
        Ok(status.field_is(FIELD_IO_RUNNING, YES) && status.field_is(FIELD_SQL_RUNNING, YES))
    }

    /// Both replication threads report `No`
    pub fn is_stopped<H: DbHandle>(cache: &mut StatusCache<H>) -> Result<bool, FetchError> {
        let status = cache.current(true)?;
        Ok(status.field_is(FIELD_IO_RUNNING, NO) && status.field_is(FIELD_SQL_RUNNING, NO))
    }

    /// Running, and lag within `config.max_seconds_behind_master`
    pub fn is_healthy<H: DbHandle>(
        cache: &mut StatusCache<H>,
        config: &MonitorConfig,
    ) -> Result<bool, FetchError> {
        let facts = Self::facts(cache)?;
        Ok(facts.is_healthy(config.max_seconds_behind_master))
    }

    /// Poll until the I/O thread leaves its connecting state
    ///
    /// Refreshes at most `max_attempts` times, pausing `poll_interval` after
    /// every poll that still reports `Connecting to master`. The loop stops
    /// at the first settled state; the result is `is_running()` afterwards,
    /// whichever way the loop ended. Fetch failures end the wait immediately.
    pub fn wait_until_running<H: DbHandle, S: Sleeper>(
        cache: &mut StatusCache<H>,
        sleeper: &mut S,
        max_attempts: u32,
        poll_interval: Duration,
    ) -> Result<bool, FetchError> {
        let mut polls = 0;
        let mut settled = false;

        while polls < max_attempts {
            cache.refresh()?;
            polls += 1;

            let connecting = cache.current(true)?.field_is(FIELD_IO_STATE, CONNECTING_IO_STATE);
            debug!(attempt = polls, max_attempts, connecting, "Polled replica I/O state");

            if !connecting {
                settled = true;
                break;
            }
            sleeper.sleep(poll_interval);
        }

        let running = Self::is_running(cache)?;
        if settled {
            info!(polls, running, "Replica I/O state settled");
        } else {
            info!(polls, running, "Replica still connecting after all attempts");
        }
        Ok(running)
    }
}

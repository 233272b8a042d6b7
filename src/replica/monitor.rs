use std::time::Duration;

use tracing::debug;

use crate::backend::{CommandError, CommandResult, DbHandle};
use crate::config::{MonitorConfig, WaitConfig};

use super::cache::StatusCache;
use super::fetcher::{FetchError, StatusFetcher};
use super::health::{HealthEvaluator, HealthFacts};
use super::sleep::{Sleeper, ThreadSleeper};
use super::snapshot::StatusSnapshot;

/// Statement issued by `start()`
pub const START_STATEMENT: &str = "START SLAVE";
/// Statement issued by `stop()`
pub const STOP_STATEMENT: &str = "STOP SLAVE";

/// Replication status and health of one replica
///
/// Owns the handle exclusively. Status is fetched on first use and then
/// served from cache until `refresh()` (or `wait_until_running()`) runs.
/// `start()`/`stop()` only issue the command; observe the effect with
/// `refresh()` or `wait_until_running()`.
pub struct ReplicaMonitor<H, S = ThreadSleeper> {
    cache: StatusCache<H>,
    config: MonitorConfig,
    wait: WaitConfig,
    sleeper: S,
}

impl<H: DbHandle> ReplicaMonitor<H> {
    /// Create a monitor with default configuration
    pub fn new(handle: H) -> Self {
        Self::with_config(handle, MonitorConfig::default())
    }

    /// Create a monitor with custom configuration
    pub fn with_config(handle: H, config: MonitorConfig) -> Self {
        Self::with_sleeper(handle, config, ThreadSleeper)
    }
}

impl<H: DbHandle, S: Sleeper> ReplicaMonitor<H, S> {
    /// Create a monitor that pauses through `sleeper` while waiting
    pub fn with_sleeper(handle: H, config: MonitorConfig, sleeper: S) -> Self {
        Self {
            cache: StatusCache::new(StatusFetcher::new(handle)),
            config,
            wait: WaitConfig::default(),
            sleeper,
        }
    }

    /// Replace the defaults used by `wait_until_running()`
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Cached status, in the casing selected by `case_normalize`
    pub fn status(&mut self) -> Result<&StatusSnapshot, FetchError> {
        let normalized = self.config.case_normalize;
        self.cache.current(normalized)
    }

    /// Cached status with explicit casing
    pub fn status_with(&mut self, normalized: bool) -> Result<&StatusSnapshot, FetchError> {
        self.cache.current(normalized)
    }

    pub fn refresh(&mut self) -> Result<(), FetchError> {
        self.cache.refresh()
    }

    /// Drop the cached status; the next read fetches again
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_cached()
    }

    /// Issue `START SLAVE`
    pub fn start(&mut self) -> Result<CommandResult, CommandError> {
        self.execute(START_STATEMENT)
    }

    /// Issue `STOP SLAVE`
    pub fn stop(&mut self) -> Result<CommandResult, CommandError> {
        self.execute(STOP_STATEMENT)
    }

    fn execute(&mut self, sql: &str) -> Result<CommandResult, CommandError> {
        debug!(sql = sql, "Issuing replication command");
        self.cache.fetcher_mut().handle_mut().execute(sql)
    }

    pub fn is_running(&mut self) -> Result<bool, FetchError> {
        HealthEvaluator::is_running(&mut self.cache)
    }

    pub fn is_stopped(&mut self) -> Result<bool, FetchError> {
        HealthEvaluator::is_stopped(&mut self.cache)
    }

    pub fn is_healthy(&mut self) -> Result<bool, FetchError> {
        HealthEvaluator::is_healthy(&mut self.cache, &self.config)
    }

    pub fn facts(&mut self) -> Result<HealthFacts, FetchError> {
        HealthEvaluator::facts(&mut self.cache)
    }

    /// Wait for a just-started replica using the configured attempts and interval
    pub fn wait_until_running(&mut self) -> Result<bool, FetchError> {
        let (max_attempts, poll_interval) = (self.wait.max_attempts, self.wait.poll_interval());
        self.wait_until_running_with(max_attempts, poll_interval)
    }

    pub fn wait_until_running_with(
        &mut self,
        max_attempts: u32,
        poll_interval: Duration,
    ) -> Result<bool, FetchError> {
        HealthEvaluator::wait_until_running(
            &mut self.cache,
            &mut self.sleeper,
            max_attempts,
            poll_interval,
        )
    }

    pub fn max_seconds_behind_master(&self) -> u64 {
        self.config.max_seconds_behind_master
    }

    /// Adjust the health threshold; takes effect on the next `is_healthy()`
    pub fn set_max_seconds_behind_master(&mut self, seconds: u64) {
        self.config.max_seconds_behind_master = seconds;
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn handle(&self) -> &H {
        self.cache.fetcher().handle()
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Number of status fetches that succeeded so far
    pub fn refresh_count(&self) -> u64 {
        self.cache.refresh_count()
    }
}

use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Replica connection
    #[serde(default)]
    pub backend: BackendConfig,
    /// Status presentation and health threshold
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Defaults for waiting on a freshly started replica
    #[serde(default)]
    pub wait: WaitConfig,
}

// ============================================================================
// Backend Configuration
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub database: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3306
}

fn default_user() -> String {
    "root".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: String::new(),
            database: None,
        }
    }
}

impl BackendConfig {
    /// Get the address string (host:port)
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ============================================================================
// Monitor Configuration
// ============================================================================

/// Replica monitor settings
///
/// Only `max_seconds_behind_master` is expected to change after the monitor
/// is built (see `ReplicaMonitor::set_max_seconds_behind_master`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonitorConfig {
    /// Hand out lower-cased field names from `status()`
    #[serde(default = "default_case_normalize")]
    pub case_normalize: bool,
    /// Largest replication lag still considered healthy
    #[serde(default = "default_max_seconds_behind_master")]
    pub max_seconds_behind_master: u64,
}

fn default_case_normalize() -> bool {
    true
}

fn default_max_seconds_behind_master() -> u64 {
    86400
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            case_normalize: default_case_normalize(),
            max_seconds_behind_master: default_max_seconds_behind_master(),
        }
    }
}

// ============================================================================
// Wait Configuration
// ============================================================================

/// Bounds for `wait_until_running`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WaitConfig {
    /// Maximum number of status refreshes
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause between refreshes (milliseconds)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_max_attempts() -> u32 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WaitConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

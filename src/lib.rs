//! Replication health monitoring for MySQL replicas

pub mod backend;
pub mod config;
pub mod replica;

pub use backend::{CommandError, CommandResult, DbHandle, HandleError, MysqlHandle, StatusRow};
pub use config::{load_config, Config, MonitorConfig, WaitConfig};
pub use replica::{FetchError, HealthFacts, ReplicaMonitor, StatusSnapshot};

use anyhow::Context;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use athena_replica::config::{self, Config};
use athena_replica::{MysqlHandle, ReplicaMonitor};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = load_or_default_config();

    let handle = MysqlHandle::connect(&config.backend)
        .with_context(|| format!("connecting to replica {}", config.backend.addr()))?;

    let mut monitor = ReplicaMonitor::with_config(handle, config.monitor.clone())
        .with_wait_config(config.wait.clone());

    let facts = monitor.facts().context("reading replica status")?;
    info!(
        addr = %config.backend.addr(),
        io_running = facts.io_running,
        sql_running = facts.sql_running,
        seconds_behind_master = ?facts.seconds_behind_master,
        io_state = ?facts.io_state,
        "Replica status"
    );
    if let Some(err) = &facts.last_io_error {
        warn!(error = %err, "Replica I/O thread error");
    }
    if let Some(err) = &facts.last_sql_error {
        warn!(error = %err, "Replica SQL thread error");
    }

    info!(
        running = monitor.is_running()?,
        stopped = monitor.is_stopped()?,
        healthy = monitor.is_healthy()?,
        max_seconds_behind_master = monitor.max_seconds_behind_master(),
        "Replica health"
    );

    Ok(())
}

fn load_or_default_config() -> Config {
    let config_paths = ["config/athena-replica.toml", "athena-replica.toml"];

    for path in config_paths {
        match config::load_config(path) {
            Ok(config) => {
                info!(path = path, "Loaded configuration");
                return config;
            }
            Err(e) => {
                warn!(path = path, error = %e, "Failed to load config");
            }
        }
    }

    info!("Using default configuration");
    Config::default()
}

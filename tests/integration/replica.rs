//! Replica monitor against a live MySQL replica

use std::time::Duration;

use athena_replica::backend::DbHandle;
use athena_replica::replica::STATUS_QUERY;
use athena_replica::{MonitorConfig, ReplicaMonitor};

use crate::{connect, restart_allowed, skip_if_not_enabled};

#[test]
fn test_status_row_is_returned() {
    skip_if_not_enabled!();

    let mut handle = connect();
    let row = handle
        .query_row(STATUS_QUERY)
        .expect("Status query failed")
        .expect("Server is not configured as a replica");

    assert!(row.contains_key("Slave_IO_Running"));
    assert!(row.contains_key("Slave_SQL_Running"));
    assert!(row.contains_key("Seconds_Behind_Master"));
}

#[test]
fn test_normalized_status_matches_raw() {
    skip_if_not_enabled!();

    let mut monitor = ReplicaMonitor::new(connect());
    let raw = monitor.status_with(false).unwrap().clone();
    let normalized = monitor.status_with(true).unwrap();

    assert_eq!(raw.len(), normalized.len());
    for key in raw.keys() {
        assert!(normalized.contains(&key.to_lowercase()), "missing {key}");
    }
    assert_eq!(monitor.refresh_count(), 1);
}

#[test]
fn test_health_signals_are_consistent() {
    skip_if_not_enabled!();

    let mut monitor = ReplicaMonitor::with_config(
        connect(),
        MonitorConfig {
            max_seconds_behind_master: 3600,
            ..MonitorConfig::default()
        },
    );

    let running = monitor.is_running().unwrap();
    let stopped = monitor.is_stopped().unwrap();
    let healthy = monitor.is_healthy().unwrap();

    assert!(!(running && stopped));
    assert!(!healthy || running);
    if healthy {
        assert!(monitor.facts().unwrap().seconds_behind_master.is_some());
    }
}

#[test]
fn test_stop_then_start_and_wait() {
    skip_if_not_enabled!();
    if !restart_allowed() {
        eprintln!("Skipping restart test (set ATHENA_TEST_ALLOW_RESTART=1 to run)");
        return;
    }

    let mut monitor = ReplicaMonitor::new(connect());

    monitor.stop().expect("STOP SLAVE failed");
    monitor.refresh().unwrap();
    assert!(monitor.is_stopped().unwrap());

    monitor.start().expect("START SLAVE failed");
    let running = monitor
        .wait_until_running_with(30, Duration::from_millis(500))
        .unwrap();
    assert!(running);
    assert!(!monitor.is_stopped().unwrap());
}

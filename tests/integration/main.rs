//! Integration test entry point
//!
//! Run with: ATHENA_RUN_INTEGRATION_TESTS=1 cargo test --test integration
//!
//! Environment variables:
//! - ATHENA_RUN_INTEGRATION_TESTS: Set to "1" to enable integration tests
//! - ATHENA_TEST_REPLICA_HOST: Replica host (default: 127.0.0.1)
//! - ATHENA_TEST_REPLICA_PORT: Replica port (default: 3306)
//! - ATHENA_TEST_REPLICA_USER: Replica user (default: root)
//! - ATHENA_TEST_REPLICA_PASS: Replica password (default: empty)
//! - ATHENA_TEST_ALLOW_RESTART: Set to "1" to allow STOP/START SLAVE on the replica

mod replica;

use std::env;

use athena_replica::config::BackendConfig;
use athena_replica::MysqlHandle;

/// Check if integration tests should run
pub fn should_run_integration_tests() -> bool {
    env_flag("ATHENA_RUN_INTEGRATION_TESTS")
}

/// Check if tests may stop and start replication
pub fn restart_allowed() -> bool {
    env_flag("ATHENA_TEST_ALLOW_RESTART")
}

fn env_flag(name: &str) -> bool {
    env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Skip test if integration tests are not enabled
#[macro_export]
macro_rules! skip_if_not_enabled {
    () => {
        if !crate::should_run_integration_tests() {
            eprintln!("Skipping integration test (set ATHENA_RUN_INTEGRATION_TESTS=1 to run)");
            return;
        }
    };
}

/// Get replica connection config from environment
pub fn get_replica_config() -> BackendConfig {
    BackendConfig {
        host: env::var("ATHENA_TEST_REPLICA_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        port: env::var("ATHENA_TEST_REPLICA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3306),
        user: env::var("ATHENA_TEST_REPLICA_USER").unwrap_or_else(|_| "root".to_string()),
        password: env::var("ATHENA_TEST_REPLICA_PASS").unwrap_or_default(),
        database: None,
    }
}

/// Open a handle to the test replica
pub fn connect() -> MysqlHandle {
    MysqlHandle::connect(&get_replica_config()).expect("Failed to connect to replica")
}

//! Database handle boundary
//!
//! The replica monitor never opens, pools, or reconnects connections. It is
//! handed something that can run one query and one command at a time:
//! - `query_row` for the status inspection statement
//! - `execute` for the start/stop replication statements
//!
//! `MysqlHandle` is the production implementation on top of the `mysql` crate.

mod connection;

use std::collections::BTreeMap;

pub use connection::MysqlHandle;

/// One result row, column name -> value (NULL is `None`)
pub type StatusRow = BTreeMap<String, Option<String>>;

/// Outcome of a command statement, handed back to callers untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Rows affected as reported by the server
    pub affected_rows: u64,
    /// Info string from the OK packet, if any
    pub info: Option<String>,
}

/// Error reported by a database handle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandleError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Server error {code}: {message}")]
    Server { code: u16, message: String },
    #[error("Query error: {0}")]
    Query(String),
}

/// Errors from start/stop commands are the handle's own errors
pub type CommandError = HandleError;

/// A connected handle to the target replica
///
/// Callers must not use the handle from another thread while a monitor
/// operation is in progress.
pub trait DbHandle {
    /// Run `sql` and return the first row, or `None` if the result set is empty
    fn query_row(&mut self, sql: &str) -> Result<Option<StatusRow>, HandleError>;

    /// Run a statement that returns no rows
    fn execute(&mut self, sql: &str) -> Result<CommandResult, HandleError>;
}

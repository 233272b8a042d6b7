use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Row, Value};
use tracing::{debug, error};

use crate::config::BackendConfig;

use super::{CommandResult, DbHandle, HandleError, StatusRow};

/// A single blocking MySQL connection to the replica
pub struct MysqlHandle {
    conn: Conn,
}

impl MysqlHandle {
    /// Connect to the configured backend
    pub fn connect(config: &BackendConfig) -> Result<Self, HandleError> {
        let addr = config.addr();
        debug!(addr = %addr, "Connecting to replica");

        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.as_str()))
            .tcp_port(config.port)
            .user(Some(config.user.as_str()))
            .pass(Some(config.password.as_str()))
            .db_name(config.database.as_deref());

        let conn = Conn::new(opts).map_err(|e| {
            error!(addr = %addr, error = %e, "Failed to connect to replica");
            HandleError::from(e)
        })?;

        debug!(addr = %addr, "Connected to replica");
        Ok(Self { conn })
    }

    /// Wrap an already established connection
    pub fn from_conn(conn: Conn) -> Self {
        Self { conn }
    }

    /// Give back the underlying connection
    pub fn into_inner(self) -> Conn {
        self.conn
    }
}

impl DbHandle for MysqlHandle {
    fn query_row(&mut self, sql: &str) -> Result<Option<StatusRow>, HandleError> {
        let row: Option<Row> = self.conn.query_first(sql)?;
        Ok(row.map(row_to_status))
    }

    fn execute(&mut self, sql: &str) -> Result<CommandResult, HandleError> {
        self.conn.query_drop(sql)?;

        let info = self.conn.info_str();
        Ok(CommandResult {
            affected_rows: self.conn.affected_rows(),
            info: if info.is_empty() {
                None
            } else {
                Some(info.into_owned())
            },
        })
    }
}

impl From<mysql::Error> for HandleError {
    fn from(err: mysql::Error) -> Self {
        match err {
            mysql::Error::MySqlError(e) => HandleError::Server {
                code: e.code,
                message: e.message,
            },
            mysql::Error::IoError(e) => HandleError::Connection(e.to_string()),
            other => HandleError::Query(other.to_string()),
        }
    }
}

/// Convert a result row into column name -> text value
fn row_to_status(row: Row) -> StatusRow {
    let names: Vec<String> = row
        .columns_ref()
        .iter()
        .map(|column| column.name_str().into_owned())
        .collect();

    names
        .into_iter()
        .zip(row.unwrap())
        .map(|(name, value)| (name, value_to_text(value)))
        .collect()
}

/// Text protocol rows arrive as bytes; anything else is rendered as its SQL literal
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        other => Some(other.as_sql(true)),
    }
}

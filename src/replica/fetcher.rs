use tracing::debug;

use crate::backend::{DbHandle, HandleError};

use super::snapshot::StatusSnapshot;

/// Statement used to inspect replication status
pub const STATUS_QUERY: &str = "SHOW SLAVE STATUS";

/// Error while fetching a status snapshot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Status query returned no row (is the server configured as a replica?)")]
    NoRow,
    #[error("Status query failed: {0}")]
    Handle(#[from] HandleError),
}

/// Runs the status query through the supplied handle
///
/// The handle must already be connected. Failures are returned as is;
/// nothing here retries.
pub struct StatusFetcher<H> {
    handle: H,
}

impl<H: DbHandle> StatusFetcher<H> {
    pub fn new(handle: H) -> Self {
        Self { handle }
    }

    /// Fetch one raw status snapshot
    pub fn fetch(&mut self) -> Result<StatusSnapshot, FetchError> {
        debug!(sql = STATUS_QUERY, "Fetching replica status");

        let row = self.handle.query_row(STATUS_QUERY)?.ok_or(FetchError::NoRow)?;

        debug!(fields = row.len(), "Replica status fetched");
        Ok(StatusSnapshot::new(row))
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}

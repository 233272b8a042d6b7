//! Scripted collaborators for unit tests

use std::collections::VecDeque;
use std::time::Duration;

use crate::backend::{CommandResult, DbHandle, HandleError, StatusRow};

use super::sleep::Sleeper;

pub(crate) type Response = Result<Option<StatusRow>, HandleError>;

/// Build a status row from literal pairs
pub(crate) fn row(fields: &[(&str, Option<&str>)]) -> StatusRow {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
        .collect()
}

/// Handle that replays queued responses and records every statement
///
/// The last queued response repeats once the queue is drained to it.
pub(crate) struct ScriptedHandle {
    responses: VecDeque<Response>,
    command_result: Result<CommandResult, HandleError>,
    queries: Vec<String>,
    commands: Vec<String>,
}

impl ScriptedHandle {
    pub(crate) fn new(responses: Vec<Response>) -> Self {
        Self {
            responses: responses.into(),
            command_result: Ok(CommandResult::default()),
            queries: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub(crate) fn with_command_result(mut self, result: Result<CommandResult, HandleError>) -> Self {
        self.command_result = result;
        self
    }

    pub(crate) fn queries(&self) -> &[String] {
        &self.queries
    }

    pub(crate) fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl DbHandle for ScriptedHandle {
    fn query_row(&mut self, sql: &str) -> Result<Option<StatusRow>, HandleError> {
        self.queries.push(sql.to_string());
        if self.responses.len() > 1 {
            return self.responses.pop_front().unwrap_or(Ok(None));
        }
        self.responses.front().cloned().unwrap_or(Ok(None))
    }

    fn execute(&mut self, sql: &str) -> Result<CommandResult, HandleError> {
        self.commands.push(sql.to_string());
        self.command_result.clone()
    }
}

/// Sleeper that only records requested pauses
#[derive(Debug, Default)]
pub(crate) struct RecordingSleeper {
    pub(crate) sleeps: Vec<Duration>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

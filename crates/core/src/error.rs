//! Error types for the core library

use std::fmt;

use thiserror::Error;

use crate::task::TaskId;

/// The store call that failed
///
/// Each operation carries one fixed, user-facing failure message. Remote
/// failures are never distinguished further than this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Create,
    Replace,
    PartialUpdate,
    Remove,
}

impl StoreOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch todos",
            Self::Create => "Failed to add todo",
            Self::Replace => "Failed to update todo",
            Self::PartialUpdate => "Failed to toggle todo",
            Self::Remove => "Failed to delete todo",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Replace => "replace",
            Self::PartialUpdate => "partial_update",
            Self::Remove => "remove",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// A remote store call failed (transport, non-2xx status or bad body)
    #[error("{}", .operation.failure_message())]
    Remote {
        operation: StoreOperation,
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a Remote error for a response outside the success range
    pub fn remote_status(operation: StoreOperation, status: u16) -> Self {
        Self::Remote {
            operation,
            status: Some(status),
            source: None,
        }
    }

    /// Create a Remote error from a transport or decode failure
    pub fn remote_transport(operation: StoreOperation, source: reqwest::Error) -> Self {
        Self::Remote {
            operation,
            status: None,
            source: Some(source),
        }
    }
}

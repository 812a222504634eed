// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the connection daemon.

use thiserror::Error;
use tf_core::TransportError;

/// Boxed error raised by a unit of work for reasons unrelated to the link.
pub type TaskError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned to callers of the daemon.
///
/// Transport failures only ever surface as [`DaemonError::Runtime`].
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("daemon is stopped\n  hint: start the daemon before talking to the device")]
    Stopped,

    #[error("device unreachable: {0}")]
    Runtime(String),

    #[error(transparent)]
    Task(TaskError),

    #[error("failed to start worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors a unit of work may return.
#[derive(Debug, Error)]
pub enum WorkError {
    /// Link-level failure; may trigger a reconnect and retry.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Any other failure; surfaced unchanged and never retried.
    #[error(transparent)]
    Task(TaskError),
}

impl WorkError {
    /// Wrap a non-transport error.
    pub fn task(err: impl Into<TaskError>) -> Self {
        WorkError::Task(err.into())
    }
}

/// A specialized Result type for daemon operations.
pub type Result<T> = std::result::Result<T, DaemonError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

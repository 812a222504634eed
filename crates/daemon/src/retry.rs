// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry-with-reconnect.
//!
//! Each attempt reports a typed outcome. Only [`Attempt::Retryable`] leads
//! to a reconnect, and at most `retry` reconnects happen, so a command runs
//! at most `retry + 1` times.

use tf_core::TransportError;

use crate::error::{DaemonError, Result};

/// Why an attempt may be worth repeating after a reconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Retry {
    /// No live link was available.
    NotConnected,
    /// The link failed while the unit of work ran.
    Transport(TransportError),
}

impl std::fmt::Display for Retry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Retry::NotConnected => write!(f, "not connected"),
            Retry::Transport(e) => write!(f, "{}", e),
        }
    }
}

/// Outcome of one attempt.
#[derive(Debug)]
pub(crate) enum Attempt<R> {
    Success(R),
    Retryable(Retry),
    Fatal(DaemonError),
}

/// Drive `attempt` until it succeeds, fails fatally, or the budget runs out.
///
/// `reconnect` runs between attempts. It returns `Ok(false)` when there was
/// nothing to reconnect to; a failed reconnect still consumes the attempt.
/// `DaemonError::Stopped` from either closure ends the loop at once.
pub(crate) fn run_with_retry<R>(
    retry: u32,
    mut attempt: impl FnMut() -> Attempt<R>,
    mut reconnect: impl FnMut() -> Result<bool>,
) -> Result<R> {
    let mut remaining = retry;
    let mut reconnect_error: Option<DaemonError> = None;

    loop {
        let reason = match attempt() {
            Attempt::Success(value) => return Ok(value),
            Attempt::Fatal(err) => return Err(err),
            Attempt::Retryable(reason) => reason,
        };

        if remaining == 0 {
            return Err(match (reason, reconnect_error) {
                (Retry::NotConnected, Some(err)) => err,
                (reason, _) => DaemonError::Runtime(reason.to_string()),
            });
        }
        remaining -= 1;

        tracing::warn!(%reason, remaining, "device command failed, reconnecting");
        reconnect_error = match reconnect() {
            Ok(true) => None,
            Ok(false) => {
                tracing::debug!("no target to reconnect to");
                None
            }
            Err(DaemonError::Stopped) => return Err(DaemonError::Stopped),
            Err(err) => {
                tracing::warn!(error = %err, "reconnect failed");
                Some(err)
            }
        };
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;

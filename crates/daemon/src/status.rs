// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon status as reported to the web layer.

use serde::Serialize;

/// What the daemon is currently doing.
///
/// `Connected` means a target is recorded; it does not prove the link is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DaemonStatus {
    Stopped,
    Disconnected,
    Connected { address: String },
}

impl DaemonStatus {
    /// Serialize for a JSON response.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn is_running(&self) -> bool {
        !matches!(self, DaemonStatus::Stopped)
    }
}

impl std::fmt::Display for DaemonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaemonStatus::Stopped => write!(f, "stopped"),
            DaemonStatus::Disconnected => write!(f, "disconnected"),
            DaemonStatus::Connected { address } => write!(f, "connected to {}", address),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

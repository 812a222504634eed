// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tf-core operations.

use thiserror::Error;

/// All possible errors that can occur in tf-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid device address: '{0}'\n  hint: expected six hex octets, e.g. AA:BB:CC:DD:EE:FF")]
    InvalidAddress(String),

    #[error("invalid device password\n  hint: the password must be exactly 6 characters long")]
    InvalidCredential,

    #[error("config not found: {0}")]
    ConfigNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("config write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

/// A specialized Result type for tf-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

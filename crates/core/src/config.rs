// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration file management.
//!
//! Configuration is stored as TOML and includes:
//! - `[device]`: address and password of the TimeFlip to track
//! - `[daemon]`: tuning for the connection daemon
//!
//! Every key is optional. An empty address means no device is configured.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::target::{is_valid_address, is_valid_credential, ConnectionTarget, DEFAULT_CREDENTIAL};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// The device to connect to at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// MAC address of the device (empty = none configured).
    #[serde(default)]
    pub address: String,
    /// Device password (default: "000000").
    #[serde(default = "default_password")]
    pub password: String,
}

/// Connection daemon settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Reconnect-and-retry budget for a command (default: 1).
    #[serde(default = "default_retry")]
    pub retry: u32,
}

fn default_password() -> String {
    DEFAULT_CREDENTIAL.to_string()
}

fn default_retry() -> u32 {
    1
}

impl Default for DeviceConfig {
    fn default() -> Self {
        DeviceConfig {
            address: String::new(),
            password: default_password(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            retry: default_retry(),
        }
    }
}

impl DeviceConfig {
    /// The configured target, if an address is set.
    pub fn target(&self) -> Option<ConnectionTarget> {
        if self.address.is_empty() {
            None
        } else {
            Some(ConnectionTarget::new(&self.address, &self.password))
        }
    }
}

impl Config {
    /// Load and validate the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if the file does not exist, or a
    /// parse/validation error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check the device section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] for a malformed non-empty address and
    /// [`Error::InvalidCredential`] for a password of the wrong length.
    pub fn validate(&self) -> Result<()> {
        let device = &self.device;
        if !device.address.is_empty() && !is_valid_address(&device.address) {
            return Err(Error::InvalidAddress(device.address.clone()));
        }
        if !is_valid_credential(&device.password) {
            return Err(Error::InvalidCredential);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

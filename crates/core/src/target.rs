// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The device a daemon intends to be connected to.
//!
//! A target is recorded independently of any live link: the daemon may hold
//! a target for hours without ever opening a connection to it.

use crate::error::{Error, Result};

/// Password shipped on factory-reset TimeFlip devices.
pub const DEFAULT_CREDENTIAL: &str = "000000";

/// Length of a TimeFlip password.
const CREDENTIAL_LEN: usize = 6;

/// Device address and credential of the intended connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    address: String,
    credential: String,
}

impl ConnectionTarget {
    /// Create a target. Neither field is validated here.
    pub fn new(address: impl Into<String>, credential: impl Into<String>) -> Self {
        ConnectionTarget {
            address: address.into(),
            credential: credential.into(),
        }
    }

    /// Create a target after validating both fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] or [`Error::InvalidCredential`].
    pub fn validated(address: &str, credential: &str) -> Result<Self> {
        if !is_valid_address(address) {
            return Err(Error::InvalidAddress(address.to_string()));
        }
        if !is_valid_credential(credential) {
            return Err(Error::InvalidCredential);
        }
        Ok(Self::new(address, credential))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// True if a connection can be attempted: both fields are non-empty.
    pub fn is_connectable(&self) -> bool {
        !self.address.is_empty() && !self.credential.is_empty()
    }

    /// Compare the recorded address with `address`, ignoring hex case.
    pub fn matches(&self, address: &str) -> bool {
        self.address.eq_ignore_ascii_case(address)
    }
}

impl std::fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("address", &self.address)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Check that `address` is a MAC address: six colon-separated hex values,
/// each below 256. Single-digit octets (`A:B:C:D:E:F`) are accepted.
pub fn is_valid_address(address: &str) -> bool {
    let octets: Vec<&str> = address.split(':').collect();
    octets.len() == 6 && octets.iter().all(|o| is_octet(o))
}

fn is_octet(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_hexdigit()) && u8::from_str_radix(text, 16).is_ok()
}

/// Check that `credential` has the length the device expects.
pub fn is_valid_credential(credential: &str) -> bool {
    credential.chars().count() == CREDENTIAL_LEN
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;

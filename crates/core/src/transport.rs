// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the Bluetooth-LE link to one device.
//!
//! The GATT codec lives outside this workspace. These traits describe what
//! the daemon needs from it:
//! - A factory that opens a link to an address
//! - A handle that authenticates, reads, writes and disconnects
//!
//! Mock implementations stand in for the real link in tests.

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by transport operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Link dropped while an operation was in flight.
    #[error("connection lost")]
    ConnectionLost,

    /// Operation attempted on a handle with no live link.
    #[error("not connected")]
    NotConnected,

    /// The operation did not complete within the transport's own timeout.
    #[error("operation timed out")]
    Timeout,

    /// The device rejected the credential.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The device answered with something the codec could not interpret.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl TransportError {
    /// True for failures a fresh connection may fix.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::ConnectionFailed(_)
                | TransportError::ConnectionLost
                | TransportError::NotConnected
                | TransportError::Timeout
        )
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Outcome of a disconnect that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disconnect {
    /// The link was open and is now closed.
    Done,
    /// The device had already dropped the link.
    AlreadyDisconnected,
}

/// GATT characteristics exposed by a TimeFlip device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    BatteryLevel,
    DeviceName,
    FirmwareRevision,
    Event,
    Facet,
    CommandResult,
    Command,
    Calibration,
    Password,
    History,
}

impl Characteristic {
    /// The characteristic's UUID.
    pub fn uuid(self) -> &'static str {
        match self {
            Characteristic::BatteryLevel => "00002a19-0000-1000-8000-00805f9b34fb",
            Characteristic::DeviceName => "00002a00-0000-1000-8000-00805f9b34fb",
            Characteristic::FirmwareRevision => "00002a26-0000-1000-8000-00805f9b34fb",
            Characteristic::Event => "f1196f51-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::Facet => "f1196f52-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::CommandResult => "f1196f53-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::Command => "f1196f54-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::Calibration => "f1196f56-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::Password => "f1196f57-71a4-11e6-bdf4-0800200c9a66",
            Characteristic::History => "f1196f58-71a4-11e6-bdf4-0800200c9a66",
        }
    }
}

/// A live link to one device.
///
/// A handle is never used by two operations at once; the daemon runs every
/// call on a single worker.
pub trait Transport: Send {
    /// Log in with the device password.
    fn authenticate<'a>(&'a mut self, credential: &'a str) -> BoxFuture<'a, TransportResult<()>>;

    /// Close the link.
    ///
    /// Returns [`Disconnect::AlreadyDisconnected`] rather than an error when
    /// the device dropped the link first.
    fn disconnect(&mut self) -> BoxFuture<'_, TransportResult<Disconnect>>;

    /// Read a characteristic.
    fn read(&mut self, characteristic: Characteristic) -> BoxFuture<'_, TransportResult<Vec<u8>>>;

    /// Write a characteristic.
    fn write<'a>(
        &'a mut self,
        characteristic: Characteristic,
        data: &'a [u8],
    ) -> BoxFuture<'a, TransportResult<()>>;
}

/// Opens links to devices.
pub trait TransportFactory: Send + Sync + 'static {
    /// The handle type produced by a successful connect.
    type Transport: Transport + 'static;

    /// Connect to the device at `address`.
    fn connect<'a>(&'a self, address: &'a str) -> BoxFuture<'a, TransportResult<Self::Transport>>;
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    connection_failed = { TransportError::ConnectionFailed("adapter off".into()), true },
    connection_lost = { TransportError::ConnectionLost, true },
    not_connected = { TransportError::NotConnected, true },
    timeout = { TransportError::Timeout, true },
    authentication_failed = { TransportError::AuthenticationFailed, false },
    protocol = { TransportError::Protocol("short read".into()), false },
)]
fn retryable_errors(err: TransportError, retryable: bool) {
    assert_eq!(err.is_retryable(), retryable);
}

#[test]
fn error_display() {
    assert_eq!(
        TransportError::ConnectionFailed("adapter off".into()).to_string(),
        "connection failed: adapter off"
    );
    assert_eq!(TransportError::Timeout.to_string(), "operation timed out");
}

#[test]
fn characteristic_uuids_are_distinct() {
    let all = [
        Characteristic::BatteryLevel,
        Characteristic::DeviceName,
        Characteristic::FirmwareRevision,
        Characteristic::Event,
        Characteristic::Facet,
        Characteristic::CommandResult,
        Characteristic::Command,
        Characteristic::Calibration,
        Characteristic::Password,
        Characteristic::History,
    ];
    let uuids: std::collections::HashSet<&str> = all.iter().map(|c| c.uuid()).collect();
    assert_eq!(uuids.len(), all.len());
}

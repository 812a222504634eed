// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Device status reads built on the transport primitives.

use serde::Serialize;

use crate::transport::{Characteristic, Transport, TransportError, TransportResult};

/// Snapshot of a device's state, as shown on the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Advertised device name.
    pub name: String,
    /// Face currently pointing up.
    pub facet: u8,
    /// Battery level in percent.
    pub battery: u8,
    /// Time tracking is paused.
    pub paused: bool,
    /// Facet changes are ignored.
    pub locked: bool,
}

/// Pause and lock flags reported by the status command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceFlags {
    pub paused: bool,
    pub locked: bool,
}

/// Command byte asking the device for its status.
const STATUS_REQUEST: u8 = 0x10;

/// Read the battery level in percent.
pub async fn read_battery<T: Transport>(transport: &mut T) -> TransportResult<u8> {
    let data = transport.read(Characteristic::BatteryLevel).await?;
    single_byte(Characteristic::BatteryLevel, &data).map(|level| level.min(100))
}

/// Ask the device for its pause and lock flags.
///
/// The answer lands in the command result characteristic: lock flag first,
/// then pause flag. Trailing bytes are ignored.
pub async fn read_flags<T: Transport>(transport: &mut T) -> TransportResult<DeviceFlags> {
    transport
        .write(Characteristic::Command, &[STATUS_REQUEST])
        .await?;
    let data = transport.read(Characteristic::CommandResult).await?;
    match data.as_slice() {
        [locked, paused, ..] => Ok(DeviceFlags {
            paused: *paused == 1,
            locked: *locked == 1,
        }),
        _ => Err(TransportError::Protocol(format!(
            "expected at least 2 bytes of status, got {}",
            data.len()
        ))),
    }
}

/// Read name, facet, battery level and flags, in that order.
pub async fn read_device_info<T: Transport>(transport: &mut T) -> TransportResult<DeviceInfo> {
    let name = transport.read(Characteristic::DeviceName).await?;
    let name = String::from_utf8(name)
        .map_err(|_| TransportError::Protocol("device name is not valid UTF-8".to_string()))?;

    let facet = transport.read(Characteristic::Facet).await?;
    let facet = single_byte(Characteristic::Facet, &facet)?;

    let battery = read_battery(transport).await?;
    let flags = read_flags(transport).await?;

    Ok(DeviceInfo {
        name: name.trim_end_matches('\0').to_string(),
        facet,
        battery,
        paused: flags.paused,
        locked: flags.locked,
    })
}

fn single_byte(characteristic: Characteristic, data: &[u8]) -> TransportResult<u8> {
    match data {
        [value] => Ok(*value),
        _ => Err(TransportError::Protocol(format!(
            "expected 1 byte from {:?}, got {}",
            characteristic,
            data.len()
        ))),
    }
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;

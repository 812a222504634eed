// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tf-core: Shared library for the TimeFlip time tracker
//!
//! This crate provides the device target, the transport interface consumed
//! from the Bluetooth layer, device status reads, and configuration used by
//! the tf-daemon connection daemon.

pub mod config;
pub mod device;
pub mod error;
pub mod target;
pub mod transport;

pub use config::{Config, DaemonConfig, DeviceConfig};
pub use device::{read_battery, read_device_info, read_flags, DeviceFlags, DeviceInfo};
pub use error::{Error, Result};
pub use target::{is_valid_address, is_valid_credential, ConnectionTarget, DEFAULT_CREDENTIAL};
pub use transport::{
    BoxFuture, Characteristic, Disconnect, Transport, TransportError, TransportFactory,
    TransportResult,
};

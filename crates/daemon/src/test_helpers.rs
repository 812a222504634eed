// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a counting mock device.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tf_core::{
    read_battery, BoxFuture, Characteristic, Disconnect, Transport, TransportError,
    TransportFactory, TransportResult,
};

use crate::WorkError;

/// Observable state of the simulated device, shared by factory and handles.
#[derive(Default)]
pub struct MockDevice {
    pub connects: AtomicU32,
    pub auths: AtomicU32,
    pub disconnects: AtomicU32,
    pub operations: AtomicU32,
    pub max_in_flight: AtomicU32,
    in_flight: AtomicU32,
    /// Number of upcoming connects that fail.
    pub fail_connects: AtomicU32,
    /// Number of upcoming reads that fail.
    pub fail_operations: AtomicU32,
    /// Error returned by failing reads; `ConnectionLost` when unset.
    pub failure: Mutex<Option<TransportError>>,
    pub always_fail: AtomicBool,
    pub reject_credential: AtomicBool,
    pub already_disconnected: AtomicBool,
    pub disconnect_error: Mutex<Option<TransportError>>,
    pub battery: AtomicU8,
    pub last_address: Mutex<Option<String>>,
}

impl MockDevice {
    pub fn count(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

fn consume(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

/// Factory handing out [`MockTransport`]s bound to one [`MockDevice`].
pub struct MockFactory {
    device: Arc<MockDevice>,
}

impl MockFactory {
    pub fn new() -> (Self, Arc<MockDevice>) {
        let device = Arc::new(MockDevice::default());
        device.battery.store(87, Ordering::SeqCst);
        (
            MockFactory {
                device: Arc::clone(&device),
            },
            device,
        )
    }
}

impl TransportFactory for MockFactory {
    type Transport = MockTransport;

    fn connect<'a>(&'a self, address: &'a str) -> BoxFuture<'a, TransportResult<MockTransport>> {
        Box::pin(async move {
            self.device.connects.fetch_add(1, Ordering::SeqCst);
            if consume(&self.device.fail_connects) {
                return Err(TransportError::ConnectionFailed("out of range".into()));
            }
            *self.device.last_address.lock().unwrap() = Some(address.to_string());
            Ok(MockTransport {
                device: Arc::clone(&self.device),
            })
        })
    }
}

/// Mock link for testing without a Bluetooth adapter.
pub struct MockTransport {
    device: Arc<MockDevice>,
}

impl Transport for MockTransport {
    fn authenticate<'a>(&'a mut self, _credential: &'a str) -> BoxFuture<'a, TransportResult<()>> {
        Box::pin(async move {
            self.device.auths.fetch_add(1, Ordering::SeqCst);
            if self.device.reject_credential.load(Ordering::SeqCst) {
                return Err(TransportError::AuthenticationFailed);
            }
            Ok(())
        })
    }

    fn disconnect(&mut self) -> BoxFuture<'_, TransportResult<Disconnect>> {
        Box::pin(async move {
            self.device.disconnects.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.device.disconnect_error.lock().unwrap().clone() {
                return Err(err);
            }
            if self.device.already_disconnected.load(Ordering::SeqCst) {
                return Ok(Disconnect::AlreadyDisconnected);
            }
            Ok(Disconnect::Done)
        })
    }

    fn read(&mut self, characteristic: Characteristic) -> BoxFuture<'_, TransportResult<Vec<u8>>> {
        Box::pin(async move {
            let device = &self.device;
            device.operations.fetch_add(1, Ordering::SeqCst);
            let now = device.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            device.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(1)).await;
            device.in_flight.fetch_sub(1, Ordering::SeqCst);

            if device.always_fail.load(Ordering::SeqCst) || consume(&device.fail_operations) {
                let failure = device.failure.lock().unwrap().clone();
                return Err(failure.unwrap_or(TransportError::ConnectionLost));
            }
            match characteristic {
                Characteristic::BatteryLevel => Ok(vec![device.battery.load(Ordering::SeqCst)]),
                Characteristic::DeviceName => Ok(b"TimeFlip".to_vec()),
                Characteristic::Facet => Ok(vec![2]),
                // Unlocked, paused.
                Characteristic::CommandResult => Ok(vec![0, 1]),
                _ => Ok(vec![0]),
            }
        })
    }

    fn write<'a>(
        &'a mut self,
        _characteristic: Characteristic,
        _data: &'a [u8],
    ) -> BoxFuture<'a, TransportResult<()>> {
        Box::pin(async move {
            self.device.operations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}

/// Unit of work reading the battery level.
pub fn battery(transport: &mut MockTransport) -> BoxFuture<'_, Result<u8, WorkError>> {
    Box::pin(async move { Ok(read_battery(transport).await?) })
}

/// Install a test subscriber; honours `RUST_LOG`.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The connection daemon.
//!
//! Owns the one live link to a TimeFlip device and the target it should be
//! connected to. Request handlers share a [`Daemon`] by reference and submit
//! units of work through [`Daemon::run`]; the daemon serializes them on its
//! worker, reconnecting when the link has dropped.
//!
//! Every method blocks the calling thread and must not be called from
//! inside an async context.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tf_core::{
    BoxFuture, ConnectionTarget, DaemonConfig, Disconnect, Transport, TransportError,
    TransportFactory,
};

use crate::error::{DaemonError, Result, WorkError};
use crate::retry::{run_with_retry, Attempt, Retry};
use crate::status::DaemonStatus;
use crate::worker::{Worker, WorkerGone};

/// Connection state guarded by the daemon's lock.
///
/// `transport` is only ever `Some` while `worker` is `Some` and `target` is
/// set.
struct State<T> {
    worker: Option<Worker>,
    target: Option<ConnectionTarget>,
    transport: Option<T>,
}

/// Single-device connection daemon.
pub struct Daemon<F: TransportFactory> {
    factory: Arc<F>,
    config: DaemonConfig,
    state: Mutex<State<F::Transport>>,
}

impl<F: TransportFactory> Daemon<F> {
    /// Create a stopped daemon with default settings.
    pub fn new(factory: F) -> Self {
        Self::with_config(factory, DaemonConfig::default())
    }

    /// Create a stopped daemon.
    pub fn with_config(factory: F, config: DaemonConfig) -> Self {
        Daemon {
            factory: Arc::new(factory),
            config,
            state: Mutex::new(State {
                worker: None,
                target: None,
                transport: None,
            }),
        }
    }

    /// Spawn the worker. Does nothing if already running.
    ///
    /// No connection is attempted.
    pub fn start(&self) -> Result<()> {
        let mut state = self.lock();
        if state.worker.is_some() {
            tracing::debug!("daemon already running");
            return Ok(());
        }
        state.worker = Some(Worker::spawn()?);
        tracing::info!("daemon started");
        Ok(())
    }

    /// Log out, then shut down and join the worker.
    ///
    /// Does nothing if not running. Once this returns no unit of work runs.
    pub fn stop(&self) {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(worker) = state.worker.take() else {
            return;
        };

        state.target = None;
        if let Some(transport) = state.transport.take() {
            if let Err(e) = disconnect(&worker, transport) {
                tracing::warn!(error = %e, "disconnect failed during stop");
            }
        }

        worker.shutdown();
        tracing::info!("daemon stopped");
    }

    /// Current lifecycle and target.
    pub fn status(&self) -> DaemonStatus {
        let state = self.lock();
        match (&state.worker, &state.target) {
            (None, _) => DaemonStatus::Stopped,
            (Some(_), None) => DaemonStatus::Disconnected,
            (Some(_), Some(target)) => DaemonStatus::Connected {
                address: target.address().to_string(),
            },
        }
    }

    /// Record the target without connecting.
    ///
    /// A live link to a different target is closed. An empty address clears
    /// the target.
    pub fn soft_connect(&self, address: &str, credential: &str) -> Result<()> {
        let mut guard = self.lock();
        Self::set_target(&mut guard, ConnectionTarget::new(address, credential))
    }

    /// Record the target and connect to it now.
    ///
    /// Returns `false` if the address or credential is empty, so no
    /// connection was attempted.
    pub fn hard_connect(&self, address: &str, credential: &str) -> Result<bool> {
        let mut guard = self.lock();
        Self::set_target(&mut guard, ConnectionTarget::new(address, credential))?;
        self.connect_locked(&mut guard)
    }

    /// Whether the recorded target is `address`.
    pub fn connected_to(&self, address: &str) -> Result<bool> {
        let state = self.lock();
        if state.worker.is_none() {
            return Err(DaemonError::Stopped);
        }
        Ok(state
            .target
            .as_ref()
            .is_some_and(|target| target.matches(address)))
    }

    /// Clear the target and close the link, if any.
    ///
    /// A device that already dropped the link is not an error. The handle is
    /// discarded even when the disconnect fails.
    pub fn hard_logout(&self) -> Result<()> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(worker) = state.worker.as_ref() else {
            return Err(DaemonError::Stopped);
        };

        if let Some(target) = state.target.take() {
            tracing::info!(address = target.address(), "logging out of device");
        }
        match state.transport.take() {
            Some(transport) => disconnect(worker, transport),
            None => Ok(()),
        }
    }

    /// Run `work` against the live link with the configured retry budget.
    pub fn run_default<R, W>(&self, work: W) -> Result<R>
    where
        R: Send + 'static,
        W: for<'a> Fn(&'a mut F::Transport) -> BoxFuture<'a, std::result::Result<R, WorkError>>
            + Send
            + Sync
            + 'static,
    {
        self.run(work, self.config.retry)
    }

    /// Run `work` against the live link and block until it finishes.
    ///
    /// When the link is missing or fails, the daemon reconnects to the last
    /// target and tries again, up to `retry` times. Errors from `work` that
    /// are not transport errors are returned unchanged without retrying.
    pub fn run<R, W>(&self, work: W, retry: u32) -> Result<R>
    where
        R: Send + 'static,
        W: for<'a> Fn(&'a mut F::Transport) -> BoxFuture<'a, std::result::Result<R, WorkError>>
            + Send
            + Sync
            + 'static,
    {
        let work = Arc::new(work);
        run_with_retry(
            retry,
            || self.attempt(&work),
            || {
                let mut guard = self.lock();
                self.connect_locked(&mut guard)
            },
        )
    }

    /// One locked check + dispatch + wait.
    fn attempt<R, W>(&self, work: &Arc<W>) -> Attempt<R>
    where
        R: Send + 'static,
        W: for<'a> Fn(&'a mut F::Transport) -> BoxFuture<'a, std::result::Result<R, WorkError>>
            + Send
            + Sync
            + 'static,
    {
        let mut guard = self.lock();
        let state = &mut *guard;
        let Some(worker) = state.worker.as_ref() else {
            return Attempt::Fatal(DaemonError::Stopped);
        };
        let Some(mut transport) = state.transport.take() else {
            return Attempt::Retryable(Retry::NotConnected);
        };

        let work = Arc::clone(work);
        let outcome = worker.execute(Box::pin(async move {
            let result = work(&mut transport).await;
            (transport, result)
        }));

        match outcome {
            Err(WorkerGone) => Attempt::Fatal(worker_gone()),
            Ok((transport, Ok(value))) => {
                state.transport = Some(transport);
                Attempt::Success(value)
            }
            Ok((transport, Err(WorkError::Transport(e)))) if e.is_retryable() => {
                tracing::debug!(error = %e, "closing failed link");
                if let Err(close_err) = disconnect(worker, transport) {
                    tracing::debug!(error = %close_err, "failed link did not close cleanly");
                }
                Attempt::Retryable(Retry::Transport(e))
            }
            Ok((transport, Err(WorkError::Transport(e)))) => {
                state.transport = Some(transport);
                Attempt::Fatal(DaemonError::Runtime(e.to_string()))
            }
            Ok((transport, Err(WorkError::Task(e)))) => {
                state.transport = Some(transport);
                Attempt::Fatal(DaemonError::Task(e))
            }
        }
    }

    /// Replace the target, closing a link that belongs to another one.
    fn set_target(state: &mut State<F::Transport>, target: ConnectionTarget) -> Result<()> {
        let Some(worker) = state.worker.as_ref() else {
            return Err(DaemonError::Stopped);
        };
        let target = Some(target).filter(|t| !t.address().is_empty());

        if state.target != target {
            if let Some(transport) = state.transport.take() {
                if let Err(e) = disconnect(worker, transport) {
                    tracing::warn!(error = %e, "failed to close link to previous target");
                }
            }
        }
        match &target {
            Some(t) => tracing::debug!(address = t.address(), "target recorded"),
            None => tracing::debug!("target cleared"),
        }
        state.target = target;
        Ok(())
    }

    /// Open and authenticate a fresh link to the recorded target.
    ///
    /// Returns `Ok(false)` without touching the transport when no usable
    /// target is recorded.
    fn connect_locked(&self, state: &mut State<F::Transport>) -> Result<bool> {
        let Some(worker) = state.worker.as_ref() else {
            return Err(DaemonError::Stopped);
        };
        let Some(target) = state.target.clone().filter(ConnectionTarget::is_connectable) else {
            return Ok(false);
        };

        if let Some(transport) = state.transport.take() {
            if let Err(e) = disconnect(worker, transport) {
                tracing::debug!(error = %e, "stale link did not close cleanly");
            }
        }

        tracing::info!(address = target.address(), "connecting to device");
        let factory = Arc::clone(&self.factory);
        let outcome = worker.execute(Box::pin(async move {
            let mut transport = factory.connect(target.address()).await?;
            if let Err(e) = transport.authenticate(target.credential()).await {
                let _ = transport.disconnect().await;
                return Err(e);
            }
            Ok(transport)
        }));

        match outcome {
            Ok(Ok(transport)) => {
                state.transport = Some(transport);
                tracing::info!("device connected");
                Ok(true)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "device connection failed");
                Err(DaemonError::Runtime(e.to_string()))
            }
            Err(WorkerGone) => Err(worker_gone()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<F::Transport>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: TransportFactory> Drop for Daemon<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Best-effort disconnect on the worker.
///
/// Only the "already disconnected" condition is swallowed.
fn disconnect<T: Transport + 'static>(worker: &Worker, transport: T) -> Result<()> {
    let outcome = worker.execute(Box::pin(async move {
        let mut transport = transport;
        transport.disconnect().await
    }));

    match outcome {
        Ok(Ok(Disconnect::Done)) => {
            tracing::debug!("device disconnected");
            Ok(())
        }
        Ok(Ok(Disconnect::AlreadyDisconnected)) | Ok(Err(TransportError::NotConnected)) => {
            tracing::debug!("device was already disconnected");
            Ok(())
        }
        Ok(Err(e)) => Err(DaemonError::Runtime(e.to_string())),
        Err(WorkerGone) => Err(worker_gone()),
    }
}

fn worker_gone() -> DaemonError {
    DaemonError::Runtime("worker stopped unexpectedly".to_string())
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;

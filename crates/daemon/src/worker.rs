// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight background worker.
//!
//! One dedicated thread runs a current-thread tokio runtime and executes
//! jobs from a channel one at a time. Callers block until their job has
//! finished. Every device call goes through here.

use std::thread::JoinHandle;

use tf_core::BoxFuture;
use tokio::sync::{mpsc, oneshot};

/// Queued unit of work; it reports its own result.
type Job = BoxFuture<'static, ()>;

/// The worker thread exited before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorkerGone;

/// Handle to the worker thread.
pub(crate) struct Worker {
    tx: mpsc::UnboundedSender<Job>,
    thread: JoinHandle<()>,
}

impl Worker {
    /// Spawn the worker thread and its runtime.
    pub(crate) fn spawn() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();

        let thread = std::thread::Builder::new()
            .name("tf-daemon-worker".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = rx.recv().await {
                        // Awaited before the next recv: never two jobs at once.
                        job.await;
                    }
                });
                tracing::debug!("worker loop finished");
            })?;

        Ok(Worker { tx, thread })
    }

    /// Run `fut` on the worker and block the calling thread until it completes.
    ///
    /// A panic inside `fut` is resumed on the calling thread. Must not be
    /// called from inside an async context.
    pub(crate) fn execute<R>(&self, fut: BoxFuture<'static, R>) -> Result<R, WorkerGone>
    where
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let outcome = tokio::spawn(fut).await;
            let _ = reply_tx.send(outcome);
        });
        self.tx.send(job).map_err(|_| WorkerGone)?;

        match reply_rx.blocking_recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join_err)) if join_err.is_panic() => {
                std::panic::resume_unwind(join_err.into_panic())
            }
            Ok(Err(_)) | Err(_) => Err(WorkerGone),
        }
    }

    /// Close the queue and join the thread.
    ///
    /// Jobs already queued still run; nothing runs after this returns.
    pub(crate) fn shutdown(self) {
        let Worker { tx, thread } = self;
        drop(tx);
        if thread.join().is_err() {
            tracing::error!("worker thread panicked during shutdown");
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;

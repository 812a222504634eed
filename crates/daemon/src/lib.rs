// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tf-daemon: Connection daemon for one TimeFlip device.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Handlers   │────►│   Daemon    │────►│   Worker    │
//! │ (many thr.) │◄────│ (one lock)  │◄────│ (one thread)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │  Transport  │
//!                                         │   (trait)   │
//!                                         └─────────────┘
//! ```
//!
//! # Features
//!
//! - Explicit start/stop lifecycle; stop joins the worker
//! - Soft connect (record target) and hard connect (record and connect)
//! - Single-flight command execution with bounded reconnect-and-retry
//! - Injectable transport factory for testing

mod daemon;
mod error;
mod retry;
mod status;
mod worker;

pub use daemon::Daemon;
pub use error::{DaemonError, Result, TaskError, WorkError};
pub use status::DaemonStatus;

#[cfg(test)]
mod test_helpers;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiler daemon client and lifecycle management.
//!
//! The CLI talks to the daemon over HTTP on a loopback port, starting it on
//! demand when a project upsert finds nothing listening.

mod bootstrap;
mod client;
mod lifecycle;
mod process;
mod tail;
mod transport;

#[cfg(test)]
mod test_helpers;

pub use bootstrap::{ensure_bootstrap, render_bootstrap, DaemonLayout, BOOTSTRAP_TEMPLATE};
pub use client::{DaemonClient, LogSink};
pub use lifecycle::{
    wait_until_ready, DaemonSession, LaunchState, PollPolicy, Sleeper, ThreadSleeper,
};
pub use process::{CommandLine, ProcessHandle, ProcessSpawner, SystemSpawner};
pub use tail::LogTailer;
pub use transport::{HttpTransport, Transport, TransportError, TransportResult};

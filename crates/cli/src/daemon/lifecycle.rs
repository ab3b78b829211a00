// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: launch settings, spawn, readiness polling.
//!
//! The daemon is started only after a connection was refused. Startup is a
//! small state machine:
//!
//! ```text
//! NotStarted -> Spawning -> Polling -> Ready
//!                   |           |
//!                   +-> Failed <+
//! ```
//!
//! Polling sends `ping` requests at a fixed interval for a bounded number of
//! attempts. A refused connection means "not up yet"; any other transport
//! error, or the process exiting, fails the startup at once. Readiness is
//! decided by a successful ping alone; the daemon's startup log is only
//! surfaced for visibility.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kiln_core::ArtifactCoordinates;
use kiln_ipc::{Endpoint, Request};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

use super::bootstrap::DaemonLayout;
use super::process::{CommandLine, ProcessHandle};
use super::tail::LogTailer;
use super::transport::Transport;

/// Where the client is in bringing up the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    /// The client has not had to start the daemon.
    NotStarted,
    /// Writing the bootstrap config and starting the process.
    Spawning,
    /// Waiting for the daemon to answer a ping.
    Polling,
    /// The daemon answered.
    Ready,
    /// The daemon could not be started or never answered.
    Failed,
}

/// Bounded retry settings for the readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        PollPolicy {
            attempts: 60,
            interval: Duration::from_secs(1),
        }
    }
}

/// Waits between polls. Injected so tests never sleep.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Everything needed to start one daemon version.
#[derive(Debug, Clone)]
pub struct DaemonSession {
    pub endpoint: Endpoint,
    pub coordinates: ArtifactCoordinates,
    pub layout: DaemonLayout,
    pub java: PathBuf,
    pub main_class: String,
    /// Maven-layout repository the daemon jar is resolved from.
    pub repository: PathBuf,
}

impl DaemonSession {
    /// Builds a session from client configuration.
    pub fn from_config(config: &ClientConfig, state_dir: &Path) -> Self {
        let coordinates = config.coordinates();
        DaemonSession {
            endpoint: config.endpoint.clone(),
            layout: DaemonLayout::new(state_dir, &coordinates.version),
            coordinates,
            java: config.java(),
            main_class: config.daemon.main_class.clone(),
            repository: config.repository(),
        }
    }

    /// Daemon classpath, resolved from its own coordinates.
    pub fn classpath(&self) -> PathBuf {
        self.repository.join(self.coordinates.repository_path())
    }

    /// Command line that starts the daemon with the given bootstrap file.
    pub fn command_line(&self, bootstrap: &Path) -> CommandLine {
        let mut bootstrap_arg = OsString::from("-Dkiln.bootstrap=");
        bootstrap_arg.push(bootstrap);

        CommandLine {
            program: self.java.clone(),
            args: vec![
                OsString::from("-cp"),
                self.classpath().into_os_string(),
                bootstrap_arg,
                OsString::from(format!("-Dkiln.port={}", self.endpoint.port)),
                OsString::from(&self.main_class),
            ],
            working_dir: self.layout.home().to_path_buf(),
            log_file: Some(self.layout.log_path()),
        }
    }
}

/// Polls the daemon until it answers a ping.
///
/// Returns the number of attempts it took. Each attempt first surfaces new
/// startup-log lines through `on_log`. Fails with
/// [`Error::DaemonUnavailable`] when a ping fails with anything other than a
/// refused connection, when `process` stops running, or when the attempt
/// budget runs out.
pub fn wait_until_ready(
    transport: &mut dyn Transport,
    process: &mut dyn ProcessHandle,
    tailer: &mut LogTailer,
    policy: &PollPolicy,
    sleeper: &dyn Sleeper,
    on_log: &mut dyn FnMut(&str),
) -> Result<u32> {
    let unavailable = |attempts: u32, reason: String, tailer: &LogTailer| Error::DaemonUnavailable {
        attempts,
        reason,
        log: tailer.path().display().to_string(),
    };

    for attempt in 1..=policy.attempts {
        surface(tailer, on_log)?;

        match transport.send(&Request::Ping) {
            Ok(_) => {
                surface(tailer, on_log)?;
                tracing::info!("daemon ready after {} attempt(s)", attempt);
                return Ok(attempt);
            }
            Err(e) if e.is_connection_refused() => {
                tracing::debug!("daemon not listening yet (attempt {})", attempt);
            }
            Err(e) => return Err(unavailable(attempt, e.to_string(), tailer)),
        }

        if !process.is_running() {
            surface(tailer, on_log)?;
            return Err(unavailable(
                attempt,
                "daemon process exited".to_string(),
                tailer,
            ));
        }

        if attempt < policy.attempts {
            sleeper.sleep(policy.interval);
        }
    }

    Err(unavailable(
        policy.attempts,
        "daemon did not answer a ping".to_string(),
        tailer,
    ))
}

fn surface(tailer: &mut LogTailer, on_log: &mut dyn FnMut(&str)) -> Result<()> {
    for line in tailer.poll_new_content()? {
        on_log(&line);
    }
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client for the compiler daemon.
//!
//! Each call blocks for one request/response round trip. Only
//! [`DaemonClient::create_or_update`] recovers from a refused connection: it
//! starts the daemon, waits for it, and retries the request exactly once.
//! A client is meant for one caller at a time.

use kiln_ipc::{ProjectDescriptor, Request};

use crate::error::Result;

use super::bootstrap::ensure_bootstrap;
use super::lifecycle::{
    wait_until_ready, DaemonSession, LaunchState, PollPolicy, Sleeper, ThreadSleeper,
};
use super::process::{ProcessSpawner, SystemSpawner};
use super::tail::LogTailer;
use super::transport::{HttpTransport, Transport};

/// Receives daemon startup-log lines while waiting for readiness.
pub type LogSink = Box<dyn FnMut(&str)>;

/// A client session with the daemon.
pub struct DaemonClient<T: Transport = HttpTransport> {
    transport: T,
    session: DaemonSession,
    spawner: Box<dyn ProcessSpawner>,
    sleeper: Box<dyn Sleeper>,
    policy: PollPolicy,
    on_log: LogSink,
    state: LaunchState,
}

impl<T: Transport> DaemonClient<T> {
    /// Creates a client that spawns real processes and sleeps between polls.
    pub fn new(transport: T, session: DaemonSession) -> Self {
        DaemonClient {
            transport,
            session,
            spawner: Box::new(SystemSpawner),
            sleeper: Box::new(ThreadSleeper),
            policy: PollPolicy::default(),
            on_log: Box::new(|line: &str| tracing::info!(target: "kiln::daemon", "{}", line)),
            state: LaunchState::NotStarted,
        }
    }

    pub fn with_spawner(mut self, spawner: impl ProcessSpawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Routes startup-log lines to `sink` instead of the tracing log.
    pub fn with_log_sink(mut self, sink: impl FnMut(&str) + 'static) -> Self {
        self.on_log = Box::new(sink);
        self
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &DaemonSession {
        &self.session
    }

    /// Upserts a project, starting the daemon if nothing is listening.
    pub fn create_or_update(&mut self, project: &ProjectDescriptor) -> Result<String> {
        let request = Request::create_or_update(project)?;
        match self.transport.send(&request) {
            Ok(body) => Ok(body),
            Err(e) if e.is_connection_refused() => {
                tracing::info!("daemon not reachable at {}, starting it", self.session.endpoint);
                self.start_daemon()?;
                Ok(self.transport.send(&request)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Compiles `project`, or every known project when `None`.
    ///
    /// The dependency flags only apply to a named project.
    pub fn compile(
        &mut self,
        project: Option<&str>,
        with_dependencies: bool,
        with_dependents: bool,
    ) -> Result<String> {
        self.send(Request::Compile {
            project: project.map(str::to_string),
            with_dependencies,
            with_dependents,
        })
    }

    pub fn remove(&mut self, project: &str) -> Result<String> {
        self.send(Request::Remove {
            project: project.to_string(),
        })
    }

    pub fn clean(&mut self) -> Result<String> {
        self.send(Request::Clean)
    }

    pub fn stop(&mut self) -> Result<String> {
        self.send(Request::Stop)
    }

    pub fn ping(&mut self) -> Result<String> {
        self.send(Request::Ping)
    }

    fn send(&mut self, request: Request) -> Result<String> {
        Ok(self.transport.send(&request)?)
    }

    fn start_daemon(&mut self) -> Result<()> {
        self.state = LaunchState::Spawning;
        match self.spawn_and_wait() {
            Ok(_) => {
                self.state = LaunchState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("daemon startup failed: {}", e);
                self.state = LaunchState::Failed;
                Err(e)
            }
        }
    }

    fn spawn_and_wait(&mut self) -> Result<u32> {
        let bootstrap = ensure_bootstrap(&self.session.layout, &self.session.coordinates)?;
        // Dropped on every exit path, releasing the log file handle.
        let mut tailer = LogTailer::from_end(self.session.layout.log_path())?;

        let command = self.session.command_line(&bootstrap);
        tracing::info!("starting daemon: {}", command.display());
        let mut process = self.spawner.spawn(&command)?;

        self.state = LaunchState::Polling;
        wait_until_ready(
            &mut self.transport,
            process.as_mut(),
            &mut tailer,
            &self.policy,
            self.sleeper.as_ref(),
            self.on_log.as_mut(),
        )
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

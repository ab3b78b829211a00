// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fakes for driving the daemon startup state machine in tests.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use kiln_core::ArtifactCoordinates;
use kiln_ipc::{Endpoint, Request};

use crate::error::Result;

use super::bootstrap::DaemonLayout;
use super::lifecycle::{DaemonSession, Sleeper};
use super::process::{CommandLine, ProcessHandle, ProcessSpawner};
use super::transport::{Transport, TransportError, TransportResult};

/// A scripted transport reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Body(&'static str),
    Refused,
    Broken,
}

impl Reply {
    fn into_result(self) -> TransportResult<String> {
        match self {
            Reply::Body(body) => Ok(body.to_string()),
            Reply::Refused => Err(TransportError::ConnectionRefused("scripted".into())),
            Reply::Broken => Err(TransportError::Http("connection reset".into())),
        }
    }
}

/// Transport that plays back scripted replies, then repeats `then`.
pub struct ScriptedTransport {
    script: VecDeque<Reply>,
    then: Reply,
    pub sent: Vec<Request>,
}

impl ScriptedTransport {
    pub fn new(script: impl IntoIterator<Item = Reply>, then: Reply) -> Self {
        ScriptedTransport {
            script: script.into_iter().collect(),
            then,
            sent: Vec::new(),
        }
    }

    /// Transport that refuses every request.
    pub fn refusing() -> Self {
        Self::new([], Reply::Refused)
    }

    pub fn sent_actions(&self) -> Vec<&'static str> {
        self.sent.iter().map(Request::action).collect()
    }

    pub fn pings(&self) -> usize {
        self.sent.iter().filter(|r| **r == Request::Ping).count()
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, request: &Request) -> TransportResult<String> {
        self.sent.push(request.clone());
        self.script
            .pop_front()
            .unwrap_or_else(|| self.then.clone())
            .into_result()
    }
}

/// Process that reports running for a fixed number of checks.
pub struct FakeProcess {
    /// `None` runs forever.
    running_for: Option<u32>,
    checks: Rc<Cell<u32>>,
}

impl FakeProcess {
    pub fn new(running_for: Option<u32>) -> (Self, Rc<Cell<u32>>) {
        let checks = Rc::new(Cell::new(0));
        (
            FakeProcess {
                running_for,
                checks: Rc::clone(&checks),
            },
            checks,
        )
    }
}

impl ProcessHandle for FakeProcess {
    fn is_running(&mut self) -> bool {
        let n = self.checks.get() + 1;
        self.checks.set(n);
        match self.running_for {
            Some(limit) => n < limit,
            None => true,
        }
    }
}

/// Spawner that records command lines and writes startup lines to the log.
#[derive(Clone, Default)]
pub struct FakeSpawner {
    pub spawned: Rc<RefCell<Vec<CommandLine>>>,
    pub checks: Rc<Cell<u32>>,
    running_for: Option<u32>,
    startup_lines: Vec<&'static str>,
}

impl FakeSpawner {
    /// Spawns processes that stop running on the `n`th liveness check.
    pub fn exiting_after(n: u32) -> Self {
        FakeSpawner {
            running_for: Some(n),
            ..Default::default()
        }
    }

    pub fn with_startup_lines(mut self, lines: &[&'static str]) -> Self {
        self.startup_lines = lines.to_vec();
        self
    }

    pub fn spawn_count(&self) -> usize {
        self.spawned.borrow().len()
    }
}

impl ProcessSpawner for FakeSpawner {
    fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>> {
        self.spawned.borrow_mut().push(command.clone());
        if let Some(log) = &command.log_file {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log)?;
            for line in &self.startup_lines {
                writeln!(file, "{}", line)?;
            }
        }
        Ok(Box::new(FakeProcess {
            running_for: self.running_for,
            checks: Rc::clone(&self.checks),
        }))
    }
}

/// Sleeper that only counts.
#[derive(Clone, Default)]
pub struct CountingSleeper {
    pub slept: Rc<RefCell<Vec<Duration>>>,
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// A session rooted in a temporary state directory.
pub fn test_session(state_dir: &Path) -> DaemonSession {
    let coordinates = ArtifactCoordinates::new("org.kiln", "kiln-daemon", "2.7.1");
    DaemonSession {
        endpoint: Endpoint::default(),
        layout: DaemonLayout::new(state_dir, &coordinates.version),
        coordinates,
        java: "java".into(),
        main_class: "org.kiln.daemon.Main".into(),
        repository: state_dir.join("repo"),
    }
}

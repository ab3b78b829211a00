// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process spawning for the daemon.
//!
//! The client only needs two things from the OS: start a command line, and
//! later ask whether that process is still alive. Both sit behind traits so
//! the startup state machine can be driven by fakes in tests.

use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::error::{Error, Result};

/// A command to launch the daemon with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
    /// File that receives the process's stdout and stderr (appended).
    pub log_file: Option<PathBuf>,
}

impl CommandLine {
    /// Renders the command for log messages.
    pub fn display(&self) -> String {
        let mut out = self.program.display().to_string();
        for arg in &self.args {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }
}

/// Handle to a spawned process.
pub trait ProcessHandle {
    /// Returns false once the process has exited.
    fn is_running(&mut self) -> bool;
}

/// Starts processes.
pub trait ProcessSpawner {
    fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>>;
}

/// Spawns real OS processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn(&self, command: &CommandLine) -> Result<Box<dyn ProcessHandle>> {
        let (stdout, stderr) = match &command.log_file {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                (Stdio::from(file.try_clone()?), Stdio::from(file))
            }
            None => (Stdio::null(), Stdio::null()),
        };

        let child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|e| Error::SpawnFailed {
                program: command.program.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!("spawned daemon pid {}", child.id());
        Ok(Box::new(ChildHandle { child }))
    }
}

/// A child process. Dropping the handle leaves the daemon running.
struct ChildHandle {
    child: Child,
}

impl ProcessHandle for ChildHandle {
    fn is_running(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::warn!("daemon process exited with {}", status);
                false
            }
            Err(e) => {
                tracing::warn!("failed to query daemon process: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::daemon::TransportError;

/// All possible errors that can occur in the kilnrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot start or connect to daemon after {attempts} attempt(s): {reason}\n  hint: check the daemon log at {log}")]
    DaemonUnavailable {
        attempts: u32,
        reason: String,
        log: String,
    },

    #[error("failed to start daemon ({program}): {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Protocol(#[from] kiln_ipc::ProtocolError),

    #[error("{0}")]
    Core(#[from] kiln_core::Error),

    #[error("compilation failed: {errors} error(s)")]
    CompileFailed { errors: usize },

    #[error("{count} incompatible dependenc{}", if *count == 1 { "y" } else { "ies" })]
    IncompatibleDependencies { count: usize },

    #[error("unsupported project file '{0}'\n  hint: use a .toml, .yaml or .yml file")]
    UnsupportedProjectFile(String),

    #[error("invalid project file '{path}': {reason}")]
    InvalidProjectFile { path: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for kilnrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

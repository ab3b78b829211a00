// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for kiln-core operations.

use thiserror::Error;

/// All possible errors that can occur in kiln-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid artifact coordinates: '{0}'\n  hint: expected group:artifact:version")]
    InvalidCoordinates(String),

    #[error("invalid severity: '{0}'\n  hint: valid severities are: INFO, WARN, ERROR")]
    InvalidSeverity(String),
}

/// A specialized Result type for kiln-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

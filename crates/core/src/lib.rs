// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kiln-core: Shared primitives for the kiln compiler-daemon bridge
//!
//! This crate provides version parsing and compatibility masks, the
//! dependency compatibility gate, and the line-by-line classifier used to
//! assign severities to plain-text compiler output.

pub mod classify;
pub mod compat;
pub mod error;
pub mod severity;
pub mod version;

pub use classify::{classify_lines, ClassifierState, CARET_MARKER};
pub use compat::{ArtifactCoordinates, Compatibility, DistroCompat};
pub use error::{Error, Result};
pub use severity::Severity;
pub use version::{VersionMask, VersionNumber};

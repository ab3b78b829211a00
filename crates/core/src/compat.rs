// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Gate for checking resolved dependency versions against a required mask.
//!
//! Only artifacts that belong to the distro group are checked. Anything
//! else is reported as [`Compatibility::Unchecked`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::version::{VersionMask, VersionNumber};

/// Maven-style `group:artifact:version` coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinates {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

impl ArtifactCoordinates {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        ArtifactCoordinates {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
        }
    }

    /// Relative path of the artifact's jar inside a Maven-layout repository.
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}-{}.jar",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.artifact,
            self.version
        )
    }
}

impl fmt::Display for ArtifactCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)
    }
}

impl FromStr for ArtifactCoordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(g), Some(a), Some(v), None) if !g.is_empty() && !a.is_empty() && !v.is_empty() => {
                Ok(ArtifactCoordinates::new(g, a, v))
            }
            _ => Err(Error::InvalidCoordinates(s.to_string())),
        }
    }
}

/// Outcome of a dependency compatibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compatibility {
    /// The resolved version satisfies the required mask.
    Compatible,
    /// The resolved version falls outside the required mask.
    Incompatible { required: String, found: String },
    /// The artifact is not part of the distro; no check was made.
    Unchecked,
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        !matches!(self, Compatibility::Incompatible { .. })
    }
}

/// Checks distro artifacts against a required version mask.
#[derive(Debug, Clone)]
pub struct DistroCompat {
    group: String,
    required: VersionMask,
}

impl DistroCompat {
    pub fn new(group: impl Into<String>, required: VersionMask) -> Self {
        DistroCompat {
            group: group.into(),
            required,
        }
    }

    /// Returns true if the artifact belongs to the distro group.
    ///
    /// Sub-groups (`org.acme.tools` under `org.acme`) count as members.
    pub fn is_distro(&self, artifact: &ArtifactCoordinates) -> bool {
        artifact.group == self.group
            || artifact
                .group
                .strip_prefix(self.group.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
    }

    /// Checks a resolved artifact against the required mask.
    pub fn check(&self, artifact: &ArtifactCoordinates) -> Compatibility {
        if !self.is_distro(artifact) {
            return Compatibility::Unchecked;
        }
        let found = VersionNumber::parse(&artifact.version);
        if self.required.matches(&found) {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible {
                required: self.required.to_string(),
                found: found.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "compat_tests.rs"]
mod tests;

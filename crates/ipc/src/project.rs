// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project descriptors sent with `createOrUpdate`.
//!
//! A descriptor is a complete, self-describing project definition. It is
//! encoded as a YAML document; several documents travel in one request
//! separated by a literal `---` line.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Separator line between documents in a multi-project upsert.
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Everything the daemon needs to compile one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub name: String,
    #[serde(default)]
    pub source_roots: Vec<PathBuf>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    /// Names of other daemon projects this one compiles against.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

impl ProjectDescriptor {
    /// Creates a descriptor with no sources, filters or classpath.
    pub fn new(name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        ProjectDescriptor {
            name: name.into(),
            source_roots: Vec::new(),
            includes: Vec::new(),
            excludes: Vec::new(),
            output_dir: output_dir.into(),
            classpath: Vec::new(),
            compiler_args: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Checks the fields the daemon cannot do without.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.name.trim().is_empty() {
            return Err(ProtocolError::InvalidDescriptor(
                "name cannot be empty".to_string(),
            ));
        }
        if self.name.contains(['\n', '\r']) {
            return Err(ProtocolError::InvalidDescriptor(format!(
                "name '{}' contains a line break",
                self.name.escape_debug()
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ProtocolError::InvalidDescriptor(format!(
                "project '{}' has no output directory",
                self.name
            )));
        }
        Ok(())
    }

    /// Renders this descriptor as a single YAML document.
    pub fn render(&self) -> Result<String, ProtocolError> {
        self.validate()?;
        serde_yaml::to_string(self).map_err(|e| ProtocolError::Yaml(e.to_string()))
    }

    /// Renders several descriptors as one `---`-separated body.
    pub fn render_all(projects: &[ProjectDescriptor]) -> Result<String, ProtocolError> {
        let mut body = String::new();
        for (i, project) in projects.iter().enumerate() {
            if i > 0 {
                body.push_str(DOCUMENT_SEPARATOR);
                body.push('\n');
            }
            body.push_str(&project.render()?);
        }
        Ok(body)
    }

    /// Parses a single YAML document.
    pub fn parse(document: &str) -> Result<Self, ProtocolError> {
        let project: ProjectDescriptor =
            serde_yaml::from_str(document).map_err(|e| ProtocolError::Yaml(e.to_string()))?;
        project.validate()?;
        Ok(project)
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

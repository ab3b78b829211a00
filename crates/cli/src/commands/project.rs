// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use kiln_ipc::project::DOCUMENT_SEPARATOR;
use kiln_ipc::ProjectDescriptor;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::{fail_on_errors, open_client, report_response};

/// Pushes every project in `files`, starting the daemon if needed.
pub fn run(files: &[PathBuf], format: OutputFormat) -> Result<()> {
    // Load everything first so a bad file never leaves a partial upsert.
    let mut projects = Vec::new();
    for file in files {
        projects.extend(load_projects(file)?);
    }

    let mut client = open_client()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut errors = 0;
    for project in &projects {
        tracing::debug!("pushing project '{}'", project.name);
        let body = client.create_or_update(project)?;
        errors += report_response(&body, format, &mut out)?;
    }
    fail_on_errors(errors)
}

/// Reads project descriptors from a `.toml`, `.yaml` or `.yml` file.
///
/// A TOML file holds one project. A YAML file may hold several documents
/// separated by `---` lines.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectDescriptor>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let invalid = |reason: String| Error::InvalidProjectFile {
        path: path.display().to_string(),
        reason,
    };

    match extension.as_deref() {
        Some("toml") => {
            let content = fs::read_to_string(path)?;
            let project: ProjectDescriptor =
                toml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
            project.validate().map_err(|e| invalid(e.to_string()))?;
            Ok(vec![project])
        }
        Some("yaml" | "yml") => {
            let content = fs::read_to_string(path)?;
            let projects = split_documents(&content)
                .iter()
                .map(|document| ProjectDescriptor::parse(document))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| invalid(e.to_string()))?;
            if projects.is_empty() {
                return Err(invalid("no project documents".to_string()));
            }
            Ok(projects)
        }
        _ => Err(Error::UnsupportedProjectFile(path.display().to_string())),
    }
}

/// Splits a YAML stream on `---` lines, dropping blank documents.
fn split_documents(content: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current = String::new();
    for line in content.lines() {
        if line.trim_end() == DOCUMENT_SEPARATOR {
            documents.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    documents.push(current);
    documents.retain(|d| !d.trim().is_empty());
    documents
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;

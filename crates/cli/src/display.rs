// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use kiln_core::{Compatibility, Severity};
use kiln_ipc::DiagnosticEvent;
use serde::Serialize;

use crate::error::Result;

/// Lower-case label used in text output.
pub fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "info",
        Severity::Warn => "warning",
        Severity::Error => "error",
    }
}

/// Formats a diagnostic as `error: path:line:col: message`.
///
/// Continuation lines of a multi-line message are indented by two spaces.
pub fn format_event(event: &DiagnosticEvent) -> String {
    let mut out = format!("{}: ", severity_label(event.severity));
    if let Some(location) = &event.location {
        out.push_str(&format!(
            "{}:{}:{}: ",
            location.file, location.line, location.column
        ));
    }
    let mut lines = event.text.lines();
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push_str("\n  ");
        out.push_str(line);
    }
    out
}

/// Formats one JSON object per event (JSONL).
pub fn format_events_json(events: &[DiagnosticEvent]) -> Result<String> {
    let lines = events
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

#[derive(Serialize)]
struct ClassifiedLine<'a> {
    severity: Severity,
    line: &'a str,
}

/// Formats a classified log line as `severity  line`, padded to align.
pub fn format_classified(severity: Severity, line: &str) -> String {
    format!("{:<7} {}", severity_label(severity), line)
}

pub fn format_classified_json(severity: Severity, line: &str) -> Result<String> {
    Ok(serde_json::to_string(&ClassifiedLine { severity, line })?)
}

#[derive(Serialize)]
struct CompatibilityReport<'a> {
    artifact: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    found: Option<&'a str>,
}

fn status_label(result: &Compatibility) -> &'static str {
    match result {
        Compatibility::Compatible => "compatible",
        Compatibility::Incompatible { .. } => "incompatible",
        Compatibility::Unchecked => "unchecked",
    }
}

/// Formats a version check result for one artifact.
pub fn format_compatibility(artifact: &str, result: &Compatibility) -> String {
    match result {
        Compatibility::Incompatible { required, found } => {
            format!("{artifact}: incompatible (requires {required}, found {found})")
        }
        other => format!("{artifact}: {}", status_label(other)),
    }
}

pub fn format_compatibility_json(artifact: &str, result: &Compatibility) -> Result<String> {
    let (required, found) = match result {
        Compatibility::Incompatible { required, found } => {
            (Some(required.as_str()), Some(found.as_str()))
        }
        _ => (None, None),
    };
    Ok(serde_json::to_string(&CompatibilityReport {
        artifact,
        status: status_label(result),
        required,
        found,
    })?)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;

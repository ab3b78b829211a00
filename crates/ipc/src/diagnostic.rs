// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured diagnostic lines in daemon responses.
//!
//! Grammar (fields separated by a single tab):
//!
//! ```text
//! -SEVERITY <category> [<path>#<line>,<column>,<offset>,<length>] <message>
//! ```
//!
//! The location field may be empty. Messages cannot contain raw newlines, so
//! the daemon writes [`NEWLINE_SENTINEL`] in their place. Any line that does
//! not follow the grammar exactly is not a diagnostic and is skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

use kiln_core::Severity;

/// Stands in for `\n` inside a diagnostic message on the wire.
pub const NEWLINE_SENTINEL: char = '\u{2028}';

/// Where in a source file a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
    pub length: u32,
}

impl SourceLocation {
    fn parse(token: &str) -> Option<Self> {
        // Paths may themselves contain '#', the numbers never do.
        let (file, numbers) = token.rsplit_once('#')?;
        if file.is_empty() {
            return None;
        }
        let mut nums = numbers.split(',').map(|n| n.trim().parse::<u32>());
        let location = SourceLocation {
            file: file.to_string(),
            line: nums.next()?.ok()?,
            column: nums.next()?.ok()?,
            offset: nums.next()?.ok()?,
            length: nums.next()?.ok()?,
        };
        match nums.next() {
            None => Some(location),
            Some(_) => None,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{},{},{},{}",
            self.file, self.line, self.column, self.offset, self.length
        )
    }
}

/// One structured diagnostic reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub severity: Severity,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Message text with sentinels expanded to real newlines.
    pub text: String,
}

impl DiagnosticEvent {
    /// Parses one response line. Returns `None` for anything that is not a
    /// well-formed diagnostic.
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix('-')?;
        let mut fields = rest.splitn(4, '\t');
        let severity = fields.next()?.parse::<Severity>().ok()?;
        let category = fields.next()?;
        let location = match fields.next()? {
            "" => None,
            token => Some(SourceLocation::parse(token)?),
        };
        let message = fields.next()?;

        Some(DiagnosticEvent {
            severity,
            category: category.to_string(),
            location,
            text: message.replace(NEWLINE_SENTINEL, "\n"),
        })
    }

    /// Encodes this event as a wire line (without trailing newline).
    pub fn to_wire(&self) -> String {
        let location = self
            .location
            .as_ref()
            .map(|l| l.to_string())
            .unwrap_or_default();
        format!(
            "-{}\t{}\t{}\t{}",
            self.severity,
            self.category,
            location,
            self.text.replace('\n', &NEWLINE_SENTINEL.to_string())
        )
    }

    pub fn source_file(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.file.as_str())
    }
}

/// Extracts every diagnostic from a response body, in order.
pub fn parse_diagnostics(body: &str) -> Vec<DiagnosticEvent> {
    body.lines().filter_map(DiagnosticEvent::parse_line).collect()
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;

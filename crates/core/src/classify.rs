// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Line-by-line severity classification for plain-text compiler output.
//!
//! Compilers print one diagnostic over several lines: a header carrying the
//! severity keyword and location, then source context, then a caret line
//! pointing at the column. Only the header says how severe it is, so the
//! classifier threads a [`ClassifierState`] through the lines:
//!
//! - severity is sticky and persists until a new header is seen
//! - a header for a diagnostic that prints a caret sets a marker; every
//!   line up to and including the first one containing the marker keeps the
//!   header's severity, then the marker is cleared
//!
//! Lines that match nothing are never an error, they inherit the current
//! severity.

use regex::Regex;
use std::sync::LazyLock;

use crate::severity::Severity;

/// Marker that ends a compiler diagnostic's context block.
pub const CARET_MARKER: &str = "^";

// `path:line[:col]: keyword: message` as printed by javac-like compilers.
static LOCATED_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(
        r"(?i)^(?:[a-z]:)?[^\s:][^:]*:\d+:(?:\d+:)?\s*(error|fatal|warning|warn|note|info)\b",
    ) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

// `[keyword] path:line[:col]: message` as printed by sbt-style build tools.
static BRACKETED_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"(?i)^\[(error|warning|warn|info)\]\s+\S[^:]*:\d+(?::\d+)?:") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    }
});

/// Classification state threaded from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierState {
    /// Severity applied to the current line and inherited by the next.
    pub severity: Severity,
    /// While set, lines keep `severity` until one contains this substring.
    pub until_contains: Option<&'static str>,
}

impl ClassifierState {
    /// Fresh state for the start of a response stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `line` and returns the state to carry into the next line.
    ///
    /// The returned state's `severity` is the severity of `line` itself.
    pub fn next(self, line: &str) -> ClassifierState {
        if let Some(marker) = self.until_contains {
            if line.contains(marker) {
                return ClassifierState {
                    severity: self.severity,
                    until_contains: None,
                };
            }
        }

        match match_header(line) {
            Some(severity) => ClassifierState {
                severity,
                until_contains: prints_caret(severity).then_some(CARET_MARKER),
            },
            None => self,
        }
    }
}

/// Returns the severity of a diagnostic header line, if `line` is one.
fn match_header(line: &str) -> Option<Severity> {
    LOCATED_HEADER_RE
        .captures(line)
        .or_else(|| BRACKETED_HEADER_RE.captures(line))
        .and_then(|caps| caps.get(1))
        .and_then(|kw| Severity::from_keyword(kw.as_str()))
}

/// Warnings and errors are followed by a source excerpt and caret line.
fn prints_caret(severity: Severity) -> bool {
    severity >= Severity::Warn
}

/// Classifies every line of `text`, starting from a fresh state.
pub fn classify_lines(text: &str) -> Vec<(Severity, &str)> {
    let mut state = ClassifierState::new();
    text.lines()
        .map(|line| {
            state = state.next(line);
            (state.severity, line)
        })
        .collect()
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

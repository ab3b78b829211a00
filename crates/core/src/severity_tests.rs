// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    info = { "INFO", Severity::Info },
    warn = { "WARN", Severity::Warn },
    error = { "ERROR", Severity::Error },
)]
fn parses_wire_keyword(input: &str, expected: Severity) {
    assert_eq!(input.parse::<Severity>().unwrap(), expected);
    assert_eq!(expected.as_str(), input);
}

#[test]
fn wire_keyword_is_case_sensitive() {
    assert!("error".parse::<Severity>().is_err());
}

#[parameterized(
    error = { "error", Some(Severity::Error) },
    error_upper = { "ERROR", Some(Severity::Error) },
    warning = { "warning", Some(Severity::Warn) },
    warn = { "warn", Some(Severity::Warn) },
    note = { "note", Some(Severity::Info) },
    unknown = { "hint", None },
)]
fn maps_compiler_keywords(keyword: &str, expected: Option<Severity>) {
    assert_eq!(Severity::from_keyword(keyword), expected);
}

#[test]
fn severities_order_by_gravity() {
    assert!(Severity::Info < Severity::Warn);
    assert!(Severity::Warn < Severity::Error);
    assert_eq!(Severity::default(), Severity::Info);
}

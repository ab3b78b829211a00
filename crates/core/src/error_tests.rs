// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    coordinates = { Error::InvalidCoordinates("org.acme".into()), "org.acme" },
    coordinates_hint = { Error::InvalidCoordinates("x".into()), "group:artifact:version" },
    severity = { Error::InvalidSeverity("FATAL".into()), "FATAL" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

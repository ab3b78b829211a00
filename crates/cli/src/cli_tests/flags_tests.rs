// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn output_defaults_to_text() {
    let cli = Cli::try_parse_from(["kiln", "ping"]).unwrap();
    assert_eq!(cli.output, OutputFormat::Text);
}

#[parameterized(
    long_before = { &["kiln", "--output", "json", "compile"] },
    long_after = { &["kiln", "compile", "--output", "json"] },
    short_after = { &["kiln", "classify", "-o", "json"] },
)]
fn output_json_is_global(args: &[&str]) {
    let cli = Cli::try_parse_from(args).unwrap();
    assert_eq!(cli.output, OutputFormat::Json);
}

#[test]
fn unknown_output_format_rejected() {
    assert!(Cli::try_parse_from(["kiln", "--output", "xml", "ping"]).is_err());
}

#[test]
fn subcommand_required() {
    assert!(Cli::try_parse_from(["kiln"]).is_err());
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use kiln_core::classify_lines;

use crate::cli::OutputFormat;
use crate::display::{format_classified, format_classified_json};
use crate::error::Result;

/// Classifies a plain compiler log read from `file`, or stdin.
pub fn run(file: Option<&Path>, format: OutputFormat) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    run_impl(&text, format, &mut io::stdout().lock())
}

pub(crate) fn run_impl(text: &str, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    for (severity, line) in classify_lines(text) {
        match format {
            OutputFormat::Text => writeln!(out, "{}", format_classified(severity, line))?,
            OutputFormat::Json => writeln!(out, "{}", format_classified_json(severity, line)?)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;

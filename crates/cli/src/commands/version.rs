// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use kiln_core::{ArtifactCoordinates, Compatibility, DistroCompat, VersionMask, VersionNumber};

use crate::cli::OutputFormat;
use crate::display::{format_compatibility, format_compatibility_json};
use crate::error::{Error, Result};

/// Checks each found version (or artifact, with `distro`) against `required`.
pub fn check(
    required: &str,
    found: &[String],
    distro: Option<&str>,
) -> Result<Vec<(String, Compatibility)>> {
    let mask = VersionMask::parse(required);
    match distro {
        Some(group) => {
            let gate = DistroCompat::new(group, mask);
            found
                .iter()
                .map(|item| {
                    let artifact: ArtifactCoordinates = item.parse()?;
                    Ok((item.clone(), gate.check(&artifact)))
                })
                .collect()
        }
        None => Ok(found
            .iter()
            .map(|item| {
                let version = VersionNumber::parse(item);
                let result = if mask.matches(&version) {
                    Compatibility::Compatible
                } else {
                    Compatibility::Incompatible {
                        required: mask.to_string(),
                        found: version.to_string(),
                    }
                };
                (item.clone(), result)
            })
            .collect()),
    }
}

pub fn run(
    required: &str,
    found: &[String],
    distro: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    run_impl(required, found, distro, format, &mut io::stdout().lock())
}

pub(crate) fn run_impl(
    required: &str,
    found: &[String],
    distro: Option<&str>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let results = check(required, found, distro)?;
    for (item, result) in &results {
        match format {
            OutputFormat::Text => writeln!(out, "{}", format_compatibility(item, result))?,
            OutputFormat::Json => writeln!(out, "{}", format_compatibility_json(item, result)?)?,
        }
    }

    let count = results.iter().filter(|(_, r)| !r.is_compatible()).count();
    if count > 0 {
        return Err(Error::IncompatibleDependencies { count });
    }
    Ok(())
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;

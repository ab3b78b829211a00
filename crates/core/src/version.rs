// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dotted version numbers and partial version masks.
//!
//! Format: `{major}[.{minor}[.{bugfix}]][{modifier}]`
//!
//! Parsing never fails. Missing numeric groups read as 0 and anything after
//! the last numeric group (including its leading `.` or `-`) is kept verbatim
//! as the modifier, so `2.7.1.RC` has modifier `.RC`.
//!
//! Ordering rules:
//! 1. Compare `(major, minor, bugfix)` numerically
//! 2. If equal, a version with a modifier sorts before one without
//! 3. Two modifiers never order against each other (`2.7-a == 2.7-b`)

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Result of scanning a version string.
struct Parsed {
    parts: [u32; 3],
    precision: u8,
    modifier: Option<String>,
}

fn parse_components(s: &str) -> Parsed {
    let mut parts = [0u32; 3];
    let mut precision = 0u8;
    let mut rest = s;

    for (i, slot) in parts.iter_mut().enumerate() {
        let body = if i == 0 {
            rest
        } else {
            match rest.strip_prefix('.') {
                Some(r) if r.starts_with(|c: char| c.is_ascii_digit()) => r,
                _ => break,
            }
        };
        let end = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        if end == 0 {
            break;
        }
        // Out-of-range groups saturate instead of failing the parse.
        *slot = body[..end].parse().unwrap_or(u32::MAX);
        rest = &body[end..];
        precision += 1;
    }

    Parsed {
        parts,
        precision,
        modifier: (!rest.is_empty()).then(|| rest.to_string()),
    }
}

/// A parsed dotted version with an optional trailing modifier.
///
/// Equality follows the ordering: `2.7` equals `2.7.0`, and `2.7-a` equals
/// `2.7-b`. Use [`VersionNumber::modifier`] to inspect the modifier text.
#[derive(Debug, Clone)]
pub struct VersionNumber {
    major: u32,
    minor: u32,
    bugfix: u32,
    modifier: Option<String>,
    raw: String,
}

impl VersionNumber {
    /// Parses a version string. Never fails.
    pub fn parse(s: &str) -> Self {
        let parsed = parse_components(s);
        VersionNumber {
            major: parsed.parts[0],
            minor: parsed.parts[1],
            bugfix: parsed.parts[2],
            modifier: parsed.modifier,
            raw: s.to_string(),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn bugfix(&self) -> u32 {
        self.bugfix
    }

    /// The verbatim suffix after the numeric groups, if any.
    pub fn modifier(&self) -> Option<&str> {
        self.modifier.as_deref()
    }

    /// Returns the string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    fn triplet(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.bugfix)
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        // `false < true`, so a version carrying a modifier sorts first.
        self.triplet()
            .cmp(&other.triplet())
            .then_with(|| self.modifier.is_none().cmp(&other.modifier.is_none()))
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionNumber {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionNumber {}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl FromStr for VersionNumber {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(VersionNumber::parse(s))
    }
}

impl From<&str> for VersionNumber {
    fn from(s: &str) -> Self {
        VersionNumber::parse(s)
    }
}

/// A partially specified version used as a compatibility predicate.
///
/// Only the numeric groups written in the source string take part in
/// comparisons: the mask `2.7` equals `2.7`, `2.7.0`, `2.7.1` and
/// `2.7.2-rc1`. Modifiers never break a tie on either side.
#[derive(Debug, Clone)]
pub struct VersionMask {
    version: VersionNumber,
    precision: u8,
}

impl VersionMask {
    /// Parses a mask. Never fails.
    pub fn parse(s: &str) -> Self {
        let precision = parse_components(s).precision;
        VersionMask {
            version: VersionNumber::parse(s),
            precision,
        }
    }

    /// Number of numeric groups present in the source string (0-3).
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The mask's value read as a concrete version.
    pub fn version(&self) -> &VersionNumber {
        &self.version
    }

    /// Compares this mask against a concrete version.
    ///
    /// The major group is always compared; minor and bugfix only when the
    /// mask spelled them out.
    pub fn compare_to(&self, other: &VersionNumber) -> Ordering {
        let mut ord = self.version.major.cmp(&other.major);
        if self.precision >= 2 {
            ord = ord.then_with(|| self.version.minor.cmp(&other.minor));
        }
        if self.precision >= 3 {
            ord = ord.then_with(|| self.version.bugfix.cmp(&other.bugfix));
        }
        ord
    }

    /// Returns true if `other` satisfies this mask.
    pub fn matches(&self, other: &VersionNumber) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl PartialEq<VersionNumber> for VersionMask {
    fn eq(&self, other: &VersionNumber) -> bool {
        self.matches(other)
    }
}

impl PartialOrd<VersionNumber> for VersionMask {
    fn partial_cmp(&self, other: &VersionNumber) -> Option<Ordering> {
        Some(self.compare_to(other))
    }
}

impl fmt::Display for VersionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}

impl FromStr for VersionMask {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(VersionMask::parse(s))
    }
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
